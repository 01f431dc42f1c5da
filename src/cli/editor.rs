//! Reedline setup: prompt, slash-command completion, highlighting.
//!
//! Type "/" then Tab to see commands. Menu filters as you type.

use nu_ansi_term::{Color, Style};
use reedline::{
    ColumnarMenu, Completer, Emacs, Highlighter, KeyCode, KeyModifiers, MenuBuilder, Prompt,
    PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus, Reedline, ReedlineEvent,
    ReedlineMenu, Span, StyledText, Suggestion,
};
use std::borrow::Cow;

/// All slash commands with descriptions.
pub const COMMANDS: &[(&str, &str)] = &[
    ("/clear", "Start a new chat"),
    ("/exit", "Exit"),
    ("/help", "Show help"),
    ("/quit", "Exit"),
];

/// Completer for Quip commands.
#[derive(Clone, Default)]
pub struct QuipCompleter;

impl QuipCompleter {
    pub fn new() -> Self {
        Self
    }
}

impl Completer for QuipCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        if pos > line.len() {
            return Vec::new();
        }

        let input = &line[..pos];
        if input.is_empty() || !input.starts_with('/') {
            return Vec::new();
        }

        // Only the command itself completes; arguments are free text.
        if input.contains(' ') {
            return Vec::new();
        }

        let prefix = input.to_lowercase();
        COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(&prefix))
            .map(|(cmd, desc)| Suggestion {
                value: cmd.to_string(),
                description: Some(desc.to_string()),
                extra: None,
                span: Span::new(0, pos),
                append_whitespace: true,
                style: None,
            })
            .collect()
    }
}

/// Quip prompt showing the active model.
pub struct QuipPrompt {
    pub model_name: String,
}

impl QuipPrompt {
    pub fn new(model: &str) -> Self {
        Self {
            model_name: model.to_string(),
        }
    }
}

impl Prompt for QuipPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Owned(format!(
            "\x1b[1;36mquip\x1b[0m \x1b[2m[{}]\x1b[0m",
            self.model_name
        ))
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed(" ❯ ")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(&self, hs: PromptHistorySearch) -> Cow<'_, str> {
        let prefix = match hs.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!("({}search: {}) ", prefix, hs.term))
    }
}

/// Syntax highlighter for slash commands.
#[derive(Clone)]
pub struct QuipHighlighter;

impl Highlighter for QuipHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();

        if line.starts_with('/') {
            let cmd_end = line.find(' ').unwrap_or(line.len());
            let cmd = &line[..cmd_end];
            let is_valid = COMMANDS.iter().any(|(c, _)| *c == cmd);

            if is_valid {
                styled.push((Style::new().fg(Color::Cyan).bold(), cmd.to_string()));
            } else {
                styled.push((Style::new().fg(Color::Yellow), cmd.to_string()));
            }

            if cmd_end < line.len() {
                styled.push((Style::default(), line[cmd_end..].to_string()));
            }
        } else {
            styled.push((Style::default(), line.to_string()));
        }

        styled
    }
}

/// Build the line editor with completion menu and keybindings.
pub fn create_reedline(completer: QuipCompleter) -> Reedline {
    let completion_menu = Box::new(
        ColumnarMenu::default()
            .with_name("completion_menu")
            .with_columns(1)
            .with_column_padding(2)
            .with_text_style(Style::new().fg(Color::Default))
            .with_selected_text_style(Style::new().fg(Color::Black).on(Color::Cyan))
            .with_description_text_style(Style::new().fg(Color::DarkGray)),
    );

    let mut keybindings = reedline::default_emacs_keybindings();

    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );

    keybindings.add_binding(
        KeyModifiers::SHIFT,
        KeyCode::BackTab,
        ReedlineEvent::MenuPrevious,
    );

    Reedline::create()
        .with_completer(Box::new(completer))
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_quick_completions(true)
        .with_partial_completions(true)
        .with_highlighter(Box::new(QuipHighlighter))
        .with_edit_mode(Box::new(Emacs::new(keybindings)))
}
