//! The turn controller: one request/response cycle per user submission.
//!
//! State machine: `Idle -> Submitting -> Idle`. A submission appends the
//! user turn, clears the staged input, raises the loading flag, and calls
//! the completion backend. Success appends the trimmed reply; any failure
//! appends one fixed fallback reply. Either way the loading flag drops and
//! the controller is ready for the next submission.

use tracing::warn;

use crate::chat::{ChatSession, ChatTurn};
use crate::client::CompletionBackend;
use crate::messaging::MessageSender;

/// Reply shown for every failed completion request. The underlying cause
/// is logged, never displayed.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error.";

/// Controller state. `Submitting` holds exactly while a request is
/// outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    Submitting,
}

impl TurnState {
    /// True while a request is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

/// What happened to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The reply was appended.
    Completed,
    /// The request failed; the fallback reply was appended.
    Failed,
    /// Input was empty or whitespace-only; nothing changed.
    Ignored,
    /// A request is already outstanding; nothing changed.
    Busy,
}

/// Orchestrates chat turns against a completion backend.
///
/// The controller is the sole mutator of its [`ChatSession`]; views observe
/// changes via the message bus. All methods run on one serialized event
/// stream, so no locking is involved.
pub struct TurnController {
    session: ChatSession,
    state: TurnState,
    backend: Box<dyn CompletionBackend>,
    events: MessageSender,
}

impl TurnController {
    /// Create a controller with a fresh session.
    pub fn new(backend: Box<dyn CompletionBackend>, events: MessageSender) -> Self {
        Self {
            session: ChatSession::new(),
            state: TurnState::Idle,
            backend,
            events,
        }
    }

    /// Read-only view of the session state.
    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Current controller state.
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Mirror the input box contents into the session state.
    pub fn stage_input(&mut self, text: &str) {
        self.session.ui.pending_input = text.to_string();
    }

    /// Stage `raw_input` and submit it in one step.
    pub async fn submit_text(&mut self, raw_input: &str) -> SubmitOutcome {
        self.stage_input(raw_input);
        self.submit().await
    }

    /// Submit the staged input.
    ///
    /// Whitespace-only input is ignored and the staged text is left alone.
    /// A submission while a request is outstanding is rejected; the
    /// original widget only cleared the input without guarding resubmits,
    /// so this is a deliberate tightening.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let raw_input = self.session.ui.pending_input.clone();
        if raw_input.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }
        if self.session.ui.is_loading {
            return SubmitOutcome::Busy;
        }

        let user_turn = ChatTurn::user(raw_input.as_str());
        self.session.conversation.push(user_turn.clone());
        self.session.ui.pending_input.clear();
        self.session.ui.is_loading = true;
        self.state = TurnState::Submitting;
        self.events.turn(user_turn);
        self.events.thinking(true);

        // The untrimmed text goes to the backend; trimming is only an
        // emptiness check.
        let result = self.backend.complete(&raw_input).await;

        let (bot_turn, outcome) = match result {
            Ok(reply) => (ChatTurn::bot(reply), SubmitOutcome::Completed),
            Err(e) => {
                warn!("completion request failed: {}", e);
                (ChatTurn::bot(FALLBACK_REPLY), SubmitOutcome::Failed)
            }
        };

        self.session.conversation.push(bot_turn.clone());
        self.session.ui.is_loading = false;
        self.state = TurnState::Idle;
        self.events.thinking(false);
        self.events.turn(bot_turn);

        outcome
    }

    /// Start a new session: empty transcript, idle state.
    pub fn reset(&mut self) {
        self.session.reset();
        self.state = TurnState::Idle;
        let _ = self.events.send(crate::messaging::Message::Clear);
    }

    #[cfg(test)]
    fn force_loading(&mut self) {
        self.session.ui.is_loading = true;
        self.state = TurnState::Submitting;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::CompletionError;
    use crate::messaging::{Message, MessageBus};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Scripted backend: pops one reply per call, succeeding with "ok" once
    /// the script runs out.
    struct ScriptedBackend {
        script: Mutex<VecDeque<Result<String, ()>>>,
    }

    impl ScriptedBackend {
        fn new(script: Vec<Result<&str, ()>>) -> Self {
            Self {
                script: Mutex::new(
                    script
                        .into_iter()
                        .map(|r| r.map(str::to_string))
                        .collect(),
                ),
            }
        }

        fn ok(reply: &str) -> Self {
            Self::new(vec![Ok(reply)])
        }

        fn failing() -> Self {
            Self::new(vec![Err(())])
        }
    }

    #[async_trait]
    impl CompletionBackend for ScriptedBackend {
        async fn complete(&self, _user_text: &str) -> Result<String, CompletionError> {
            match self.script.lock().unwrap().pop_front() {
                Some(Ok(reply)) => Ok(reply.trim().to_string()),
                Some(Err(())) => Err(CompletionError::MissingContent),
                None => Ok("ok".to_string()),
            }
        }
    }

    fn controller_with(backend: ScriptedBackend) -> (TurnController, MessageBus) {
        let bus = MessageBus::new();
        let controller = TurnController::new(Box::new(backend), bus.sender());
        (controller, bus)
    }

    // =========================================================================
    // Input Constraint Tests
    // =========================================================================

    #[tokio::test]
    async fn test_empty_input_is_ignored() {
        let (mut controller, _bus) = controller_with(ScriptedBackend::ok("hello"));

        let outcome = controller.submit_text("").await;

        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert!(controller.session().conversation.is_empty());
        assert_eq!(controller.state(), TurnState::Idle);
    }

    #[tokio::test]
    async fn test_whitespace_input_leaves_state_unchanged() {
        let (mut controller, _bus) = controller_with(ScriptedBackend::ok("hello"));

        let outcome = controller.submit_text("   \t ").await;

        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert!(controller.session().conversation.is_empty());
        // The staged text is not consumed by an ignored submission.
        assert_eq!(controller.session().ui.pending_input, "   \t ");
    }

    #[tokio::test]
    async fn test_busy_rejects_without_touching_state() {
        let (mut controller, _bus) = controller_with(ScriptedBackend::ok("hello"));
        controller.force_loading();

        let outcome = controller.submit_text("hi").await;

        assert_eq!(outcome, SubmitOutcome::Busy);
        assert!(controller.session().conversation.is_empty());
        assert!(controller.session().ui.is_loading);
    }

    // =========================================================================
    // Lifecycle Tests
    // =========================================================================

    #[tokio::test]
    async fn test_submit_appends_user_then_bot_turn() {
        let (mut controller, _bus) = controller_with(ScriptedBackend::ok("hello"));

        let outcome = controller.submit_text("hi").await;

        assert_eq!(outcome, SubmitOutcome::Completed);
        let turns = controller.session().conversation.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].text, "hi");
        assert!(turns[0].is_user);
        assert_eq!(turns[1].text, "hello");
        assert!(!turns[1].is_user);
    }

    #[tokio::test]
    async fn test_submit_clears_pending_input() {
        let (mut controller, _bus) = controller_with(ScriptedBackend::ok("hello"));

        controller.submit_text("hi").await;

        assert!(controller.session().ui.pending_input.is_empty());
    }

    #[tokio::test]
    async fn test_loading_drops_after_append() {
        let (mut controller, _bus) = controller_with(ScriptedBackend::ok("hello"));

        controller.submit_text("hi").await;

        assert!(!controller.session().ui.is_loading);
        assert_eq!(controller.state(), TurnState::Idle);
    }

    #[tokio::test]
    async fn test_event_ordering() {
        let (mut controller, bus) = controller_with(ScriptedBackend::ok("hello"));
        let mut receiver = bus.subscribe();

        controller.submit_text("hi").await;

        assert!(matches!(
            receiver.try_recv().unwrap().unwrap(),
            Message::Turn(t) if t.is_user
        ));
        assert!(matches!(
            receiver.try_recv().unwrap().unwrap(),
            Message::Thinking(t) if t.active
        ));
        assert!(matches!(
            receiver.try_recv().unwrap().unwrap(),
            Message::Thinking(t) if !t.active
        ));
        assert!(matches!(
            receiver.try_recv().unwrap().unwrap(),
            Message::Turn(t) if !t.is_user
        ));
        assert!(receiver.try_recv().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_raw_text_reaches_backend_untrimmed() {
        struct CapturingBackend {
            seen: Arc<Mutex<Vec<String>>>,
        }

        #[async_trait]
        impl CompletionBackend for CapturingBackend {
            async fn complete(&self, user_text: &str) -> Result<String, CompletionError> {
                self.seen.lock().unwrap().push(user_text.to_string());
                Ok("ok".to_string())
            }
        }

        let seen = Arc::new(Mutex::new(Vec::new()));
        let bus = MessageBus::new();
        let mut controller = TurnController::new(
            Box::new(CapturingBackend { seen: seen.clone() }),
            bus.sender(),
        );

        controller.submit_text("  hi  ").await;

        assert_eq!(seen.lock().unwrap().as_slice(), ["  hi  "]);
        assert_eq!(controller.session().conversation.turns()[0].text, "  hi  ");
    }

    // =========================================================================
    // Failure Tests
    // =========================================================================

    #[tokio::test]
    async fn test_failure_appends_fallback_reply() {
        let (mut controller, _bus) = controller_with(ScriptedBackend::failing());

        let outcome = controller.submit_text("hi").await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        let turns = controller.session().conversation.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].text, FALLBACK_REPLY);
        assert!(!turns[1].is_user);
        assert!(!controller.session().ui.is_loading);
    }

    #[tokio::test]
    async fn test_failure_keeps_controller_usable() {
        let (mut controller, _bus) =
            controller_with(ScriptedBackend::new(vec![Err(()), Ok("back again")]));

        controller.submit_text("first").await;
        let outcome = controller.submit_text("second").await;

        assert_eq!(outcome, SubmitOutcome::Completed);
        assert_eq!(controller.session().conversation.len(), 4);
        assert_eq!(
            controller.session().conversation.last().unwrap().text,
            "back again"
        );
    }

    // =========================================================================
    // Sequence Tests
    // =========================================================================

    #[tokio::test]
    async fn test_n_submissions_yield_2n_turns_in_order() {
        let (mut controller, _bus) = controller_with(ScriptedBackend::new(vec![
            Ok("one"),
            Err(()),
            Ok("three"),
            Err(()),
        ]));

        for input in ["a", "b", "c", "d"] {
            controller.submit_text(input).await;
        }

        let turns = controller.session().conversation.turns();
        assert_eq!(turns.len(), 8);

        let texts: Vec<&str> = turns.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "a",
                "one",
                "b",
                FALLBACK_REPLY,
                "c",
                "three",
                "d",
                FALLBACK_REPLY,
            ]
        );
        for (i, turn) in turns.iter().enumerate() {
            assert_eq!(turn.is_user, i % 2 == 0, "turn {} role mismatch", i);
        }
    }

    // =========================================================================
    // Reset Tests
    // =========================================================================

    #[tokio::test]
    async fn test_reset_starts_fresh_session() {
        let (mut controller, bus) = controller_with(ScriptedBackend::ok("hello"));
        let mut receiver = bus.subscribe();

        controller.submit_text("hi").await;
        controller.reset();

        assert!(controller.session().conversation.is_empty());
        assert_eq!(controller.state(), TurnState::Idle);

        // Drain the turn lifecycle, then expect the clear event.
        let mut saw_clear = false;
        while let Ok(Some(msg)) = receiver.try_recv() {
            saw_clear = matches!(msg, Message::Clear);
        }
        assert!(saw_clear);
    }
}
