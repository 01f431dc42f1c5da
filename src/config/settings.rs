//! Runtime settings: endpoint, model, credential, token cap.
//!
//! Everything arrives through CLI flags or environment variables; nothing
//! is read from disk. Defaults target a public OpenAI-compatible endpoint
//! that accepts unauthenticated requests.

/// Default endpoint base URL.
pub const DEFAULT_BASE_URL: &str = "https://llamatool.us.gaianet.network/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "llama";

/// Default per-reply token cap.
pub const DEFAULT_MAX_TOKENS: u32 = 150;

/// Resolved settings for one session.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Endpoint base URL, without a trailing slash.
    pub base_url: String,

    /// Model identifier sent with every request.
    pub model: String,

    /// Bearer credential; `None` when unset, in which case no
    /// Authorization header is sent.
    pub api_key: Option<String>,

    /// Per-reply token cap.
    pub max_tokens: u32,
}

impl Settings {
    /// Build settings from raw inputs, normalizing as we go: trailing
    /// slashes are stripped from the URL and a blank API key means no
    /// credential at all.
    pub fn new(base_url: &str, model: &str, api_key: &str, max_tokens: u32) -> Self {
        let api_key = api_key.trim();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: (!api_key.is_empty()).then(|| api_key.to_string()),
            max_tokens,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_MODEL, "", DEFAULT_MAX_TOKENS)
    }
}
