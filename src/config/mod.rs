//! Engine configuration (code > env > `.env` file).

use crate::error::{EngineError, Result};

const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Configuration for a [`ConversationLoop`](crate::engine::ConversationLoop).
///
/// Loaded from the environment via [`EngineConfig::from_env`] or built in
/// code with the setter methods.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Anthropic API key.
    pub api_key: String,
    /// Model identifier sent to the backend.
    pub model: String,
    /// Override for the backend base URL.
    pub base_url: Option<String>,
    /// Output token budget per model turn.
    pub max_tokens: u32,
    /// Maximum number of tool-executing cycles per request.
    pub max_tool_turns: u32,
    /// Abort the model stream if no chunk arrives within this window.
    pub stream_idle_timeout_ms: u64,
    /// Per-handler execution timeout.
    pub tool_timeout_ms: u64,
    /// Timezone applied when the request does not carry one.
    pub default_timezone: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            max_tokens: 2048,
            max_tool_turns: 10,
            stream_idle_timeout_ms: 120_000,
            tool_timeout_ms: 30_000,
            default_timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl EngineConfig {
    /// Load from environment variables, reading `.env` if present.
    ///
    /// Recognized variables: `ANTHROPIC_API_KEY`, `HUDDLE_MODEL`,
    /// `HUDDLE_BASE_URL`, `HUDDLE_MAX_TOOL_TURNS`,
    /// `HUDDLE_STREAM_IDLE_TIMEOUT_MS`, `HUDDLE_TOOL_TIMEOUT_MS`,
    /// `HUDDLE_TIMEZONE`.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| EngineError::Configuration("Missing ANTHROPIC_API_KEY".into()))?;

        let mut config = Self {
            api_key,
            ..Self::default()
        };

        if let Ok(model) = std::env::var("HUDDLE_MODEL") {
            config.model = model;
        }
        if let Ok(url) = std::env::var("HUDDLE_BASE_URL") {
            config.base_url = Some(url);
        }
        if let Ok(tz) = std::env::var("HUDDLE_TIMEZONE") {
            config.default_timezone = tz;
        }
        if let Some(turns) = parse_env("HUDDLE_MAX_TOOL_TURNS")? {
            config.max_tool_turns = turns;
        }
        if let Some(ms) = parse_env("HUDDLE_STREAM_IDLE_TIMEOUT_MS")? {
            config.stream_idle_timeout_ms = ms;
        }
        if let Some(ms) = parse_env("HUDDLE_TOOL_TIMEOUT_MS")? {
            config.tool_timeout_ms = ms;
        }

        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_max_tool_turns(mut self, turns: u32) -> Self {
        self.max_tool_turns = turns;
        self
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| EngineError::Configuration(format!("{name} is not a valid number"))),
        Err(_) => Ok(None),
    }
}
