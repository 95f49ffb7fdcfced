//! Error types for the conversation engine.

use thiserror::Error;

/// Primary error type for all engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Tool execution error: {tool_name} — {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("Tool loop exceeded {0} turns")]
    TurnLimit(u32),
}

impl EngineError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a tool execution error.
    pub fn tool(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolExecution {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }

    /// Whether this error ends the request. Tool failures are absorbed by the
    /// coordinator and turned into model-visible text; everything else is
    /// transport-class and terminates the stream.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::ToolExecution { .. })
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_tool_name() {
        let err = EngineError::tool("book_demo", "calendar unreachable");
        let msg = err.to_string();
        assert!(msg.contains("book_demo"));
        assert!(msg.contains("calendar unreachable"));
    }

    #[test]
    fn tool_errors_are_not_fatal() {
        assert!(!EngineError::tool("x", "y").is_fatal());
        assert!(EngineError::Stream("broken".into()).is_fatal());
        assert!(EngineError::TurnLimit(10).is_fatal());
    }
}
