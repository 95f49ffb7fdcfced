//! Model backend trait and the Anthropic implementation.

pub mod anthropic;
pub mod decode;
pub mod http;

pub use anthropic::AnthropicBackend;
pub use decode::StreamDecoder;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::EngineError;
use crate::types::{ModelMessage, StreamEvent};

/// One model turn submitted to the backend.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    pub system: String,
    pub messages: Vec<ModelMessage>,
    pub tools: Vec<ToolDefinition>,
    pub max_tokens: u32,
}

/// Tool definition sent to the backend API.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// A generative-text backend capable of streaming a turn.
///
/// The returned stream yields normalized [`StreamEvent`]s in wire order and
/// ends after `TurnEnd` (or after the first error, which is fatal to the
/// request).
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn stream_turn(
        &self,
        request: &TurnRequest,
    ) -> Result<BoxStream<'static, Result<StreamEvent, EngineError>>, EngineError>;
}
