//! Decoder for the Anthropic Messages streaming protocol.
//!
//! Turns the raw `data:` payloads of the backend's event stream into
//! normalized [`StreamEvent`]s. Content blocks are keyed by index; a
//! `message_stop` closes any block the backend left open before the turn-end
//! event is exposed, so downstream consumers always see a balanced
//! start/end pair per tool call.

use std::collections::BTreeMap;

use crate::error::{EngineError, Result};
use crate::types::StreamEvent;

#[derive(Debug, Clone)]
enum Block {
    Text,
    ToolUse { id: String },
    /// Block kinds this engine does not consume (e.g. thinking).
    Other,
}

/// Stateful decoder for one model turn.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    open_blocks: BTreeMap<u64, Block>,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one SSE `data:` payload into zero or more events.
    ///
    /// A payload that is not valid JSON, or an explicit `error` event, is a
    /// framing-level failure and fatal to the request. Unknown event kinds
    /// (`ping`, `message_start`, ...) decode to nothing.
    pub fn decode_event(&mut self, data: &str) -> Result<Vec<StreamEvent>> {
        let event: serde_json::Value = serde_json::from_str(data)
            .map_err(|_| EngineError::Stream("malformed stream event".into()))?;
        let event_type = event.get("type").and_then(|t| t.as_str()).unwrap_or("");

        let mut out = Vec::new();
        match event_type {
            "content_block_start" => {
                let index = block_index(&event);
                if let Some(block) = event.get("content_block") {
                    let kind = block.get("type").and_then(|t| t.as_str()).unwrap_or("");
                    match kind {
                        "text" => {
                            self.open_blocks.insert(index, Block::Text);
                        }
                        "tool_use" => {
                            let id = str_field(block, "id");
                            let name = str_field(block, "name");
                            self.open_blocks
                                .insert(index, Block::ToolUse { id: id.clone() });
                            out.push(StreamEvent::ToolUseStart { id, name });
                        }
                        _ => {
                            self.open_blocks.insert(index, Block::Other);
                        }
                    }
                }
            }
            "content_block_delta" => {
                let index = block_index(&event);
                if let Some(delta) = event.get("delta") {
                    let kind = delta.get("type").and_then(|t| t.as_str()).unwrap_or("");
                    match kind {
                        "text_delta" => {
                            if let Some(text) = delta.get("text").and_then(|t| t.as_str()) {
                                out.push(StreamEvent::TextDelta {
                                    text: text.to_string(),
                                });
                            }
                        }
                        "input_json_delta" => {
                            if let Some(Block::ToolUse { id }) = self.open_blocks.get(&index) {
                                if let Some(partial) =
                                    delta.get("partial_json").and_then(|t| t.as_str())
                                {
                                    out.push(StreamEvent::ToolInputDelta {
                                        id: id.clone(),
                                        partial_json: partial.to_string(),
                                    });
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
            "content_block_stop" => {
                let index = block_index(&event);
                if let Some(Block::ToolUse { id }) = self.open_blocks.remove(&index) {
                    out.push(StreamEvent::ToolUseEnd { id });
                }
            }
            "message_stop" => {
                // Close anything the backend left open, lowest index first.
                for (_, block) in std::mem::take(&mut self.open_blocks) {
                    if let Block::ToolUse { id } = block {
                        out.push(StreamEvent::ToolUseEnd { id });
                    }
                }
                out.push(StreamEvent::TurnEnd);
            }
            "error" => {
                let message = event
                    .pointer("/error/message")
                    .and_then(|m| m.as_str())
                    .unwrap_or("backend reported a stream error");
                return Err(EngineError::Stream(message.to_string()));
            }
            _ => {}
        }

        Ok(out)
    }
}

fn block_index(event: &serde_json::Value) -> u64 {
    event.get("index").and_then(|i| i.as_u64()).unwrap_or(0)
}

fn str_field(value: &serde_json::Value, key: &str) -> String {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}
