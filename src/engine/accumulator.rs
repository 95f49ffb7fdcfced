//! Reassembly of fragmented tool-call arguments.

use std::collections::HashMap;

use crate::types::ToolCall;

#[derive(Debug)]
struct PendingCall {
    name: String,
    buffer: String,
}

/// Buffers argument fragments per call id until the call's end event.
///
/// Finalization never fails: a buffer that does not parse as a JSON object
/// (truncated stream, stray text, or a non-object value) becomes the empty
/// object, so a malformed argument stream cannot abort the conversation.
#[derive(Debug, Default)]
pub struct ToolCallAccumulator {
    pending: HashMap<String, PendingCall>,
}

impl ToolCallAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a call. A duplicate id restarts its buffer.
    pub fn start(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.pending.insert(
            id.into(),
            PendingCall {
                name: name.into(),
                buffer: String::new(),
            },
        );
    }

    /// Append an argument fragment. Fragments for unknown ids are dropped.
    pub fn push_fragment(&mut self, id: &str, fragment: &str) {
        if let Some(call) = self.pending.get_mut(id) {
            call.buffer.push_str(fragment);
        }
    }

    /// Close a call and materialize its arguments. Returns `None` when the
    /// id was never opened.
    pub fn finish(&mut self, id: &str) -> Option<ToolCall> {
        let call = self.pending.remove(id)?;
        Some(ToolCall {
            id: id.to_string(),
            name: call.name,
            arguments: parse_arguments(&call.buffer),
        })
    }

    /// Ids still open (start seen, end not yet).
    pub fn open_calls(&self) -> usize {
        self.pending.len()
    }
}

fn parse_arguments(buffer: &str) -> serde_json::Value {
    if buffer.trim().is_empty() {
        return serde_json::json!({});
    }
    match serde_json::from_str::<serde_json::Value>(buffer) {
        Ok(value @ serde_json::Value::Object(_)) => value,
        _ => serde_json::json!({}),
    }
}
