//! Normalized streaming events produced by the stream decoder.

use serde::{Deserialize, Serialize};

/// One normalized event decoded from the model's incremental feed.
///
/// Tool-call blocks are keyed by the backend-assigned call id: each is opened
/// by `ToolUseStart`, fed argument text by `ToolInputDelta`, and closed by
/// `ToolUseEnd`. `TurnEnd` is emitted exactly once per model turn, after any
/// still-open block has been closed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    TextDelta { text: String },
    ToolUseStart { id: String, name: String },
    ToolInputDelta { id: String, partial_json: String },
    ToolUseEnd { id: String },
    TurnEnd,
}
