//! Client-facing events pushed over the server-sent event stream.

use serde::{Deserialize, Serialize};

use super::lead::LeadField;
use super::scheduling::{BookingConfirmation, TimeSlot};

/// An event written to the connected client.
///
/// Serialized with a discriminating `type` field; on the wire each event is
/// one UTF-8 record of the form `data: <json>\n\n`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundEvent {
    TextDelta {
        content: String,
    },
    ToolUseStart {
        name: String,
    },
    AvailableSlots {
        slots: Vec<TimeSlot>,
    },
    LeadFormRequest {
        fields: Vec<LeadField>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<String>,
    },
    BookingConfirmed {
        booking: BookingConfirmation,
    },
    Error {
        message: String,
    },
    Done,
}

impl OutboundEvent {
    /// Encode as a server-sent event frame.
    pub fn to_sse_frame(&self) -> String {
        // Serialization of these variants cannot fail; fall back to a bare
        // error frame if it ever does.
        let json = serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"type":"error","message":"encode failure"}"#.to_string());
        format!("data: {json}\n\n")
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}
