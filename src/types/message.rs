//! Transcript types for model communication.

use serde::{Deserialize, Serialize};

/// A message as supplied by the caller: plain text with a role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
        }
    }
}

/// Conversation role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A message in the working transcript sent to the model backend.
///
/// Unlike [`ChatMessage`], content is a block list so continuation turns can
/// carry tool-use and tool-result blocks in the backend wire shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelMessage {
    pub role: Role,
    pub content: Vec<ContentPart>,
}

impl ModelMessage {
    /// Create a user message with plain text content.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentPart::Text { text: text.into() }],
        }
    }

    /// Create an assistant message with plain text content.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: vec![ContentPart::Text { text: text.into() }],
        }
    }

    /// Create the assistant turn that carries a streamed turn's blocks:
    /// accumulated text (if any) followed by the tool-use blocks as sent.
    pub fn assistant_turn(text: String, calls: &[ToolCall]) -> Self {
        let mut content = Vec::with_capacity(calls.len() + 1);
        if !text.is_empty() {
            content.push(ContentPart::Text { text });
        }
        for call in calls {
            content.push(ContentPart::ToolUse(call.clone()));
        }
        Self {
            role: Role::Assistant,
            content,
        }
    }

    /// Create the user turn that feeds tool results back to the model.
    pub fn tool_results(results: Vec<ToolResult>) -> Self {
        Self {
            role: Role::User,
            content: results.into_iter().map(ContentPart::ToolResult).collect(),
        }
    }

    /// Extract the text content, concatenating all text parts.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }

    /// Extract tool-use blocks from this message.
    pub fn tool_calls(&self) -> Vec<&ToolCall> {
        self.content
            .iter()
            .filter_map(|part| match part {
                ContentPart::ToolUse(call) => Some(call),
                _ => None,
            })
            .collect()
    }
}

impl From<&ChatMessage> for ModelMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role,
            content: vec![ContentPart::Text {
                text: msg.content.clone(),
            }],
        }
    }
}

/// A single part of transcript message content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ToolUse(ToolCall),
    ToolResult(ToolResult),
}

/// A finalized tool call emitted by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

/// The textual outcome of executing one tool call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    pub call_id: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assistant_turn_orders_text_before_calls() {
        let calls = vec![ToolCall {
            id: "toolu_1".into(),
            name: "get_available_slots".into(),
            arguments: json!({}),
        }];
        let msg = ModelMessage::assistant_turn("Let me check.".into(), &calls);
        assert_eq!(msg.role, Role::Assistant);
        assert!(matches!(msg.content[0], ContentPart::Text { .. }));
        assert!(matches!(msg.content[1], ContentPart::ToolUse(_)));
        assert_eq!(msg.tool_calls().len(), 1);
    }

    #[test]
    fn assistant_turn_omits_empty_text() {
        let calls = vec![ToolCall {
            id: "toolu_1".into(),
            name: "book_demo".into(),
            arguments: json!({}),
        }];
        let msg = ModelMessage::assistant_turn(String::new(), &calls);
        assert_eq!(msg.content.len(), 1);
    }

    #[test]
    fn text_concatenates_parts() {
        let msg = ModelMessage {
            role: Role::Assistant,
            content: vec![
                ContentPart::Text { text: "a".into() },
                ContentPart::ToolUse(ToolCall {
                    id: "t".into(),
                    name: "n".into(),
                    arguments: json!({}),
                }),
                ContentPart::Text { text: "b".into() },
            ],
        };
        assert_eq!(msg.text(), "ab");
    }

    #[test]
    fn chat_message_roles_serialize_lowercase() {
        let json = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert_eq!(json["role"], "user");
    }
}
