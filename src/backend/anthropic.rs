//! Anthropic Messages API backend.

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::types::{ContentPart, Role, StreamEvent};

use super::decode::StreamDecoder;
use super::http::{anthropic_headers, parse_sse_data, shared_client, status_to_error};
use super::{ModelBackend, TurnRequest};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicBackend {
    model: String,
    api_key: String,
    base_url: String,
}

impl AnthropicBackend {
    pub fn new(model: impl Into<String>, api_key: impl Into<String>, base_url: Option<String>) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.model.clone(),
            config.api_key.clone(),
            config.base_url.clone(),
        )
    }

    fn build_request_body(&self, request: &TurnRequest) -> serde_json::Value {
        let mut messages = Vec::new();

        for msg in &request.messages {
            let role = match msg.role {
                Role::User => "user",
                Role::Assistant => "assistant",
            };
            messages.push(serde_json::json!({
                "role": role,
                "content": build_content(&msg.content),
            }));
        }

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": request.max_tokens,
            "stream": true,
        });

        let obj = body.as_object_mut().unwrap();

        if !request.system.is_empty() {
            obj.insert("system".into(), request.system.clone().into());
        }
        if !request.tools.is_empty() {
            let tool_defs: Vec<serde_json::Value> = request
                .tools
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "name": t.name,
                        "description": t.description,
                        "input_schema": t.parameters,
                    })
                })
                .collect();
            obj.insert("tools".into(), tool_defs.into());
        }

        body
    }
}

fn build_content(parts: &[ContentPart]) -> serde_json::Value {
    if parts.len() == 1 {
        if let ContentPart::Text { ref text } = parts[0] {
            return serde_json::Value::String(text.clone());
        }
    }

    let content: Vec<serde_json::Value> = parts
        .iter()
        .map(|part| match part {
            ContentPart::Text { text } => serde_json::json!({
                "type": "text",
                "text": text,
            }),
            ContentPart::ToolUse(call) => serde_json::json!({
                "type": "tool_use",
                "id": call.id,
                "name": call.name,
                "input": call.arguments,
            }),
            ContentPart::ToolResult(result) => serde_json::json!({
                "type": "tool_result",
                "tool_use_id": result.call_id,
                "content": result.content,
            }),
        })
        .collect();

    serde_json::json!(content)
}

#[async_trait]
impl ModelBackend for AnthropicBackend {
    async fn stream_turn(
        &self,
        request: &TurnRequest,
    ) -> Result<BoxStream<'static, Result<StreamEvent, EngineError>>, EngineError> {
        let body = self.build_request_body(request);
        let url = format!("{}/messages", self.base_url);

        debug!(model = %self.model, messages = request.messages.len(), "anthropic stream_turn");

        let resp = shared_client()
            .post(&url)
            .headers(anthropic_headers(&self.api_key, API_VERSION))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let byte_stream = resp.bytes_stream();

        let stream = async_stream::stream! {
            let mut buffer = String::new();
            let mut decoder = StreamDecoder::new();
            futures::pin_mut!(byte_stream);

            while let Some(chunk_result) = byte_stream.next().await {
                let chunk = match chunk_result {
                    Ok(c) => c,
                    Err(e) => {
                        yield Err(EngineError::Network(e));
                        return;
                    }
                };

                buffer.push_str(&String::from_utf8_lossy(&chunk));

                while let Some(line_end) = buffer.find('\n') {
                    let line = buffer[..line_end].trim().to_string();
                    buffer = buffer[line_end + 1..].to_string();

                    if line.is_empty() || line.starts_with(':') {
                        continue;
                    }

                    if let Some(data) = parse_sse_data(&line) {
                        match decoder.decode_event(data) {
                            Ok(events) => {
                                for event in events {
                                    let done = event == StreamEvent::TurnEnd;
                                    yield Ok(event);
                                    if done {
                                        return;
                                    }
                                }
                            }
                            Err(e) => {
                                yield Err(e);
                                return;
                            }
                        }
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}
