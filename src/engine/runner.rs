//! The controlling conversation loop.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::time;
use tracing::debug;
use uuid::Uuid;

use crate::backend::{ModelBackend, ToolDefinition, TurnRequest};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::prompt;
use crate::tools::ToolRegistry;
use crate::types::{ModelMessage, OutboundEvent, StreamEvent, ToolCall};

use super::accumulator::ToolCallAccumulator;
use super::coordinator::ToolExecutionCoordinator;
use super::publisher::OutputPublisher;
use super::session::{ChatRequest, SessionState};

/// Drives one request through the submit → stream → execute-tools cycle.
///
/// States: Submitting → Streaming → {ExecutingTools → Submitting} |
/// Terminating. The continuation pass after tool execution re-enters the
/// same loop body, so the turn bound applies uniformly to every cycle.
pub struct ConversationLoop {
    backend: Arc<dyn ModelBackend>,
    registry: ToolRegistry,
    config: EngineConfig,
}

/// What one streamed model turn produced.
struct TurnOutput {
    text: String,
    calls: Vec<ToolCall>,
}

impl ConversationLoop {
    pub fn new(backend: Arc<dyn ModelBackend>, registry: ToolRegistry, config: EngineConfig) -> Self {
        Self {
            backend,
            registry,
            config,
        }
    }

    /// Run the request to completion. Exactly one terminal event is
    /// published: `done` on success, `error` on any fatal failure. The
    /// error is also returned so the transport can log it.
    pub async fn run(&self, request: ChatRequest, publisher: &OutputPublisher) -> Result<()> {
        let request_id = Uuid::new_v4();
        debug!(%request_id, messages = request.messages.len(), "conversation start");
        match self.drive(request, publisher).await {
            Ok(()) => {
                publisher.publish(&OutboundEvent::Done);
                debug!(%request_id, "conversation complete");
                Ok(())
            }
            Err(e) => {
                publisher.publish(&OutboundEvent::error(e.to_string()));
                debug!(%request_id, error = %e, "conversation failed");
                Err(e)
            }
        }
    }

    async fn drive(&self, request: ChatRequest, publisher: &OutputPublisher) -> Result<()> {
        request.validate()?;

        let mut session = SessionState::from_request(&request, &self.config.default_timezone);
        let mut transcript: Vec<ModelMessage> =
            request.messages.iter().map(ModelMessage::from).collect();
        let system = prompt::system_prompt(&session);
        let tools = self.registry.definitions();
        let coordinator = ToolExecutionCoordinator::new(
            &self.registry,
            publisher,
            Duration::from_millis(self.config.tool_timeout_ms),
        );

        let mut tool_turns = 0u32;
        loop {
            let turn = self
                .stream_turn(&system, &transcript, &tools, publisher)
                .await?;

            debug!(
                tool_turns,
                calls = turn.calls.len(),
                text_len = turn.text.len(),
                "model turn complete"
            );

            if turn.calls.is_empty() {
                return Ok(());
            }

            if tool_turns >= self.config.max_tool_turns {
                return Err(EngineError::TurnLimit(self.config.max_tool_turns));
            }
            tool_turns += 1;

            let results = coordinator.execute_turn(&turn.calls, &mut session).await;
            debug_assert_eq!(results.len(), turn.calls.len());

            transcript.push(ModelMessage::assistant_turn(turn.text, &turn.calls));
            transcript.push(ModelMessage::tool_results(results));
        }
    }

    /// Stream one model turn: forward text and tool starts to the client as
    /// they arrive, feed argument fragments to the accumulator, and finalize
    /// calls in the order their blocks were opened.
    async fn stream_turn(
        &self,
        system: &str,
        transcript: &[ModelMessage],
        tools: &[ToolDefinition],
        publisher: &OutputPublisher,
    ) -> Result<TurnOutput> {
        let request = TurnRequest {
            system: system.to_string(),
            messages: transcript.to_vec(),
            tools: tools.to_vec(),
            max_tokens: self.config.max_tokens,
        };
        let mut stream = self.backend.stream_turn(&request).await?;

        let mut text = String::new();
        let mut accumulator = ToolCallAccumulator::new();
        let mut calls: Vec<ToolCall> = Vec::new();
        let idle_ms = self.config.stream_idle_timeout_ms;
        let mut idle_sleep =
            (idle_ms > 0).then(|| Box::pin(time::sleep(Duration::from_millis(idle_ms))));

        loop {
            tokio::select! {
                _ = idle_sleep.as_mut().unwrap(), if idle_sleep.is_some() => {
                    return Err(EngineError::Timeout(idle_ms));
                }
                event = stream.next() => {
                    let Some(event) = event else {
                        return Err(EngineError::Stream(
                            "stream ended before turn completion".into(),
                        ));
                    };
                    let event = event?;
                    if let Some(ref mut sleep) = idle_sleep {
                        sleep
                            .as_mut()
                            .reset(time::Instant::now() + Duration::from_millis(idle_ms));
                    }
                    match event {
                        StreamEvent::TextDelta { text: delta } => {
                            if !delta.is_empty() {
                                text.push_str(&delta);
                                publisher.publish(&OutboundEvent::TextDelta { content: delta });
                            }
                        }
                        StreamEvent::ToolUseStart { id, name } => {
                            accumulator.start(&id, &name);
                            publisher.publish(&OutboundEvent::ToolUseStart { name });
                        }
                        StreamEvent::ToolInputDelta { id, partial_json } => {
                            accumulator.push_fragment(&id, &partial_json);
                        }
                        StreamEvent::ToolUseEnd { id } => {
                            if let Some(call) = accumulator.finish(&id) {
                                calls.push(call);
                            }
                        }
                        StreamEvent::TurnEnd => {
                            return Ok(TurnOutput { text, calls });
                        }
                    }
                }
            }
        }
    }
}
