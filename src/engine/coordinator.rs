//! Sequential execution of a turn's finalized tool calls.

use std::time::Duration;

use tracing::{debug, warn};

use crate::tools::ToolRegistry;
use crate::types::{OutboundEvent, ToolCall, ToolResult};
use crate::util::with_timeout;

use super::publisher::OutputPublisher;
use super::session::SessionState;

/// Executes one turn's tool calls in emission order, producing exactly one
/// [`ToolResult`] per call; the continuation protocol with the model
/// depends on that pairing.
///
/// Calls run sequentially, never concurrently: a later call in the same turn
/// may depend on state an earlier call produced. Handlers run to completion
/// regardless of client connection state; liveness only gates the publisher.
pub struct ToolExecutionCoordinator<'a> {
    registry: &'a ToolRegistry,
    publisher: &'a OutputPublisher,
    tool_timeout: Duration,
}

impl<'a> ToolExecutionCoordinator<'a> {
    pub fn new(
        registry: &'a ToolRegistry,
        publisher: &'a OutputPublisher,
        tool_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            publisher,
            tool_timeout,
        }
    }

    pub async fn execute_turn(
        &self,
        calls: &[ToolCall],
        session: &mut SessionState,
    ) -> Vec<ToolResult> {
        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            let content = self.execute_call(call, session).await;
            results.push(ToolResult {
                call_id: call.id.clone(),
                content,
            });
        }
        results
    }

    async fn execute_call(&self, call: &ToolCall, session: &mut SessionState) -> String {
        let Some(handler) = self.registry.get(&call.name) else {
            warn!(tool = %call.name, "model called an unknown tool");
            return format!(
                "Unknown tool '{}'. Only the registered tools are available.",
                call.name
            );
        };

        let missing = handler.missing_inputs(&call.arguments, session);
        if !missing.is_empty() {
            debug!(tool = %call.name, ?missing, "tool preconditions unmet");
            return format!(
                "Cannot run {} yet, missing required information: {}. \
                 Gather it from the user (collect_lead_info can help) and try again.",
                call.name,
                missing.join(", ")
            );
        }

        debug!(tool = %call.name, call_id = %call.id, "executing tool");
        match with_timeout(self.tool_timeout, handler.execute(&call.arguments, session)).await {
            Ok(outcome) => {
                if let Some(push) = &outcome.push {
                    self.publisher.publish(push);
                }
                outcome.reply
            }
            Err(e) => {
                warn!(tool = %call.name, error = %e, "tool execution failed");
                self.publisher
                    .publish(&OutboundEvent::error(format!("The {} action failed", call.name)));
                format!(
                    "The {} call failed ({e}). Apologize briefly and offer an alternative; \
                     do not pretend it succeeded.",
                    call.name
                )
            }
        }
    }
}
