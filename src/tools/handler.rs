//! The tool handler capability trait.

use async_trait::async_trait;

use crate::engine::session::SessionState;
use crate::error::Result;
use crate::types::OutboundEvent;

use super::schema::ToolParameters;
use super::validation;

/// What one handler invocation produced: an optional structured push for the
/// client, and the natural-language result fed back to the model.
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    pub push: Option<OutboundEvent>,
    pub reply: String,
}

impl ToolOutcome {
    /// A model-facing reply with no client push.
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            push: None,
            reply: text.into(),
        }
    }

    /// A model-facing reply paired with a client push event.
    pub fn with_push(text: impl Into<String>, push: OutboundEvent) -> Self {
        Self {
            push: Some(push),
            reply: text.into(),
        }
    }
}

/// One named capability the model can invoke.
///
/// Handlers are looked up by [`name`](ToolHandler::name) and invoked
/// sequentially by the coordinator. `missing_inputs` runs first and blocks
/// `execute` when it reports anything, so `execute` can assume its required
/// inputs are present (possibly satisfied from session state rather than the
/// call's own arguments).
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Tool name (part of the wire contract with the model backend).
    fn name(&self) -> &str;

    /// Human-readable description sent to the model.
    fn description(&self) -> &str;

    /// JSON Schema parameters.
    fn parameters(&self) -> &ToolParameters;

    /// Required inputs still missing after considering both the call's
    /// arguments and the session's known state. The default checks the
    /// schema's `required` list against the arguments alone.
    fn missing_inputs(&self, args: &serde_json::Value, _session: &SessionState) -> Vec<String> {
        validation::missing_required(args, &self.parameters().schema)
    }

    /// Run the side effect and report the outcome.
    async fn execute(
        &self,
        args: &serde_json::Value,
        session: &mut SessionState,
    ) -> Result<ToolOutcome>;
}
