//! The `collect_lead_info` tool: asks the client UI to render a form.

use async_trait::async_trait;

use crate::engine::session::SessionState;
use crate::error::Result;
use crate::types::{LeadField, OutboundEvent};

use super::handler::{ToolHandler, ToolOutcome};
use super::schema::ToolParameters;

/// Pushes a `lead_form_request` to the client for the fields the model still
/// needs. The form submission arrives as part of the *next* request's
/// `leadInfo`, so this handler performs no side effect of its own.
pub struct CollectLeadInfoTool {
    parameters: ToolParameters,
}

impl Default for CollectLeadInfoTool {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectLeadInfoTool {
    pub fn new() -> Self {
        Self {
            parameters: ToolParameters::object()
                .string_array(
                    "fields_needed",
                    "Lead fields to collect: name, email, company, phone, company_size, interests, budget_range",
                    true,
                )
                .string(
                    "context",
                    "Short sentence shown above the form explaining why the details are needed",
                    false,
                )
                .build(),
        }
    }
}

#[async_trait]
impl ToolHandler for CollectLeadInfoTool {
    fn name(&self) -> &str {
        "collect_lead_info"
    }

    fn description(&self) -> &str {
        "Show the user a short form collecting contact details needed to book a demo. \
         Use before book_demo whenever name, email, or company are unknown."
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    async fn execute(
        &self,
        args: &serde_json::Value,
        _session: &mut SessionState,
    ) -> Result<ToolOutcome> {
        let requested: Vec<&str> = args
            .get("fields_needed")
            .and_then(|v| v.as_array())
            .map(|names| names.iter().filter_map(|n| n.as_str()).collect())
            .unwrap_or_default();

        let fields: Vec<LeadField> = requested
            .iter()
            .filter_map(|name| LeadField::for_name(name))
            .collect();

        if fields.is_empty() {
            return Ok(ToolOutcome::reply(
                "No recognizable fields were requested, so no form was shown. \
                 Known fields: name, email, company, phone, company_size, interests, budget_range.",
            ));
        }

        let context = args
            .get("context")
            .and_then(|c| c.as_str())
            .filter(|c| !c.trim().is_empty())
            .map(str::to_string);

        let shown: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        let reply = format!(
            "A form asking for {} is now displayed. Wait for the user to submit it; \
             the details will appear in the next message.",
            shown.join(", ")
        );

        Ok(ToolOutcome::with_push(
            reply,
            OutboundEvent::LeadFormRequest { fields, context },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session() -> SessionState {
        SessionState::empty("America/New_York")
    }

    #[tokio::test]
    async fn pushes_form_for_known_fields() {
        let tool = CollectLeadInfoTool::new();
        let outcome = tool
            .execute(
                &json!({"fields_needed": ["name", "email", "fax"], "context": "To book your demo"}),
                &mut session(),
            )
            .await
            .unwrap();

        let Some(OutboundEvent::LeadFormRequest { fields, context }) = outcome.push else {
            panic!("expected a lead_form_request push");
        };
        assert_eq!(fields.len(), 2, "unknown fields are dropped");
        assert_eq!(context.as_deref(), Some("To book your demo"));
        assert!(outcome.reply.contains("name, email"));
    }

    #[tokio::test]
    async fn no_push_when_nothing_recognizable() {
        let tool = CollectLeadInfoTool::new();
        let outcome = tool
            .execute(&json!({"fields_needed": ["fax"]}), &mut session())
            .await
            .unwrap();
        assert!(outcome.push.is_none());
    }

    #[test]
    fn fields_needed_is_required() {
        let tool = CollectLeadInfoTool::new();
        let missing = tool.missing_inputs(&json!({}), &session());
        assert_eq!(missing, vec!["fields_needed"]);
    }
}
