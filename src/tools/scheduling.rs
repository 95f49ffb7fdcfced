//! Calendar-backed tools: `get_available_slots` and `book_demo`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::warn;

use crate::engine::session::SessionState;
use crate::error::Result;
use crate::services::{CalendarService, Notifier};
use crate::types::{BookingRequest, LeadInfo, OutboundEvent, SlotQuery, TimePreference};

use super::handler::{ToolHandler, ToolOutcome};
use super::schema::ToolParameters;

/// Looks up open demo slots and pushes them to the client as a pickable list.
pub struct AvailableSlotsTool {
    calendar: Arc<dyn CalendarService>,
    parameters: ToolParameters,
}

impl AvailableSlotsTool {
    pub fn new(calendar: Arc<dyn CalendarService>) -> Self {
        Self {
            calendar,
            parameters: ToolParameters::object()
                .string(
                    "preferred_date",
                    "Preferred day in YYYY-MM-DD format, if the user named one",
                    false,
                )
                .string_enum(
                    "time_preference",
                    "Part of day the user prefers",
                    &["morning", "afternoon", "any"],
                    false,
                )
                .build(),
        }
    }
}

#[async_trait]
impl ToolHandler for AvailableSlotsTool {
    fn name(&self) -> &str {
        "get_available_slots"
    }

    fn description(&self) -> &str {
        "Look up open demo slots on the team calendar. Call before proposing any \
         meeting time; never invent times."
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    async fn execute(
        &self,
        args: &serde_json::Value,
        session: &mut SessionState,
    ) -> Result<ToolOutcome> {
        // A malformed date is treated as no preference, matching the
        // availability-over-strictness policy of argument handling.
        let preferred_date = args
            .get("preferred_date")
            .and_then(|v| v.as_str())
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());
        let time_preference = args
            .get("time_preference")
            .and_then(|v| v.as_str())
            .map(TimePreference::parse)
            .unwrap_or_default();

        let query = SlotQuery {
            preferred_date,
            time_preference,
            timezone: session.timezone.clone(),
        };
        let slots = self.calendar.available_slots(&query).await?;

        let reply = if slots.is_empty() {
            "No open slots match that preference. Suggest trying another day or time of day."
                .to_string()
        } else {
            let listing = slots
                .iter()
                .map(|s| format!("{} at {} (id: {})", s.display_date, s.display_time, s.id))
                .collect::<Vec<_>>()
                .join("; ");
            format!(
                "Found {} open slots, already shown to the user as a pickable list: {}. \
                 Reference them by display time, not by id.",
                slots.len(),
                listing
            )
        };

        Ok(ToolOutcome::with_push(
            reply,
            OutboundEvent::AvailableSlots { slots },
        ))
    }
}

/// Books the demo: validates the merged lead, calls the calendar, records the
/// confirmation in the session, and notifies best-effort.
pub struct BookDemoTool {
    calendar: Arc<dyn CalendarService>,
    notifier: Arc<dyn Notifier>,
    parameters: ToolParameters,
}

impl BookDemoTool {
    pub fn new(calendar: Arc<dyn CalendarService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            calendar,
            notifier,
            parameters: ToolParameters::object()
                .string("slot_id", "Id of the slot the user picked", true)
                .object_property(
                    "lead_info",
                    "Contact details for the booking",
                    serde_json::json!({
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "email": { "type": "string" },
                            "company": { "type": "string" },
                            "phone": { "type": "string" },
                            "company_size": { "type": "string" },
                            "interests": { "type": "array", "items": { "type": "string" } },
                            "budget_range": { "type": "string" },
                        },
                        "required": ["name", "email", "company"],
                    }),
                    true,
                )
                .string("meeting_notes", "What the prospect wants to see in the demo", false)
                .build(),
        }
    }

    /// Slot id from the call, falling back to the one the client picked in
    /// the UI (same precedence rule the lead fields use).
    fn effective_slot_id(args: &serde_json::Value, session: &SessionState) -> Option<String> {
        args.get("slot_id")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| session.selected_slot_id.clone())
    }

    fn merged_lead(args: &serde_json::Value, session: &SessionState) -> LeadInfo {
        let call_lead = args
            .get("lead_info")
            .map(LeadInfo::from_args)
            .unwrap_or_default();
        LeadInfo::merged(&call_lead, &session.lead)
    }
}

#[async_trait]
impl ToolHandler for BookDemoTool {
    fn name(&self) -> &str {
        "book_demo"
    }

    fn description(&self) -> &str {
        "Book the demo meeting once a slot is chosen and name, email, and company are \
         known. Books a real calendar event; call exactly once per confirmed booking."
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    /// Required inputs are checked against the call's arguments merged with
    /// session state: a slot picked in the UI satisfies `slot_id`, and lead
    /// fields supplied in an earlier request satisfy `lead_info`.
    fn missing_inputs(&self, args: &serde_json::Value, session: &SessionState) -> Vec<String> {
        let mut missing = Vec::new();
        if Self::effective_slot_id(args, session).is_none() {
            missing.push("slot_id".to_string());
        }
        for field in Self::merged_lead(args, session).missing_required() {
            missing.push(field.to_string());
        }
        missing
    }

    async fn execute(
        &self,
        args: &serde_json::Value,
        session: &mut SessionState,
    ) -> Result<ToolOutcome> {
        let lead = Self::merged_lead(args, session);
        session.lead = lead.clone();

        // Re-issuing book_demo after a success within the same request must
        // not create a second calendar event.
        if let Some(existing) = session.booking.as_ref().filter(|b| b.success) {
            let when = existing
                .start_time
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "the confirmed time".to_string());
            return Ok(ToolOutcome::reply(format!(
                "A demo is already booked for {when} in this conversation. \
                 Tell the user it is confirmed instead of booking again."
            )));
        }

        let slot_id =
            Self::effective_slot_id(args, session).unwrap_or_default();
        let meeting_notes = args
            .get("meeting_notes")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        let request = BookingRequest {
            slot_id,
            lead: lead.clone(),
            meeting_notes,
            timezone: session.timezone.clone(),
        };
        let confirmation = self.calendar.book(&request).await?;
        session.booking = Some(confirmation.clone());

        if confirmation.success {
            if let Err(e) = self.notifier.booking_confirmed(&lead, &confirmation).await {
                warn!(error = %e, "booking notification failed");
            }
        }

        let reply = if confirmation.success {
            let when = confirmation
                .start_time
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "the selected time".to_string());
            let link = confirmation
                .meet_link
                .as_deref()
                .map(|l| format!(" Meeting link: {l}."))
                .unwrap_or_default();
            format!("Demo booked for {when}.{link} Confirm the details to the user.")
        } else {
            format!(
                "Booking failed: {}. Apologize and offer to pick a different slot.",
                confirmation
                    .error
                    .as_deref()
                    .unwrap_or("the calendar rejected the request")
            )
        };

        Ok(ToolOutcome::with_push(
            reply,
            OutboundEvent::BookingConfirmed {
                booking: confirmation,
            },
        ))
    }
}
