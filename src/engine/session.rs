//! Per-request state: the request contract and the mutable session the
//! tool handlers share.

use serde::Deserialize;

use crate::error::{EngineError, Result};
use crate::types::{BookingConfirmation, ChatMessage, LeadInfo, Role};

/// Maximum transcript length accepted from the caller.
pub const MAX_MESSAGES: usize = 50;

/// One engine invocation as supplied by the caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub lead_info: Option<LeadInfo>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub selected_slot_id: Option<String>,
}

impl ChatRequest {
    /// Start a request from a single user message.
    pub fn from_user_text(text: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(text)],
            lead_info: None,
            timezone: None,
            selected_slot_id: None,
        }
    }

    /// Admission checks, run before the backend is contacted.
    pub fn validate(&self) -> Result<()> {
        if self.messages.is_empty() {
            return Err(EngineError::InvalidRequest("messages must not be empty".into()));
        }
        if self.messages.len() > MAX_MESSAGES {
            return Err(EngineError::InvalidRequest(format!(
                "at most {MAX_MESSAGES} messages per request"
            )));
        }
        if self.messages.last().map(|m| m.role) != Some(Role::User) {
            return Err(EngineError::InvalidRequest(
                "the final message must be from the user".into(),
            ));
        }
        Ok(())
    }
}

/// Mutable state shared by the tool handlers for the duration of one
/// request. Created from the request, destroyed with it.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Lead details known so far (client-supplied, then enriched by calls).
    pub lead: LeadInfo,
    /// IANA timezone used for slot rendering and booking.
    pub timezone: String,
    /// Slot the user picked in the client UI, if any.
    pub selected_slot_id: Option<String>,
    /// Confirmation of a booking made earlier in this request.
    pub booking: Option<BookingConfirmation>,
}

impl SessionState {
    pub fn from_request(request: &ChatRequest, default_timezone: &str) -> Self {
        Self {
            lead: request.lead_info.clone().unwrap_or_default(),
            timezone: request
                .timezone
                .clone()
                .filter(|tz| !tz.trim().is_empty())
                .unwrap_or_else(|| default_timezone.to_string()),
            selected_slot_id: request.selected_slot_id.clone(),
            booking: None,
        }
    }

    /// An empty session, mainly for tests.
    pub fn empty(timezone: &str) -> Self {
        Self {
            lead: LeadInfo::default(),
            timezone: timezone.to_string(),
            selected_slot_id: None,
            booking: None,
        }
    }
}
