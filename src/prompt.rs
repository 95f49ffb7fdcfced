//! System prompt for the demo-scheduling assistant.

use crate::engine::session::SessionState;

/// Identity and intro — static portion of the system prompt.
const SYSTEM_PROMPT_INTRO: &str = "\
You are a friendly scheduling assistant for a B2B software product. Your job \
is to answer short questions about the product demo and get qualified \
prospects booked into a live demo slot.";

/// Build the full system prompt for one request, embedding the caller's
/// timezone and any lead details already on file so the model never re-asks
/// for them.
pub fn system_prompt(session: &SessionState) -> String {
    let mut known = Vec::new();
    if let Some(name) = &session.lead.name {
        known.push(format!("name: {name}"));
    }
    if let Some(email) = &session.lead.email {
        known.push(format!("email: {email}"));
    }
    if let Some(company) = &session.lead.company {
        known.push(format!("company: {company}"));
    }
    if let Some(size) = &session.lead.company_size {
        known.push(format!("company size: {size}"));
    }
    let known_block = if known.is_empty() {
        "Nothing is known about the prospect yet.".to_string()
    } else {
        format!("Already on file (do not ask again): {}.", known.join(", "))
    };

    let slot_block = match &session.selected_slot_id {
        Some(id) => format!("The user already picked slot {id} in the UI."),
        None => "No slot has been picked yet.".to_string(),
    };

    format!(
        "{SYSTEM_PROMPT_INTRO}\n\n\
         Rules:\n\
         1. Use get_available_slots before proposing any meeting time; never invent times.\n\
         2. Before book_demo, make sure name, email, and company are known. If they are \
         not, use collect_lead_info to show a form instead of asking field by field.\n\
         3. Call book_demo exactly once per confirmed booking. If it reports a failure, \
         apologize and offer another slot.\n\
         4. Keep replies to one or two short sentences; the slot list and forms render \
         as UI, so do not repeat their contents in prose.\n\n\
         Prospect timezone: {timezone}. All slot times shown to the user are already in \
         their timezone.\n\
         {known_block}\n\
         {slot_block}",
        timezone = session.timezone,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LeadInfo;

    #[test]
    fn embeds_timezone_and_known_lead_fields() {
        let mut session = SessionState::empty("Europe/Berlin");
        session.lead = LeadInfo {
            name: Some("Dana".into()),
            email: Some("dana@acme.io".into()),
            ..Default::default()
        };
        let prompt = system_prompt(&session);
        assert!(prompt.contains("Europe/Berlin"));
        assert!(prompt.contains("name: Dana"));
        assert!(prompt.contains("do not ask again"));
    }

    #[test]
    fn mentions_picked_slot() {
        let mut session = SessionState::empty("America/New_York");
        session.selected_slot_id = Some("slot-7".into());
        assert!(system_prompt(&session).contains("slot-7"));
    }
}
