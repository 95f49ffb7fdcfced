//! Tests for the built-in tools against fake collaborators.

mod common;

use std::sync::Arc;

use serde_json::json;

use common::*;
use huddle::engine::SessionState;
use huddle::tools::{AvailableSlotsTool, BookDemoTool, ToolHandler};
use huddle::types::{BookingConfirmation, LeadInfo, OutboundEvent};

fn session_with_lead() -> SessionState {
    let mut session = SessionState::empty("America/New_York");
    session.lead = LeadInfo {
        name: Some("Dana".into()),
        email: Some("dana@acme.io".into()),
        company: Some("Acme".into()),
        ..Default::default()
    };
    session
}

#[tokio::test]
async fn slot_lookup_pushes_and_narrates() {
    let calendar = Arc::new(FakeCalendar::new());
    let tool = AvailableSlotsTool::new(calendar.clone());
    let mut session = SessionState::empty("Europe/Berlin");

    let outcome = tool
        .execute(&json!({"time_preference": "morning"}), &mut session)
        .await
        .unwrap();

    let Some(OutboundEvent::AvailableSlots { slots }) = outcome.push else {
        panic!("expected an available_slots push");
    };
    assert_eq!(slots.len(), 2);
    assert!(outcome.reply.contains("2 open slots"));
    assert!(outcome.reply.contains("slot-1"));

    let query = calendar.queries.lock().unwrap()[0].clone();
    assert_eq!(query.timezone, "Europe/Berlin", "session timezone reaches the calendar");
}

#[tokio::test]
async fn malformed_date_degrades_to_no_filter() {
    let calendar = Arc::new(FakeCalendar::new());
    let tool = AvailableSlotsTool::new(calendar.clone());
    let mut session = SessionState::empty("America/New_York");

    tool.execute(&json!({"preferred_date": "next tuesday"}), &mut session)
        .await
        .unwrap();

    assert!(calendar.queries.lock().unwrap()[0].preferred_date.is_none());
}

#[tokio::test]
async fn booking_success_records_session_and_notifies() {
    let calendar = Arc::new(FakeCalendar::new());
    let notifier = Arc::new(FakeNotifier::new());
    let tool = BookDemoTool::new(calendar.clone(), notifier.clone());
    let mut session = session_with_lead();

    let outcome = tool
        .execute(&json!({"slot_id": "slot-1", "meeting_notes": "API focus"}), &mut session)
        .await
        .unwrap();

    assert!(matches!(
        outcome.push,
        Some(OutboundEvent::BookingConfirmed { ref booking }) if booking.success
    ));
    assert!(session.booking.as_ref().unwrap().success);
    assert_eq!(notifier.count(), 1);

    let booking = calendar.bookings.lock().unwrap()[0].clone();
    assert_eq!(booking.slot_id, "slot-1");
    assert_eq!(booking.meeting_notes, "API focus");
    assert_eq!(booking.lead.name.as_deref(), Some("Dana"));
}

#[tokio::test]
async fn domain_failure_is_forwarded_not_raised() {
    let calendar = Arc::new(
        FakeCalendar::new().with_booking(BookingConfirmation::failed("slot already taken")),
    );
    let notifier = Arc::new(FakeNotifier::new());
    let tool = BookDemoTool::new(calendar, notifier.clone());
    let mut session = session_with_lead();

    let outcome = tool
        .execute(&json!({"slot_id": "slot-1"}), &mut session)
        .await
        .unwrap();

    let Some(OutboundEvent::BookingConfirmed { booking }) = outcome.push else {
        panic!("domain failures still push booking_confirmed");
    };
    assert!(!booking.success);
    assert!(outcome.reply.contains("slot already taken"));
    assert_eq!(notifier.count(), 0, "no notification for a failed booking");
}

#[tokio::test]
async fn notifier_failure_does_not_fail_the_booking() {
    let calendar = Arc::new(FakeCalendar::new());
    let tool = BookDemoTool::new(calendar, Arc::new(FakeNotifier::failing()));
    let mut session = session_with_lead();

    let outcome = tool
        .execute(&json!({"slot_id": "slot-1"}), &mut session)
        .await
        .unwrap();
    assert!(outcome.reply.contains("Demo booked"));
}

#[tokio::test]
async fn calendar_error_propagates_to_the_coordinator() {
    let tool = BookDemoTool::new(Arc::new(BrokenCalendar), Arc::new(FakeNotifier::new()));
    let mut session = session_with_lead();

    let err = tool
        .execute(&json!({"slot_id": "slot-1"}), &mut session)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("calendar unreachable"));
}

#[test]
fn missing_inputs_merge_call_and_session() {
    let tool = BookDemoTool::new(Arc::new(BrokenCalendar), Arc::new(FakeNotifier::new()));

    // Nothing known anywhere: everything required is reported at once.
    let empty = SessionState::empty("America/New_York");
    let missing = tool.missing_inputs(&json!({}), &empty);
    assert_eq!(missing, vec!["slot_id", "name", "email", "company"]);

    // Empty strings in the call do not satisfy requirements (and do not
    // shadow session state).
    let missing = tool.missing_inputs(
        &json!({"slot_id": "slot-1", "lead_info": {"name": "", "email": "a@b.com", "company": ""}}),
        &empty,
    );
    assert_eq!(missing, vec!["name", "company"]);

    // A UI-picked slot and previously supplied lead fields satisfy the
    // requirements without the call restating them.
    let mut session = session_with_lead();
    session.selected_slot_id = Some("slot-2".into());
    assert!(tool.missing_inputs(&json!({}), &session).is_empty());
}

#[tokio::test]
async fn ui_picked_slot_backfills_the_booking() {
    let calendar = Arc::new(FakeCalendar::new());
    let tool = BookDemoTool::new(calendar.clone(), Arc::new(FakeNotifier::new()));
    let mut session = session_with_lead();
    session.selected_slot_id = Some("slot-2".into());

    tool.execute(&json!({}), &mut session).await.unwrap();

    assert_eq!(calendar.bookings.lock().unwrap()[0].slot_id, "slot-2");
}

#[tokio::test]
async fn call_lead_fields_win_over_session() {
    let calendar = Arc::new(FakeCalendar::new());
    let tool = BookDemoTool::new(calendar.clone(), Arc::new(FakeNotifier::new()));
    let mut session = session_with_lead();

    tool.execute(
        &json!({"slot_id": "slot-1", "lead_info": {"name": "Dana Smith", "email": "", "company": "Acme GmbH"}}),
        &mut session,
    )
    .await
    .unwrap();

    let booking = calendar.bookings.lock().unwrap()[0].clone();
    assert_eq!(booking.lead.name.as_deref(), Some("Dana Smith"));
    assert_eq!(booking.lead.email.as_deref(), Some("dana@acme.io"), "empty call field falls back");
    assert_eq!(booking.lead.company.as_deref(), Some("Acme GmbH"));
    assert_eq!(session.lead.name.as_deref(), Some("Dana Smith"), "merged lead is kept");
}
