//! Scheduling domain types exchanged with the calendar collaborator.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::lead::LeadInfo;

/// An offered meeting slot, forwarded verbatim to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Pre-rendered local time, e.g. "10:00 AM".
    pub display_time: String,
    /// Pre-rendered local date, e.g. "Tuesday, Aug 12".
    pub display_date: String,
}

/// Availability filter built from a `get_available_slots` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotQuery {
    pub preferred_date: Option<NaiveDate>,
    pub time_preference: TimePreference,
    pub timezone: String,
}

/// Requested part of day.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimePreference {
    Morning,
    Afternoon,
    #[default]
    Any,
}

impl TimePreference {
    /// Parse the wire value; anything unrecognized falls back to `Any`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "morning" => Self::Morning,
            "afternoon" => Self::Afternoon,
            _ => Self::Any,
        }
    }
}

/// A booking handed to the calendar collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub slot_id: String,
    pub lead: LeadInfo,
    pub meeting_notes: String,
    pub timezone: String,
}

/// Outcome of a booking attempt. A taken slot is a domain failure
/// (`success: false` with `error` set), not an engine error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meet_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BookingConfirmation {
    /// A successful confirmation for the given calendar event.
    pub fn confirmed(event_id: impl Into<String>, slot: &TimeSlot) -> Self {
        Self {
            success: true,
            event_id: Some(event_id.into()),
            meet_link: None,
            start_time: Some(slot.start),
            end_time: Some(slot.end),
            error: None,
        }
    }

    /// A domain failure (slot taken, calendar rejected the booking).
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            event_id: None,
            meet_link: None,
            start_time: None,
            end_time: None,
            error: Some(error.into()),
        }
    }
}
