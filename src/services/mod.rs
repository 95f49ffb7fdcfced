//! Collaborator interfaces for the external world.
//!
//! The engine only ever talks to the calendar and notification backends
//! through these traits; concrete implementations (Google Calendar, SMTP,
//! ...) live outside this crate.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{BookingConfirmation, BookingRequest, LeadInfo, SlotQuery, TimeSlot};

/// Availability lookup and booking against the real calendar.
#[async_trait]
pub trait CalendarService: Send + Sync {
    /// Open slots matching the query, in chronological order.
    async fn available_slots(&self, query: &SlotQuery) -> Result<Vec<TimeSlot>>;

    /// Attempt to book the slot. A taken slot is reported as a
    /// [`BookingConfirmation`] with `success: false`, not as an error.
    async fn book(&self, request: &BookingRequest) -> Result<BookingConfirmation>;
}

/// Outbound notifications (confirmation emails, internal alerts).
///
/// Invoked best-effort after a successful booking; failures are logged by
/// the caller and never affect the booking itself.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn booking_confirmed(
        &self,
        lead: &LeadInfo,
        confirmation: &BookingConfirmation,
    ) -> Result<()>;
}
