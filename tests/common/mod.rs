//! Shared fakes for integration tests: a scripted model backend and
//! in-memory calendar/notifier collaborators.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream::BoxStream;
use tokio::sync::Notify;

use huddle::backend::{ModelBackend, TurnRequest};
use huddle::error::{EngineError, Result};
use huddle::services::{CalendarService, Notifier};
use huddle::types::{
    BookingConfirmation, BookingRequest, LeadInfo, SlotQuery, StreamEvent, TimeSlot,
};

/// One scripted model turn: events to yield, then optionally a stream error.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTurn {
    pub events: Vec<StreamEvent>,
    pub error: Option<String>,
}

impl ScriptedTurn {
    /// A plain text turn ending normally.
    pub fn text(text: &str) -> Self {
        Self {
            events: vec![
                StreamEvent::TextDelta { text: text.into() },
                StreamEvent::TurnEnd,
            ],
            error: None,
        }
    }

    /// A turn that emits one tool call with the given argument fragments.
    pub fn tool_call(id: &str, name: &str, fragments: &[&str]) -> Self {
        let mut events = vec![StreamEvent::ToolUseStart {
            id: id.into(),
            name: name.into(),
        }];
        for fragment in fragments {
            events.push(StreamEvent::ToolInputDelta {
                id: id.into(),
                partial_json: (*fragment).into(),
            });
        }
        events.push(StreamEvent::ToolUseEnd { id: id.into() });
        events.push(StreamEvent::TurnEnd);
        Self {
            events,
            error: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            events: vec![],
            error: Some(message.into()),
        }
    }
}

enum Script {
    Sequence(VecDeque<ScriptedTurn>),
    Repeat(ScriptedTurn),
}

/// A [`ModelBackend`] that replays scripted turns and records every
/// [`TurnRequest`] it receives.
pub struct ScriptedBackend {
    script: Mutex<Script>,
    pub requests: Mutex<Vec<TurnRequest>>,
}

impl ScriptedBackend {
    pub fn new(turns: Vec<ScriptedTurn>) -> Self {
        Self {
            script: Mutex::new(Script::Sequence(turns.into())),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Replays the same turn forever (for turn-limit tests).
    pub fn repeating(turn: ScriptedTurn) -> Self {
        Self {
            script: Mutex::new(Script::Repeat(turn)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    async fn stream_turn(
        &self,
        request: &TurnRequest,
    ) -> Result<BoxStream<'static, Result<StreamEvent>>> {
        self.requests.lock().unwrap().push(request.clone());

        let turn = match &mut *self.script.lock().unwrap() {
            Script::Sequence(turns) => turns
                .pop_front()
                .ok_or_else(|| EngineError::Stream("scripted backend exhausted".into()))?,
            Script::Repeat(turn) => turn.clone(),
        };

        let mut items: Vec<Result<StreamEvent>> = turn.events.into_iter().map(Ok).collect();
        if let Some(message) = turn.error {
            items.push(Err(EngineError::Stream(message)));
        }
        Ok(Box::pin(futures::stream::iter(items)))
    }
}

/// A deterministic sample slot half an hour long.
pub fn sample_slot(id: &str, start: &str, display_time: &str) -> TimeSlot {
    let start: chrono::DateTime<chrono::Utc> = start.parse().unwrap();
    TimeSlot {
        id: id.into(),
        start,
        end: start + chrono::Duration::minutes(30),
        display_time: display_time.into(),
        display_date: "Wednesday, Aug 12".into(),
    }
}

pub fn sample_slots() -> Vec<TimeSlot> {
    vec![
        sample_slot("slot-1", "2026-08-12T14:00:00Z", "10:00 AM"),
        sample_slot("slot-2", "2026-08-12T15:00:00Z", "11:00 AM"),
    ]
}

/// In-memory calendar recording queries and bookings.
pub struct FakeCalendar {
    slots: Vec<TimeSlot>,
    booking: BookingConfirmation,
    pub queries: Mutex<Vec<SlotQuery>>,
    pub bookings: Mutex<Vec<BookingRequest>>,
    /// Signaled when a booking starts.
    pub booking_started: Arc<Notify>,
    /// When set, bookings wait here after signaling start.
    gate: Option<Arc<Notify>>,
}

impl FakeCalendar {
    pub fn new() -> Self {
        let slots = sample_slots();
        let booking = BookingConfirmation::confirmed("evt-1", &slots[0]);
        Self {
            slots,
            booking,
            queries: Mutex::new(Vec::new()),
            bookings: Mutex::new(Vec::new()),
            booking_started: Arc::new(Notify::new()),
            gate: None,
        }
    }

    pub fn with_slots(mut self, slots: Vec<TimeSlot>) -> Self {
        self.slots = slots;
        self
    }

    pub fn with_booking(mut self, booking: BookingConfirmation) -> Self {
        self.booking = booking;
        self
    }

    /// Make `book` pause on the gate after signaling `booking_started`.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.lock().unwrap().len()
    }
}

impl Default for FakeCalendar {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CalendarService for FakeCalendar {
    async fn available_slots(&self, query: &SlotQuery) -> Result<Vec<TimeSlot>> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(self.slots.clone())
    }

    async fn book(&self, request: &BookingRequest) -> Result<BookingConfirmation> {
        self.booking_started.notify_one();
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.bookings.lock().unwrap().push(request.clone());
        Ok(self.booking.clone())
    }
}

/// A calendar whose booking path always errors (unreachable backend).
pub struct BrokenCalendar;

#[async_trait]
impl CalendarService for BrokenCalendar {
    async fn available_slots(&self, _query: &SlotQuery) -> Result<Vec<TimeSlot>> {
        Err(EngineError::tool("get_available_slots", "calendar unreachable"))
    }

    async fn book(&self, _request: &BookingRequest) -> Result<BookingConfirmation> {
        Err(EngineError::tool("book_demo", "calendar unreachable"))
    }
}

/// Records confirmation notifications.
#[derive(Default)]
pub struct FakeNotifier {
    pub notified: Mutex<Vec<(LeadInfo, BookingConfirmation)>>,
    pub fail: bool,
}

impl FakeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            notified: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn count(&self) -> usize {
        self.notified.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn booking_confirmed(
        &self,
        lead: &LeadInfo,
        confirmation: &BookingConfirmation,
    ) -> Result<()> {
        if self.fail {
            return Err(EngineError::tool("notifier", "smtp down"));
        }
        self.notified
            .lock()
            .unwrap()
            .push((lead.clone(), confirmation.clone()));
        Ok(())
    }
}

/// Parse the JSON payloads out of collected SSE frames.
pub fn frame_payloads(frames: &[String]) -> Vec<serde_json::Value> {
    frames
        .iter()
        .map(|f| {
            serde_json::from_str(f.trim_start_matches("data: ").trim())
                .expect("frame carries valid JSON")
        })
        .collect()
}

/// Drain everything currently buffered in the frame channel.
pub fn drain_frames(rx: &mut tokio::sync::mpsc::UnboundedReceiver<String>) -> Vec<String> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(frame);
    }
    frames
}
