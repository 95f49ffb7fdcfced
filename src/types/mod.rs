//! Core data types shared across the engine.

pub mod lead;
pub mod message;
pub mod outbound;
pub mod scheduling;
pub mod stream;

pub use lead::{LeadField, LeadInfo};
pub use message::{ChatMessage, ContentPart, ModelMessage, Role, ToolCall, ToolResult};
pub use outbound::OutboundEvent;
pub use scheduling::{
    BookingConfirmation, BookingRequest, SlotQuery, TimePreference, TimeSlot,
};
pub use stream::StreamEvent;
