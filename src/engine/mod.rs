//! The conversation engine: request/session state, fragment accumulation,
//! tool execution, client publishing, and the controlling loop.

pub mod accumulator;
pub mod coordinator;
pub mod publisher;
pub mod runner;
pub mod session;

pub use accumulator::ToolCallAccumulator;
pub use coordinator::ToolExecutionCoordinator;
pub use publisher::OutputPublisher;
pub use runner::ConversationLoop;
pub use session::{ChatRequest, SessionState};
