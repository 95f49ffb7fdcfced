//! Tool system: handler capability trait, registry, and the built-in
//! scheduling/lead tools.

pub mod handler;
pub mod lead;
pub mod registry;
pub mod schema;
pub mod scheduling;
pub mod validation;

pub use handler::{ToolHandler, ToolOutcome};
pub use lead::CollectLeadInfoTool;
pub use registry::ToolRegistry;
pub use schema::ToolParameters;
pub use scheduling::{AvailableSlotsTool, BookDemoTool};
