//! Huddle — streaming tool-use conversation engine for scheduling product
//! demos.
//!
//! Drives a multi-turn exchange with a streaming model backend that can call
//! named tools (slot lookup, lead-form collection, demo booking), pushing
//! normalized events to a single connected client as SSE frames. The engine
//! is stateless per request: the caller supplies the full transcript every
//! time, and nothing survives the request except the side effects the tools
//! performed.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use huddle::backend::AnthropicBackend;
//! use huddle::config::EngineConfig;
//! use huddle::engine::{ChatRequest, ConversationLoop, OutputPublisher};
//! use huddle::tools::ToolRegistry;
//!
//! # async fn example(
//! #     calendar: Arc<dyn huddle::services::CalendarService>,
//! #     notifier: Arc<dyn huddle::services::Notifier>,
//! # ) -> huddle::error::Result<()> {
//! let config = EngineConfig::from_env()?;
//! let backend = Arc::new(AnthropicBackend::from_config(&config));
//! let registry = ToolRegistry::new()
//!     .with_tool(Arc::new(huddle::tools::AvailableSlotsTool::new(calendar.clone())))
//!     .with_tool(Arc::new(huddle::tools::CollectLeadInfoTool::new()))
//!     .with_tool(Arc::new(huddle::tools::BookDemoTool::new(calendar, notifier)));
//!
//! let cancel = CancellationToken::new();
//! let (publisher, mut frames) = OutputPublisher::channel(cancel.clone());
//! let engine = ConversationLoop::new(backend, registry, config);
//!
//! tokio::spawn(async move {
//!     while let Some(frame) = frames.recv().await {
//!         // write the SSE frame to the client; cancel() on disconnect
//!         let _ = frame;
//!     }
//! });
//!
//! engine.run(ChatRequest::from_user_text("hello"), &publisher).await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod engine;
pub mod error;
pub mod prompt;
pub mod services;
pub mod tools;
pub mod types;
pub mod util;

pub use config::EngineConfig;
pub use engine::{ChatRequest, ConversationLoop, OutputPublisher};
pub use error::{EngineError, Result};
