//! Order queue: priority insertion, bot assignment and timed completion.
//!
//! - [`OrderQueueManager`]: synchronous state machine, advanced one second per
//!   `tick()` or against a clock with `advance_until()`
//! - [`QueueRunner`]: async wrapper that wakes at each countdown deadline
//!   and broadcasts snapshots to the presentation layer

mod config;
mod manager;
mod pending;
mod runner;
mod types;

pub use config::QueueConfig;
pub use manager::{OrderQueueManager, PROCESSING_SECONDS, TICK_INTERVAL};
pub use pending::PendingQueue;
pub use runner::QueueRunner;
pub use types::{QueueSnapshot, QueueStatus, TickSummary};
