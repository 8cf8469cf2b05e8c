//! Audit trail of order and bot lifecycle events.

mod events;
mod handle;
mod memory;
mod store;
mod writer;

pub use events::*;
pub use handle::*;
pub use memory::*;
pub use store::*;
pub use writer::*;
