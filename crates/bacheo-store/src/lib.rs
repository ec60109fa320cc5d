//! Bacheo Store - Storage ports and adapters
//!
//! This crate defines the record storage port, an in-memory adapter, and
//! the offline operation queue that replays mutations once connectivity
//! returns.

pub mod memory;
pub mod ports;
pub mod queue;

pub use memory::MemoryBacheStore;
pub use ports::BacheStore;
pub use queue::{OfflineQueue, PendingOperation, QueueProcessor, QueuedOperation};
