//! Explicit-wait synchronization
//!
//! Snapshot-then-wait gating against transient UI state.

mod gate;

pub use gate::{SynchronizationGate, WaitError};
