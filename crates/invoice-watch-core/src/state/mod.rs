//! List state: the current snapshot and which row is expanded.
//!
//! Mutated only from the event loop that owns it, so no locking.

pub mod selection;
pub mod snapshot;

pub use selection::SelectionState;
pub use snapshot::ListState;
