//! Synchronization utilities: a lock wrapper with a selectable flavor and a one-shot
//! completion channel for bridging asynchronous work back to a blocking caller.

mod completion;
mod locked;

pub use completion::*;
pub use locked::*;
