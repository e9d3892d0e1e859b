//! Manual memory utilities.
//!
//! The centerpiece is [`HeaderBuf`], a single heap allocation holding a fixed
//! header followed by a run of element slots, with destruction driven by a
//! [`DeinitStrategy`] chosen at construction.

mod header_buf;
mod strategy;

pub use header_buf::*;
pub use strategy::*;
