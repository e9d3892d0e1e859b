//! A spell book of general-purpose language extensions: collection types with
//! stronger guarantees than the standard ones, a manually-managed
//! header-plus-elements buffer, and a couple of small synchronization helpers.
//!
//! # Purpose
//! This crate is a grab-bag rather than a framework. Each module is an
//! independent, small, reusable construct:
//! - [`collections::linked`]: singly and doubly linked lists with cheap
//!   clones and copy-on-write mutation, plus a
//!   [`Cursor`](collections::linked::Cursor) for O(1) sequential traversal
//!   and splicing.
//! - [`collections::ordered`]: a set with stable first-insertion iteration
//!   order.
//! - [`collections::bimap`]: an exactly-invertible two-way map.
//! - [`collections::either`]: a left/right sum type that iterates when both
//!   sides do.
//! - [`collections::matrix`]: a dense row-major 2-D collection.
//! - [`mem`]: a single-allocation buffer co-locating a fixed header with a
//!   variable-length element region, with configurable teardown.
//! - [`sync`]: a lock wrapper with a construction-time choice of lock flavor,
//!   and a blocking completion handoff.
//!
//! # Error Handling
//! Programmer errors (out-of-bounds indices, broken dual-structure
//! invariants, re-linking an already-linked node) are panics, not
//! [`Result`]s - users shouldn't have to handle an error every time they
//! index into a list. Where a failure is plausible in correct code, a `try_`
//! twin returns [`Option`] or a strongly typed error instead. Errors are
//! enums for static dispatch with structs (often ZSTs) that implement
//! [`Error`](std::error::Error).
//!
//! # Dependencies
//! The linked list and buffer cores are written against raw pointers and
//! [`std::alloc`] directly; the adapter collections sit on top of std's hash
//! maps and vectors rather than reimplementing them. Derive macros handle the
//! repetitive error plumbing, and an optional `serde` feature provides
//! transparent pass-through serialization for every container.

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "collections")]
pub mod collections;
#[cfg(feature = "mem")]
pub mod mem;
#[cfg(feature = "sync")]
pub mod sync;

#[cfg(feature = "serde")]
mod serde_impls;

pub(crate) mod util;

#[doc(inline)]
pub use util::error;
