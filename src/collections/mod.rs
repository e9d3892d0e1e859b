//! Various general-purpose collection types.
//!
//! # Purpose
//! Each submodule is a standalone construct with a guarantee the std
//! collections don't make: stable insertion order, exact two-way lookup,
//! cheap value-semantic clones over linked storage, and so on.
//!
//! # Method
//! The linked lists manage their own pointer chains; everything else is built
//! atop std's hash maps and vectors rather than reimplementing them.

#[cfg(feature = "bimap")]
pub mod bimap;
#[cfg(feature = "either")]
pub mod either;
#[cfg(feature = "linked")]
pub mod linked;
#[cfg(feature = "matrix")]
pub mod matrix;
#[cfg(feature = "ordered")]
pub mod ordered;
