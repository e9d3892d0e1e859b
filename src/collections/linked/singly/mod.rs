mod iter;
mod list;
mod node;
mod raw;

pub use iter::*;
pub use list::*;
pub(crate) use node::*;
pub(crate) use raw::*;

mod tests;
