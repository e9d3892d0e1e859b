mod iter;
mod ordered_set;

pub use iter::*;
pub use ordered_set::*;
