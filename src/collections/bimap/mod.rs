mod bi_map;
mod iter;

pub use bi_map::*;
pub use iter::*;

mod tests;
