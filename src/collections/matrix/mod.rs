mod iter;
mod matrix;

pub use iter::*;
pub use matrix::*;

mod tests;
