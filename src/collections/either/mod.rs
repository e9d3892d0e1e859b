mod either;

pub use either::*;

mod tests;
