use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

#[derive(Debug)]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

impl Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of bounds for collection with {} elements!", self.index, self.len)
    }
}

impl Error for IndexOutOfBounds {}

#[derive(Debug)]
pub struct CapacityOverflow;

impl Display for CapacityOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Capacity overflow!")
    }
}

impl Error for CapacityOverflow {}

/// A row handed to a matrix constructor didn't match the width of the rows
/// before it.
#[derive(Debug)]
pub struct RaggedRows {
    pub row: usize,
    pub expected: usize,
    pub found: usize,
}

impl Display for RaggedRows {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Row {} has {} elements but rows of {} were expected!",
            self.row, self.found, self.expected
        )
    }
}

impl Error for RaggedRows {}

/// Two matrices were combined but their dimensions don't line up.
#[derive(Debug)]
pub struct ShapeMismatch {
    pub left: (usize, usize),
    pub right: (usize, usize),
}

impl Display for ShapeMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shape mismatch: {}x{} against {}x{}!",
            self.left.0, self.left.1, self.right.0, self.right.1
        )
    }
}

impl Error for ShapeMismatch {}

#[derive(Debug, Display, Error, From, TryInto, IsVariant)]
pub enum MatrixError {
    RaggedRows(RaggedRows),
    ShapeMismatch(ShapeMismatch),
}
