use std::fmt::{self, Debug, Display, Formatter};
use std::mem;
use std::ops::{Index, IndexMut};

use super::{Iter, RowsIter};
use crate::util::error::{IndexOutOfBounds, MatrixError, RaggedRows, ShapeMismatch};
use crate::util::fmt::DebugRaw;
use crate::util::result::ResultExtension;

/// A dense two-dimensional grid, stored row-major in a single [`Vec`].
///
/// Positions are `(row, column)` pairs, zero-based. Rows are contiguous, so borrowing a whole
/// row is free while borrowing a column requires a walk.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `r`: The number of rows.
/// - `c`: The number of columns.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `replace` | `O(1)` |
/// | `row` | `O(1)` |
/// | `column` | `O(r)` |
/// | `zip` | `O(r * c)` |
/// | `transpose` | `O(r * c)` |
/// | `map` | `O(r * c)` |
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Matrix<T> {
    pub(crate) items: Vec<T>,
    pub(crate) rows: usize,
    pub(crate) columns: usize,
}

impl<T> Matrix<T> {
    /// A `rows` by `columns` matrix with every position holding a copy of `value`.
    pub fn filled(value: T, rows: usize, columns: usize) -> Matrix<T>
    where
        T: Clone,
    {
        Matrix {
            items: vec![value; rows * columns],
            rows,
            columns,
        }
    }

    /// A `rows` by `columns` matrix with each position computed from its `(row, column)` pair.
    pub fn from_fn<F>(rows: usize, columns: usize, mut f: F) -> Matrix<T>
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut items = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for column in 0..columns {
                items.push(f(row, column));
            }
        }
        Matrix {
            items,
            rows,
            columns,
        }
    }

    /// A matrix from rows of equal length.
    ///
    /// # Panics
    /// Panics if the rows differ in length.
    pub fn from_rows<I>(value: I) -> Matrix<T>
    where
        I: IntoIterator,
        I::Item: IntoIterator<Item = T>,
    {
        Self::try_from_rows(value).throw()
    }

    /// A matrix from rows of equal length, or [`RaggedRows`] naming the first row which differs.
    pub fn try_from_rows<I>(value: I) -> Result<Matrix<T>, RaggedRows>
    where
        I: IntoIterator,
        I::Item: IntoIterator<Item = T>,
    {
        let mut items = Vec::new();
        let mut rows = 0;
        let mut columns = 0;
        for row in value {
            let before = items.len();
            items.extend(row);
            let found = items.len() - before;
            if rows == 0 {
                columns = found;
            } else if found != columns {
                return Err(RaggedRows {
                    row: rows,
                    expected: columns,
                    found,
                });
            }
            rows += 1;
        }
        if rows == 0 {
            columns = 0;
        }
        Ok(Matrix {
            items,
            rows,
            columns,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The number of positions.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn offset(&self, row: usize, column: usize) -> Option<usize> {
        (row < self.rows && column < self.columns).then(|| row * self.columns + column)
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        self.items.get(self.offset(row, column)?)
    }

    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut T> {
        let offset = self.offset(row, column)?;
        self.items.get_mut(offset)
    }

    pub fn try_get(&self, row: usize, column: usize) -> Result<&T, IndexOutOfBounds> {
        self.get(row, column).ok_or(IndexOutOfBounds {
            index: row * self.columns + column,
            len: self.items.len(),
        })
    }

    pub fn try_get_mut(&mut self, row: usize, column: usize) -> Result<&mut T, IndexOutOfBounds> {
        let index = row * self.columns + column;
        let len = self.items.len();
        self.get_mut(row, column).ok_or(IndexOutOfBounds {
            index,
            len,
        })
    }

    /// Replaces the value at a position, returning the previous one.
    ///
    /// # Panics
    /// Panics if the position is out of bounds.
    pub fn replace(&mut self, row: usize, column: usize, value: T) -> T {
        let len = self.items.len();
        let columns = self.columns;
        match self.get_mut(row, column) {
            Some(slot) => mem::replace(slot, value),
            None => Err::<T, _>(IndexOutOfBounds {
                index: row * columns + column,
                len,
            })
            .throw(),
        }
    }

    /// Borrows a whole row as a slice.
    ///
    /// # Panics
    /// Panics if `row` is out of bounds.
    pub fn row(&self, row: usize) -> &[T] {
        if row >= self.rows {
            Err::<T, _>(IndexOutOfBounds {
                index: row,
                len: self.rows,
            })
            .throw();
        }
        &self.items[row * self.columns..(row + 1) * self.columns]
    }

    /// Collects references to a whole column.
    ///
    /// # Panics
    /// Panics if `column` is out of bounds.
    pub fn column(&self, column: usize) -> Vec<&T> {
        if column >= self.columns {
            Err::<T, _>(IndexOutOfBounds {
                index: column,
                len: self.columns,
            })
            .throw();
        }
        (0..self.rows)
            .map(|row| &self.items[row * self.columns + column])
            .collect()
    }

    /// Iterates every position in row-major order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.items.iter(),
        }
    }

    /// Iterates the rows as slices.
    pub fn rows_iter(&self) -> RowsIter<'_, T> {
        RowsIter {
            inner: self.items.chunks(self.columns.max(1)),
            remaining: self.rows,
        }
    }

    /// Pairs this matrix with another of the same shape, position by position.
    ///
    /// # Panics
    /// Panics if the shapes differ.
    pub fn zip<U>(self, other: Matrix<U>) -> Matrix<(T, U)> {
        self.try_zip(other).throw()
    }

    /// Pairs this matrix with another of the same shape, or [`ShapeMismatch`] if the shapes
    /// differ.
    pub fn try_zip<U>(self, other: Matrix<U>) -> Result<Matrix<(T, U)>, ShapeMismatch> {
        if self.rows != other.rows || self.columns != other.columns {
            return Err(ShapeMismatch {
                left: (self.rows, self.columns),
                right: (other.rows, other.columns),
            });
        }
        Ok(Matrix {
            items: self.items.into_iter().zip(other.items).collect(),
            rows: self.rows,
            columns: self.columns,
        })
    }

    /// The matrix with rows and columns exchanged.
    pub fn transpose(self) -> Matrix<T> {
        let mut slots: Vec<Option<T>> = self.items.into_iter().map(Some).collect();
        let mut items = Vec::with_capacity(slots.len());
        for column in 0..self.columns {
            for row in 0..self.rows {
                // Each source position is visited exactly once.
                match slots[row * self.columns + column].take() {
                    Some(value) => items.push(value),
                    None => unreachable!("Matrix inconsistency!"),
                }
            }
        }
        Matrix {
            items,
            rows: self.columns,
            columns: self.rows,
        }
    }

    /// Transforms every position, keeping the shape.
    pub fn map<F, U>(self, f: F) -> Matrix<U>
    where
        F: FnMut(T) -> U,
    {
        Matrix {
            items: self.items.into_iter().map(f).collect(),
            rows: self.rows,
            columns: self.columns,
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, column): (usize, usize)) -> &Self::Output {
        self.try_get(row, column).throw()
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut Self::Output {
        let len = self.items.len();
        let columns = self.columns;
        match self.get_mut(row, column) {
            Some(slot) => slot,
            None => Err::<&mut T, _>(IndexOutOfBounds {
                index: row * columns + column,
                len,
            })
            .throw(),
        }
    }
}

impl<T, I> TryFrom<Vec<I>> for Matrix<T>
where
    I: IntoIterator<Item = T>,
{
    type Error = MatrixError;

    fn try_from(value: Vec<I>) -> Result<Self, Self::Error> {
        Ok(Self::try_from_rows(value)?)
    }
}

impl<T: Debug> Debug for Matrix<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field(
                "contents",
                &DebugRaw(format!(
                    "[{}]",
                    self.rows_iter()
                        .map(|row| format!("{row:?}"))
                        .collect::<Vec<_>>()
                        .join(", ")
                )),
            )
            .field("rows", &self.rows)
            .field("columns", &self.columns)
            .finish()
    }
}

impl<T: Display> Display for Matrix<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "[{}]",
                self.row(row)
                    .iter()
                    .map(|item| format!("{item}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
        }
        Ok(())
    }
}
