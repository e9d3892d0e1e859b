use std::fmt::{self, Display, Formatter};

use derive_more::IsVariant;

use Either::*;

/// A value of one of two types.
///
/// Unlike [`Result`], neither side carries an error connotation; `Either` is just the sum of two
/// alternatives, with combinators for collapsing or transforming whichever side is present. When
/// both sides share a capability (iteration, display), `Either` forwards it.
// Untagged, so either side serializes transparently; deserialization necessarily guesses and
// tries Left before Right.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<L, R> Either<L, R> {
    /// The left value, consuming self.
    pub fn left(self) -> Option<L> {
        match self {
            Left(left) => Some(left),
            Right(_) => None,
        }
    }

    /// The right value, consuming self.
    pub fn right(self) -> Option<R> {
        match self {
            Left(_) => None,
            Right(right) => Some(right),
        }
    }

    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Left(left) => Left(left),
            Right(right) => Right(right),
        }
    }

    pub fn as_mut(&mut self) -> Either<&mut L, &mut R> {
        match self {
            Left(left) => Left(left),
            Right(right) => Right(right),
        }
    }

    /// Swaps the sides.
    pub fn flip(self) -> Either<R, L> {
        match self {
            Left(left) => Right(left),
            Right(right) => Left(right),
        }
    }

    pub fn map_left<F, T>(self, f: F) -> Either<T, R>
    where
        F: FnOnce(L) -> T,
    {
        match self {
            Left(left) => Left(f(left)),
            Right(right) => Right(right),
        }
    }

    pub fn map_right<F, T>(self, f: F) -> Either<L, T>
    where
        F: FnOnce(R) -> T,
    {
        match self {
            Left(left) => Left(left),
            Right(right) => Right(f(right)),
        }
    }

    /// Collapses both sides into one value by applying the matching function.
    pub fn either<F, G, T>(self, f: F, g: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Left(left) => f(left),
            Right(right) => g(right),
        }
    }

    /// The left value, or `fallback` if this is a right.
    pub fn left_or(self, fallback: L) -> L {
        match self {
            Left(left) => left,
            Right(_) => fallback,
        }
    }

    /// The right value, or `fallback` if this is a left.
    pub fn right_or(self, fallback: R) -> R {
        match self {
            Left(_) => fallback,
            Right(right) => right,
        }
    }
}

impl<T> Either<T, T> {
    /// Extracts the value when both sides are the same type.
    pub fn into_inner(self) -> T {
        match self {
            Left(value) => value,
            Right(value) => value,
        }
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    fn from(value: Result<R, L>) -> Self {
        match value {
            Ok(right) => Right(right),
            Err(left) => Left(left),
        }
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    fn from(value: Either<L, R>) -> Self {
        match value {
            Left(left) => Err(left),
            Right(right) => Ok(right),
        }
    }
}

// When both sides iterate with the same Item, the Either of them does too.
impl<L, R> Iterator for Either<L, R>
where
    L: Iterator,
    R: Iterator<Item = L::Item>,
{
    type Item = L::Item;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Left(left) => left.next(),
            Right(right) => right.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Left(left) => left.size_hint(),
            Right(right) => right.size_hint(),
        }
    }
}

impl<L, R> DoubleEndedIterator for Either<L, R>
where
    L: DoubleEndedIterator,
    R: DoubleEndedIterator<Item = L::Item>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        match self {
            Left(left) => left.next_back(),
            Right(right) => right.next_back(),
        }
    }
}

impl<L, R> ExactSizeIterator for Either<L, R>
where
    L: ExactSizeIterator,
    R: ExactSizeIterator<Item = L::Item>,
{
}

impl<L: Display, R: Display> Display for Either<L, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Left(left) => left.fmt(f),
            Right(right) => right.fmt(f),
        }
    }
}
