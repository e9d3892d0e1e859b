#![cfg(test)]

use super::*;
use Either::*;

#[test]
fn test_sides() {
    let left: Either<u32, &str> = Left(1);
    let right: Either<u32, &str> = Right("one");

    assert!(left.is_left());
    assert!(!left.is_right());
    assert_eq!(left.left(), Some(1));
    assert_eq!(left.right(), None);
    assert_eq!(right.left(), None);
    assert_eq!(right.right(), Some("one"));
}

#[test]
fn test_as_ref_and_as_mut() {
    let mut value: Either<u32, &str> = Left(1);
    assert_eq!(value.as_ref(), Left(&1));

    if let Left(inner) = value.as_mut() {
        *inner += 1;
    }
    assert_eq!(value, Left(2));
}

#[test]
fn test_flip() {
    let value: Either<u32, &str> = Left(1);
    assert_eq!(value.flip(), Right(1));
    assert_eq!(value.flip().flip(), value, "Flipping twice should round-trip.");
}

#[test]
fn test_maps_only_touch_their_side() {
    let left: Either<u32, &str> = Left(2);
    let right: Either<u32, &str> = Right("one");

    assert_eq!(left.map_left(|n| n * 10), Left(20));
    assert_eq!(left.map_right(str::len), Left(2));
    assert_eq!(right.map_left(|n| n * 10), Right("one"));
    assert_eq!(right.map_right(str::len), Right(3));
}

#[test]
fn test_either_collapses() {
    let left: Either<u32, &str> = Left(7);
    let right: Either<u32, &str> = Right("one");

    assert_eq!(left.either(|n| n as usize, str::len), 7);
    assert_eq!(right.either(|n| n as usize, str::len), 3);
}

#[test]
fn test_fallbacks() {
    let left: Either<u32, &str> = Left(1);
    let right: Either<u32, &str> = Right("one");

    assert_eq!(left.left_or(0), 1);
    assert_eq!(left.right_or("none"), "none");
    assert_eq!(right.left_or(0), 0);
    assert_eq!(right.right_or("none"), "one");
}

#[test]
fn test_into_inner() {
    let left: Either<u32, u32> = Left(1);
    let right: Either<u32, u32> = Right(2);
    assert_eq!(left.into_inner(), 1);
    assert_eq!(right.into_inner(), 2);
}

#[test]
fn test_result_conversions() {
    let ok: Result<u32, &str> = Ok(1);
    let err: Result<u32, &str> = Err("bad");

    assert_eq!(Either::from(ok), Right(1));
    assert_eq!(Either::from(err), Left("bad"));

    let back: Result<u32, &str> = Right::<&str, u32>(1).into();
    assert_eq!(back, Ok(1));
}

#[test]
fn test_iteration_forwards_to_the_held_side() {
    let forward: Either<_, std::vec::IntoIter<i32>> = Left([1, 2, 3].into_iter());
    assert_eq!(forward.collect::<Vec<_>>(), [1, 2, 3]);

    let backward: Either<std::vec::IntoIter<i32>, _> = Right([4, 5, 6].into_iter());
    assert_eq!(backward.len(), 3);
    assert_eq!(backward.rev().collect::<Vec<_>>(), [6, 5, 4]);
}

#[test]
fn test_display_forwards() {
    let left: Either<u32, &str> = Left(1);
    let right: Either<u32, &str> = Right("one");
    assert_eq!(format!("{left}"), "1");
    assert_eq!(format!("{right}"), "one");
}
