#![cfg(test)]

use super::*;
use crate::util::panic::assert_panics;

#[test]
fn test_filled() {
    let matrix = Matrix::filled(7, 2, 3);
    assert_eq!(matrix.rows(), 2);
    assert_eq!(matrix.columns(), 3);
    assert_eq!(matrix.len(), 6);
    assert!(matrix.iter().all(|&item| item == 7));
}

#[test]
fn test_from_fn() {
    let matrix = Matrix::from_fn(2, 3, |row, column| row * 10 + column);
    assert_eq!(matrix.row(0), [0, 1, 2]);
    assert_eq!(matrix.row(1), [10, 11, 12]);
}

#[test]
fn test_from_rows() {
    let matrix = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
    assert_eq!(matrix.rows(), 2);
    assert_eq!(matrix.columns(), 3);
    assert_eq!(matrix[(1, 2)], 6);
}

#[test]
fn test_ragged_rows_are_rejected() {
    let result = Matrix::try_from_rows([vec![1, 2, 3], vec![4, 5]]);
    match result {
        Err(err) => {
            assert_eq!(err.row, 1, "The first mismatched row should be named.");
            assert_eq!(err.expected, 3);
            assert_eq!(err.found, 2);
        },
        Ok(_) => panic!("Ragged rows should be rejected."),
    }

    assert_panics!({
        let _ = Matrix::from_rows([vec![1, 2, 3], vec![4, 5]]);
    });
}

#[test]
fn test_empty_matrix() {
    let matrix: Matrix<u32> = Matrix::try_from_rows(Vec::<Vec<u32>>::new()).unwrap();
    assert!(matrix.is_empty());
    assert_eq!(matrix.rows(), 0);
    assert_eq!(matrix.columns(), 0);
    assert_eq!(matrix.iter().next(), None);
    assert_eq!(matrix.rows_iter().next(), None);
}

#[test]
fn test_get_and_bounds() {
    let matrix = Matrix::from_rows([[1, 2], [3, 4]]);
    assert_eq!(matrix.get(1, 1), Some(&4));
    assert_eq!(matrix.get(2, 0), None);
    assert_eq!(matrix.get(0, 2), None, "A column overrun should not wrap into the next row.");
    assert!(matrix.try_get(0, 0).is_ok());
    assert!(matrix.try_get(5, 5).is_err());

    assert_panics!({
        let _ = matrix[(2, 0)];
    });
}

#[test]
fn test_try_get_mut() {
    let mut matrix = Matrix::from_rows([[1, 2], [3, 4]]);
    *matrix.try_get_mut(0, 1).unwrap() = 20;
    assert_eq!(matrix.row(0), [1, 20]);
    assert!(matrix.try_get_mut(2, 0).is_err());
}

#[test]
fn test_replace_and_index_mut() {
    let mut matrix = Matrix::from_rows([[1, 2], [3, 4]]);
    assert_eq!(matrix.replace(0, 1, 20), 2);
    matrix[(1, 0)] = 30;
    assert_eq!(matrix.row(0), [1, 20]);
    assert_eq!(matrix.row(1), [30, 4]);

    assert_panics!({
        let mut matrix = Matrix::from_rows([[1, 2], [3, 4]]);
        matrix[(2, 0)] = 9;
    });
}

#[test]
fn test_row_and_column() {
    let matrix = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
    assert_eq!(matrix.row(1), [4, 5, 6]);
    assert_eq!(matrix.column(1), [&2, &5]);

    assert_panics!({
        let _ = matrix.row(2);
    });
}

#[test]
fn test_rows_iter() {
    let matrix = Matrix::from_rows([[1, 2], [3, 4], [5, 6]]);
    let rows: Vec<_> = matrix.rows_iter().collect();
    assert_eq!(rows, [[1, 2], [3, 4], [5, 6]]);
    assert_eq!(matrix.rows_iter().len(), 3);
}

#[test]
fn test_zip() {
    let left = Matrix::from_rows([[1, 2], [3, 4]]);
    let right = Matrix::from_rows([["a", "b"], ["c", "d"]]);

    let zipped = left.zip(right);
    assert_eq!(zipped[(0, 1)], (2, "b"));
    assert_eq!(zipped[(1, 0)], (3, "c"));

    let wide = Matrix::filled(0, 2, 3);
    let tall = Matrix::filled(0, 3, 2);
    assert!(wide.try_zip(tall).is_err(), "Mismatched shapes should refuse to zip.");

    assert_panics!({
        let wide = Matrix::filled(0, 2, 3);
        let tall = Matrix::filled(0, 3, 2);
        let _ = wide.zip(tall);
    });
}

#[test]
fn test_transpose() {
    let matrix = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
    let transposed = matrix.transpose();

    assert_eq!(transposed.rows(), 3);
    assert_eq!(transposed.columns(), 2);
    assert_eq!(transposed.row(0), [1, 4]);
    assert_eq!(transposed.row(1), [2, 5]);
    assert_eq!(transposed.row(2), [3, 6]);
}

#[test]
fn test_map() {
    let matrix = Matrix::from_rows([[1, 2], [3, 4]]);
    let doubled = matrix.map(|item| item * 2);
    assert_eq!(doubled.row(0), [2, 4]);
    assert_eq!(doubled.row(1), [6, 8]);
}

#[test]
fn test_display() {
    let matrix = Matrix::from_rows([[1, 2], [3, 4]]);
    assert_eq!(format!("{matrix}"), "[1, 2]\n[3, 4]");
}
