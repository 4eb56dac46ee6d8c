//! Exact matrix inverses, computed via the adjugate so every intermediate
//! value can be shown in a worked solution.

use crate::{matrix::Matrix, rational::Rational};
use std::ops::{Add, Mul, Neg, Sub};
use thiserror::Error;

/// The inverse of a square matrix along with the values used to compute it.
#[derive(Debug, Clone, PartialEq)]
pub struct Inverse {
    determinant: Rational,
    cofactors: Matrix<Rational>,
    adjugate: Matrix<Rational>,
    inverse: Matrix<Rational>,
}

impl Inverse {
    pub fn determinant(&self) -> Rational { self.determinant }

    /// The signed minors, `C_ij = (-1)^(i + j) * det(M_ij)`.
    pub fn cofactors(&self) -> &Matrix<Rational> { &self.cofactors }

    /// The transpose of the cofactor matrix.
    pub fn adjugate(&self) -> &Matrix<Rational> { &self.adjugate }

    pub fn inverse(&self) -> &Matrix<Rational> { &self.inverse }

    pub fn into_inverse(self) -> Matrix<Rational> { self.inverse }
}

/// The determinant is zero, so there is no inverse.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
#[error("The matrix is not invertible")]
pub struct NotInvertible;

/// Calculate the cofactor matrix of a 1x1, 2x2 or 3x3 square matrix.
pub fn cofactors<T>(matrix: &Matrix<T>) -> Matrix<T>
where
    T: Copy
        + From<i64>
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Neg<Output = T>,
{
    assert!(matrix.is_square(), "Only square matrices have cofactors");
    let order = matrix.row_count();

    if order == 1 {
        // the empty minor has a determinant of 1
        return Matrix::identity(1);
    }

    Matrix::init(order, order, |row, column| {
        let minor = matrix.minor(row, column).determinant();

        if (row + column) % 2 == 0 {
            minor
        } else {
            -minor
        }
    })
}

/// Invert an integer matrix using exact rational arithmetic.
///
/// # Panics
///
/// If the matrix isn't square.
pub fn invert(matrix: &Matrix<i64>) -> Result<Inverse, NotInvertible> {
    invert_exact(&matrix.map(|&value| Rational::from(value)))
}

/// Invert a rational matrix as `adj(M) / det(M)`.
pub fn invert_exact(
    matrix: &Matrix<Rational>,
) -> Result<Inverse, NotInvertible> {
    let determinant = matrix.determinant();

    if determinant.is_zero() {
        return Err(NotInvertible);
    }

    let cofactors = cofactors(matrix);
    let adjugate = cofactors.transposed();
    let inverse = adjugate.map(|&value| value / determinant);

    Ok(Inverse {
        determinant,
        cofactors,
        adjugate,
        inverse,
    })
}

impl Matrix<i64> {
    pub fn inverse(&self) -> Result<Inverse, NotInvertible> { invert(self) }
}
