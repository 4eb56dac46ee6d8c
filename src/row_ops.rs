//! Elementary row operations.

use crate::matrix::Matrix;
use arrayvec::ArrayVec;
use std::{
    fmt::{self, Display, Formatter},
    ops::{Add, Mul},
};
use thiserror::Error;

/// The three kinds of elementary row operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RowOperationKind {
    Swap,
    Scale,
    Add,
}

impl RowOperationKind {
    pub const ALL: [RowOperationKind; 3] = [
        RowOperationKind::Swap,
        RowOperationKind::Scale,
        RowOperationKind::Add,
    ];
}

/// A single elementary row operation. Row indices are zero-based.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RowOperation {
    /// `R_first <-> R_second`
    Swap { first: usize, second: usize },
    /// `R_row <- factor * R_row`
    Scale { row: usize, factor: i64 },
    /// `R_target <- R_target + factor * R_source`
    AddMultiple {
        target: usize,
        source: usize,
        factor: i64,
    },
}

impl RowOperation {
    pub fn swap(
        first: usize,
        second: usize,
    ) -> Result<Self, RowOperationError> {
        RowOperation::Swap { first, second }.validated()
    }

    pub fn scale(row: usize, factor: i64) -> Result<Self, RowOperationError> {
        RowOperation::Scale { row, factor }.validated()
    }

    pub fn add_multiple(
        target: usize,
        source: usize,
        factor: i64,
    ) -> Result<Self, RowOperationError> {
        RowOperation::AddMultiple {
            target,
            source,
            factor,
        }
        .validated()
    }

    /// Make sure this operation would be a meaningful exercise.
    ///
    /// Swaps and additions need two different rows, additions need a
    /// non-zero factor, and scaling by `0` or `1` is never allowed.
    pub fn validate(&self) -> Result<(), RowOperationError> {
        match *self {
            RowOperation::Swap { first, second } if first == second => {
                Err(RowOperationError::SameRow { row: first })
            },
            RowOperation::Scale { factor: factor @ 0..=1, .. } => {
                Err(RowOperationError::InvalidScaleFactor { factor })
            },
            RowOperation::AddMultiple { target, source, .. }
                if target == source =>
            {
                Err(RowOperationError::SameRow { row: target })
            },
            RowOperation::AddMultiple { factor: 0, .. } => {
                Err(RowOperationError::ZeroMultiple)
            },
            _ => Ok(()),
        }
    }

    fn validated(self) -> Result<Self, RowOperationError> {
        self.validate().map(|_| self)
    }

    pub fn kind(&self) -> RowOperationKind {
        match self {
            RowOperation::Swap { .. } => RowOperationKind::Swap,
            RowOperation::Scale { .. } => RowOperationKind::Scale,
            RowOperation::AddMultiple { .. } => RowOperationKind::Add,
        }
    }

    /// The row being replaced (for a swap, the first of the pair).
    pub fn target_row(&self) -> usize {
        match *self {
            RowOperation::Swap { first, .. } => first,
            RowOperation::Scale { row, .. } => row,
            RowOperation::AddMultiple { target, .. } => target,
        }
    }

    /// The other row involved, if any.
    pub fn other_row(&self) -> Option<usize> {
        match *self {
            RowOperation::Swap { second, .. } => Some(second),
            RowOperation::Scale { .. } => None,
            RowOperation::AddMultiple { source, .. } => Some(source),
        }
    }

    pub fn coefficient(&self) -> Option<i64> {
        match *self {
            RowOperation::Swap { .. } => None,
            RowOperation::Scale { factor, .. }
            | RowOperation::AddMultiple { factor, .. } => Some(factor),
        }
    }

    /// The rows whose contents change, in the order a worked solution would
    /// list them.
    pub fn affected_rows(&self) -> ArrayVec<[usize; 2]> {
        let mut rows = ArrayVec::new();

        match *self {
            RowOperation::Swap { first, second } => {
                rows.push(first);
                rows.push(second);
            },
            RowOperation::Scale { row, .. } => rows.push(row),
            RowOperation::AddMultiple { target, .. } => rows.push(target),
        }

        rows
    }

    /// Apply the operation, returning a new matrix.
    ///
    /// # Panics
    ///
    /// If the operation refers to a row the matrix doesn't have.
    pub fn apply<T>(&self, matrix: &Matrix<T>) -> Matrix<T>
    where
        T: Copy + From<i64> + Add<Output = T> + Mul<Output = T>,
    {
        let (rows, columns) = matrix.dimensions();
        for row in self.affected_rows().iter().chain(self.other_row().iter()) {
            assert!(
                *row < rows,
                "Row {} is out of bounds for a matrix with {} rows",
                row,
                rows
            );
        }

        match *self {
            RowOperation::Swap { first, second } => {
                Matrix::init(rows, columns, |row, column| {
                    let source = if row == first {
                        second
                    } else if row == second {
                        first
                    } else {
                        row
                    };

                    matrix[(source, column)]
                })
            },
            RowOperation::Scale { row: target, factor } => {
                let factor = T::from(factor);

                Matrix::init(rows, columns, |row, column| {
                    let value = matrix[(row, column)];

                    if row == target {
                        factor * value
                    } else {
                        value
                    }
                })
            },
            RowOperation::AddMultiple {
                target,
                source,
                factor,
            } => {
                let factor = T::from(factor);

                Matrix::init(rows, columns, |row, column| {
                    let value = matrix[(row, column)];

                    if row == target {
                        value + factor * matrix[(source, column)]
                    } else {
                        value
                    }
                })
            },
        }
    }
}

/// Shows the operation using 1-based row labels, e.g. `R1 <- R1 + (-2)R3`.
impl Display for RowOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            RowOperation::Swap { first, second } => {
                write!(f, "R{} <-> R{}", first + 1, second + 1)
            },
            RowOperation::Scale { row, factor } => {
                write!(f, "R{0} <- {1}R{0}", row + 1, Wrapped(factor))
            },
            RowOperation::AddMultiple {
                target,
                source,
                factor,
            } => write!(
                f,
                "R{0} <- R{0} + {1}R{2}",
                target + 1,
                Wrapped(factor),
                source + 1
            ),
        }
    }
}

/// Wrap negative numbers in parentheses.
struct Wrapped(i64);

impl Display for Wrapped {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            write!(f, "({})", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowOperationError {
    #[error("Row {row} can't be combined with itself")]
    SameRow { row: usize },
    #[error("Scaling a row by {factor} isn't allowed")]
    InvalidScaleFactor { factor: i64 },
    #[error("Adding zero times another row does nothing")]
    ZeroMultiple,
}
