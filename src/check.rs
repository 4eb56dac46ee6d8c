//! Checking a user's answer against a [`Problem`]'s canonical answer.

use crate::{
    generate::{Expected, Problem},
    input::CellInput,
    matrix::Matrix,
    rational::Rational,
};

/// The raw text a user entered.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<S> {
    /// A single value, for entry and determinant problems.
    Value(S),
    /// One piece of text per cell of the answer grid.
    Cells(Matrix<S>),
}

impl<S> From<Matrix<S>> for Submission<S> {
    fn from(cells: Matrix<S>) -> Self { Submission::Cells(cells) }
}

/// Which parts of an answer were right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correctness {
    Value(bool),
    Cells(Matrix<bool>),
}

impl Correctness {
    /// Is every cell (or the single value) correct?
    pub fn all_correct(&self) -> bool {
        match self {
            Correctness::Value(correct) => *correct,
            Correctness::Cells(cells) => {
                cells.cells().all(|(_, _, &correct)| correct)
            },
        }
    }

    /// The flag for one cell of a grid answer.
    pub fn cell(&self, row: usize, column: usize) -> Option<bool> {
        match self {
            Correctness::Value(_) => None,
            Correctness::Cells(cells) => cells.get(row, column).copied(),
        }
    }
}

/// Grade a submission.
///
/// Integer answers must be entered as whole numbers, while inverse answers
/// may be any fraction equal to the expected value (`2/4` matches `1/2`).
/// Empty, partial or unparsable text is simply marked as incorrect, as is a
/// submission of the wrong shape.
pub fn check<S>(problem: &Problem, submission: &Submission<S>) -> Correctness
where
    S: AsRef<str>,
{
    let correctness = match problem.expected() {
        Expected::Integer(expected) => {
            let correct = match submission {
                Submission::Value(text) => {
                    integer_matches(text.as_ref(), &expected)
                },
                Submission::Cells(_) => false,
            };
            Correctness::Value(correct)
        },
        Expected::Integers(expected) => {
            Correctness::Cells(grade_cells(
                expected,
                submission,
                integer_matches,
            ))
        },
        Expected::Rationals(expected) => Correctness::Cells(grade_cells(
            expected,
            submission,
            rational_matches,
        )),
    };

    tracing::debug!(
        operation = %problem.operation(),
        all_correct = correctness.all_correct(),
        "Checked an answer"
    );

    correctness
}

fn grade_cells<T, S, F>(
    expected: &Matrix<T>,
    submission: &Submission<S>,
    matches: F,
) -> Matrix<bool>
where
    S: AsRef<str>,
    F: Fn(&str, &T) -> bool,
{
    let (rows, columns) = expected.dimensions();

    Matrix::init(rows, columns, |row, column| match submission {
        Submission::Cells(cells) => cells
            .get(row, column)
            .map(|text| matches(text.as_ref(), &expected[(row, column)]))
            .unwrap_or(false),
        Submission::Value(_) => false,
    })
}

fn integer_matches(text: &str, expected: &i64) -> bool {
    match CellInput::parse(text) {
        Ok(CellInput::Integer(value)) => value == *expected,
        _ => false,
    }
}

fn rational_matches(text: &str, expected: &Rational) -> bool {
    Rational::parse(text).map_or(false, |value| value == *expected)
}
