//! Random problem generation.

use crate::{
    config::{ConfigError, GeneratorConfig},
    inverse::{Inverse, NotInvertible},
    matrix::{Matrix, MAX_ORDER},
    rational::Rational,
    row_ops::{RowOperation, RowOperationKind},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use smol_str::SmolStr;
use std::{
    fmt::{self, Display, Formatter},
    ops::RangeInclusive,
    str::FromStr,
};
use thiserror::Error;

/// Something which can hand out uniformly distributed integers.
pub trait RandomSource {
    /// Draw an integer uniformly from `range`, independently of previous
    /// draws.
    fn uniform(&mut self, range: RangeInclusive<i64>) -> i64;

    /// Pick an index in `0..len`.
    fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "Can't pick from an empty collection");
        self.uniform(0..=len as i64 - 1) as usize
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T
    where
        Self: Sized,
    {
        &items[self.index(items.len())]
    }
}

impl<R: Rng> RandomSource for R {
    fn uniform(&mut self, range: RangeInclusive<i64>) -> i64 {
        self.gen_range(range)
    }
}

/// The kinds of problem which can be generated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    Entry,
    Add,
    Subtract,
    ScalarMultiply,
    Multiply,
    Determinant,
    Inverse,
    RowOperation,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::Entry,
        Operation::Add,
        Operation::Subtract,
        Operation::ScalarMultiply,
        Operation::Multiply,
        Operation::Determinant,
        Operation::Inverse,
        Operation::RowOperation,
    ];

    /// The short name used when parsing and displaying an [`Operation`].
    pub fn name(self) -> &'static str {
        match self {
            Operation::Entry => "entry",
            Operation::Add => "add",
            Operation::Subtract => "sub",
            Operation::ScalarMultiply => "scalar",
            Operation::Multiply => "mul",
            Operation::Determinant => "det",
            Operation::Inverse => "inv",
            Operation::RowOperation => "row",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownOperation { name: name.into() })
    }
}

/// Which kind of problem to ask for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Every [`Operation`] is equally likely.
    Random,
    Only(Operation),
}

impl From<Operation> for Mode {
    fn from(op: Operation) -> Self { Mode::Only(op) }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Random => f.write_str("random"),
            Mode::Only(op) => Display::fmt(op, f),
        }
    }
}

impl FromStr for Mode {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("random") {
            Ok(Mode::Random)
        } else {
            s.parse().map(Mode::Only)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"{name}\" isn't a known operation")]
pub struct UnknownOperation {
    pub name: SmolStr,
}

/// A single drill, complete with its canonical answer.
///
/// The answer is computed once when the problem is created, and is the only
/// thing answers are checked against.
#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    /// What is the value at (`row`, `column`)? Both are 1-based.
    Entry {
        matrix: Matrix<i64>,
        row: usize,
        column: usize,
        answer: i64,
    },
    Add {
        left: Matrix<i64>,
        right: Matrix<i64>,
        answer: Matrix<i64>,
    },
    Subtract {
        left: Matrix<i64>,
        right: Matrix<i64>,
        answer: Matrix<i64>,
    },
    ScalarMultiply {
        scalar: i64,
        matrix: Matrix<i64>,
        answer: Matrix<i64>,
    },
    Multiply {
        left: Matrix<i64>,
        right: Matrix<i64>,
        answer: Matrix<i64>,
    },
    Determinant {
        matrix: Matrix<i64>,
        answer: i64,
    },
    Inverse {
        matrix: Matrix<i64>,
        answer: Inverse,
    },
    RowOperation {
        matrix: Matrix<i64>,
        operation: RowOperation,
        answer: Matrix<i64>,
    },
}

/// A borrowed view of a [`Problem`]'s canonical answer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Expected<'a> {
    Integer(i64),
    Integers(&'a Matrix<i64>),
    Rationals(&'a Matrix<Rational>),
}

impl Problem {
    /// Ask for the (`row`, `column`) entry, using 1-based indices.
    ///
    /// # Panics
    ///
    /// If the position is outside the matrix.
    pub fn entry(matrix: Matrix<i64>, row: usize, column: usize) -> Self {
        assert!(row >= 1 && column >= 1, "Entry positions are 1-based");
        let answer = *matrix
            .get(row - 1, column - 1)
            .expect("The entry position is outside the matrix");

        Problem::Entry {
            matrix,
            row,
            column,
            answer,
        }
    }

    pub fn add(left: Matrix<i64>, right: Matrix<i64>) -> Self {
        let answer = left.clone() + right.clone();
        Problem::Add {
            left,
            right,
            answer,
        }
    }

    pub fn subtract(left: Matrix<i64>, right: Matrix<i64>) -> Self {
        let answer = left.clone() - right.clone();
        Problem::Subtract {
            left,
            right,
            answer,
        }
    }

    pub fn scalar_multiply(scalar: i64, matrix: Matrix<i64>) -> Self {
        let answer = matrix.scaled(scalar);
        Problem::ScalarMultiply {
            scalar,
            matrix,
            answer,
        }
    }

    pub fn multiply(left: Matrix<i64>, right: Matrix<i64>) -> Self {
        let answer = left.clone() * right.clone();
        Problem::Multiply {
            left,
            right,
            answer,
        }
    }

    pub fn determinant(matrix: Matrix<i64>) -> Self {
        let answer = matrix.determinant();
        Problem::Determinant { matrix, answer }
    }

    pub fn inverse(matrix: Matrix<i64>) -> Result<Self, NotInvertible> {
        let answer = matrix.inverse()?;
        Ok(Problem::Inverse { matrix, answer })
    }

    /// # Panics
    ///
    /// If the operation is one [`RowOperation::validate()`] rejects, or it
    /// refers to rows the matrix doesn't have.
    pub fn row_operation(matrix: Matrix<i64>, operation: RowOperation) -> Self {
        if let Err(e) = operation.validate() {
            panic!("\"{}\" isn't a usable row operation: {}", operation, e);
        }

        let answer = operation.apply(&matrix);
        Problem::RowOperation {
            matrix,
            operation,
            answer,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Problem::Entry { .. } => Operation::Entry,
            Problem::Add { .. } => Operation::Add,
            Problem::Subtract { .. } => Operation::Subtract,
            Problem::ScalarMultiply { .. } => Operation::ScalarMultiply,
            Problem::Multiply { .. } => Operation::Multiply,
            Problem::Determinant { .. } => Operation::Determinant,
            Problem::Inverse { .. } => Operation::Inverse,
            Problem::RowOperation { .. } => Operation::RowOperation,
        }
    }

    /// The first (and usually only) operand, `A`.
    pub fn operand(&self) -> &Matrix<i64> {
        match self {
            Problem::Entry { matrix, .. }
            | Problem::ScalarMultiply { matrix, .. }
            | Problem::Determinant { matrix, .. }
            | Problem::Inverse { matrix, .. }
            | Problem::RowOperation { matrix, .. } => matrix,
            Problem::Add { left, .. }
            | Problem::Subtract { left, .. }
            | Problem::Multiply { left, .. } => left,
        }
    }

    /// The right-hand operand, `B`, for binary operations.
    pub fn second_operand(&self) -> Option<&Matrix<i64>> {
        match self {
            Problem::Add { right, .. }
            | Problem::Subtract { right, .. }
            | Problem::Multiply { right, .. } => Some(right),
            _ => None,
        }
    }

    pub fn scalar(&self) -> Option<i64> {
        match *self {
            Problem::ScalarMultiply { scalar, .. } => Some(scalar),
            _ => None,
        }
    }

    pub fn expected(&self) -> Expected<'_> {
        match self {
            Problem::Entry { answer, .. }
            | Problem::Determinant { answer, .. } => Expected::Integer(*answer),
            Problem::Add { answer, .. }
            | Problem::Subtract { answer, .. }
            | Problem::ScalarMultiply { answer, .. }
            | Problem::Multiply { answer, .. }
            | Problem::RowOperation { answer, .. } => {
                Expected::Integers(answer)
            },
            Problem::Inverse { answer, .. } => {
                Expected::Rationals(answer.inverse())
            },
        }
    }

    /// The `(rows, columns)` of the answer grid, or `None` when the answer is
    /// a single number.
    pub fn answer_dimensions(&self) -> Option<(usize, usize)> {
        match self.expected() {
            Expected::Integer(_) => None,
            Expected::Integers(answer) => Some(answer.dimensions()),
            Expected::Rationals(answer) => Some(answer.dimensions()),
        }
    }
}

/// Creates random [`Problem`]s.
#[derive(Debug, Clone)]
pub struct Generator<R = StdRng> {
    config: GeneratorConfig,
    rng: R,
}

impl Generator<StdRng> {
    pub fn from_entropy() -> Self {
        Generator {
            config: GeneratorConfig::default(),
            rng: StdRng::from_entropy(),
        }
    }

    /// A generator which always produces the same sequence of problems.
    pub fn seeded(seed: u64) -> Self {
        Generator {
            config: GeneratorConfig::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: RandomSource> Generator<R> {
    pub fn new(config: GeneratorConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Generator { config, rng })
    }

    pub fn config(&self) -> &GeneratorConfig { &self.config }

    pub fn generate<M: Into<Mode>>(&mut self, mode: M) -> Problem {
        let operation = match mode.into() {
            Mode::Random => *self.rng.pick(&Operation::ALL),
            Mode::Only(operation) => operation,
        };

        let problem = match operation {
            Operation::Entry => self.entry(),
            Operation::Add => {
                let (left, right) = self.same_shape_pair();
                Problem::add(left, right)
            },
            Operation::Subtract => {
                let (left, right) = self.same_shape_pair();
                Problem::subtract(left, right)
            },
            Operation::ScalarMultiply => {
                let (rows, columns) = self.exercise_shape();
                let range = self.config.entry_range.clone();
                let matrix = self.matrix(rows, columns, range);
                let scalar = self.rng.uniform(self.config.scalar_range.clone());
                Problem::scalar_multiply(scalar, matrix)
            },
            Operation::Multiply => self.multiply(),
            Operation::Determinant => {
                let order = self.dimension(2);
                let range = self.config.entry_range.clone();
                Problem::determinant(self.matrix(order, order, range))
            },
            Operation::Inverse => self.inverse(),
            Operation::RowOperation => self.row_operation(),
        };

        tracing::debug!(
            %operation,
            dimensions = ?problem.operand().dimensions(),
            "Generated a new problem"
        );

        problem
    }

    fn entry(&mut self) -> Problem {
        let (rows, columns) = self.exercise_shape();
        let range = self.config.entry_range.clone();
        let matrix = self.matrix(rows, columns, range);
        let row = self.rng.index(rows) + 1;
        let column = self.rng.index(columns) + 1;

        Problem::entry(matrix, row, column)
    }

    fn same_shape_pair(&mut self) -> (Matrix<i64>, Matrix<i64>) {
        let (rows, columns) = self.exercise_shape();
        let range = self.config.entry_range.clone();

        (
            self.matrix(rows, columns, range.clone()),
            self.matrix(rows, columns, range),
        )
    }

    fn multiply(&mut self) -> Problem {
        let rows = self.dimension(1);
        let inner = self.dimension(if rows == 1 { 2 } else { 1 });
        let columns = self.dimension(if inner == 1 { 2 } else { 1 });
        let range = self.config.entry_range.clone();

        let left = self.matrix(rows, inner, range.clone());
        let right = self.matrix(inner, columns, range);

        Problem::multiply(left, right)
    }

    fn inverse(&mut self) -> Problem {
        let order = self.dimension(2);
        let range = self.config.invertible_entry_range.clone();

        for attempt in 0..self.config.max_invertible_rejection_attempts {
            let matrix = self.matrix(order, order, range.clone());

            if matrix.determinant() == 0 {
                tracing::trace!(attempt, "Rejected a singular matrix");
                continue;
            }

            if let Ok(problem) = Problem::inverse(matrix) {
                return problem;
            }
        }

        tracing::warn!(
            attempts = self.config.max_invertible_rejection_attempts,
            order,
            "Unable to draw an invertible matrix, falling back to a known one"
        );

        Problem::inverse(unit_upper_triangular(order))
            .expect("A unit upper triangular matrix always has an inverse")
    }

    fn row_operation(&mut self) -> Problem {
        let rows = self.dimension(2);
        let columns = self.dimension(2);
        let range = self.config.row_operation_entry_range.clone();
        let matrix = self.matrix(rows, columns, range);

        let operation = match *self.rng.pick(&RowOperationKind::ALL) {
            RowOperationKind::Swap => {
                let (first, second) = self.distinct_rows(rows);
                RowOperation::Swap { first, second }
            },
            RowOperationKind::Scale => RowOperation::Scale {
                row: self.rng.index(rows),
                factor: *self.rng.pick(&self.config.row_op_scale_coefficients),
            },
            RowOperationKind::Add => {
                let (target, source) = self.distinct_rows(rows);
                RowOperation::AddMultiple {
                    target,
                    source,
                    factor: *self
                        .rng
                        .pick(&self.config.row_op_add_coefficients),
                }
            },
        };

        Problem::row_operation(matrix, operation)
    }

    /// Pick a shape for an element-wise exercise, never generating a 1x1
    /// matrix.
    fn exercise_shape(&mut self) -> (usize, usize) {
        let rows = self.dimension(1);
        let columns = self.dimension(if rows == 1 { 2 } else { 1 });

        (rows, columns)
    }

    /// Pick a dimension between `min` and [`MAX_ORDER`].
    fn dimension(&mut self, min: usize) -> usize {
        self.rng.uniform(min as i64..=MAX_ORDER as i64) as usize
    }

    /// Pick two different row indices, each pair being equally likely.
    fn distinct_rows(&mut self, rows: usize) -> (usize, usize) {
        let first = self.rng.index(rows);
        let mut second = self.rng.index(rows - 1);

        if second >= first {
            second += 1;
        }

        (first, second)
    }

    fn matrix(
        &mut self,
        rows: usize,
        columns: usize,
        range: RangeInclusive<i64>,
    ) -> Matrix<i64> {
        let rng = &mut self.rng;
        Matrix::init(rows, columns, |_, _| rng.uniform(range.clone()))
    }
}

/// A matrix with ones on and above the diagonal, which always has a
/// determinant of 1.
fn unit_upper_triangular(order: usize) -> Matrix<i64> {
    Matrix::init(order, order, |row, column| if column >= row { 1 } else { 0 })
}

/// Generate a single problem, optionally from a fixed seed so the result is
/// reproducible.
pub fn generate<M: Into<Mode>>(mode: M, seed: Option<u64>) -> Problem {
    let mut generator = match seed {
        Some(seed) => Generator::seeded(seed),
        None => Generator::from_entropy(),
    };

    generator.generate(mode)
}
