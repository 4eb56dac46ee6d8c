//! An exact-arithmetic engine for linear algebra drills.
//!
//! Problems (entry lookup, addition, subtraction, scalar multiplication,
//! matrix products, determinants, inverses and elementary row operations)
//! are generated with their canonical answer already worked out, and a
//! user's raw text can then be checked against it cell by cell. Inverses are
//! computed with [`Rational`]s so fractions like `2/4` compare exactly.
//!
//! ```rust
//! use matrix_drill::{check, Generator, Operation, Submission};
//!
//! let mut generator = Generator::seeded(42);
//! let problem = generator.generate(Operation::Determinant);
//!
//! let correctness = check(&problem, &Submission::Value("0"));
//! println!("all correct? {}", correctness.all_correct());
//! ```

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

mod check;
mod config;
mod generate;
mod input;
mod inverse;
mod matrix;
mod rational;
mod row_ops;

pub use check::{check, Correctness, Submission};
pub use config::{
    ConfigError, GeneratorConfig, ENTRY_RANGE, INVERTIBLE_ENTRY_RANGE,
    MAX_INVERTIBLE_REJECTION_ATTEMPTS, ROW_OPERATION_ENTRY_RANGE,
    ROW_OP_ADD_COEFFICIENTS, ROW_OP_SCALE_COEFFICIENTS, SCALAR_RANGE,
};
pub use generate::{
    generate, Expected, Generator, Mode, Operation, Problem, RandomSource,
    UnknownOperation,
};
pub use input::{CellInput, FractionBounds, FractionEditor, NormalizeMode};
pub use inverse::{cofactors, invert, invert_exact, Inverse, NotInvertible};
pub use matrix::{Matrix, MAX_ORDER};
pub use rational::{ParseRationalError, Rational};
pub use row_ops::{RowOperation, RowOperationError, RowOperationKind};
