//! The numeric ranges problems are drawn from.

use std::ops::RangeInclusive;
use thiserror::Error;

/// Range for cells of entry, addition, subtraction, scalar, product and
/// determinant problems.
pub const ENTRY_RANGE: RangeInclusive<i64> = -10..=10;
/// Range for the scalar in `kA`.
pub const SCALAR_RANGE: RangeInclusive<i64> = -5..=5;
/// Range for the cells of a matrix to be inverted.
pub const INVERTIBLE_ENTRY_RANGE: RangeInclusive<i64> = -5..=5;
/// Range for the cells of a matrix a row operation is applied to.
pub const ROW_OPERATION_ENTRY_RANGE: RangeInclusive<i64> = -5..=5;
pub const ROW_OP_SCALE_COEFFICIENTS: [i64; 5] = [-3, -2, -1, 2, 3];
pub const ROW_OP_ADD_COEFFICIENTS: [i64; 6] = [-3, -2, -1, 1, 2, 3];
/// How many singular draws to throw away before using a known invertible
/// matrix instead.
pub const MAX_INVERTIBLE_REJECTION_ATTEMPTS: usize = 1000;

/// Tunable parameters for a [`crate::Generator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub entry_range: RangeInclusive<i64>,
    pub scalar_range: RangeInclusive<i64>,
    pub invertible_entry_range: RangeInclusive<i64>,
    pub row_operation_entry_range: RangeInclusive<i64>,
    pub row_op_scale_coefficients: Vec<i64>,
    pub row_op_add_coefficients: Vec<i64>,
    pub max_invertible_rejection_attempts: usize,
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ranges = [
            ("entry_range", &self.entry_range),
            ("scalar_range", &self.scalar_range),
            ("invertible_entry_range", &self.invertible_entry_range),
            ("row_operation_entry_range", &self.row_operation_entry_range),
        ];

        for &(name, range) in &ranges {
            if range.is_empty() {
                return Err(ConfigError::EmptyRange { name });
            }
        }

        check_coefficients(
            "row_op_scale_coefficients",
            &self.row_op_scale_coefficients,
            &[0, 1],
        )?;
        check_coefficients(
            "row_op_add_coefficients",
            &self.row_op_add_coefficients,
            &[0],
        )?;

        if self.max_invertible_rejection_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }

        Ok(())
    }
}

fn check_coefficients(
    name: &'static str,
    coefficients: &[i64],
    forbidden: &[i64],
) -> Result<(), ConfigError> {
    if coefficients.is_empty() {
        return Err(ConfigError::NoCoefficients { name });
    }

    match coefficients.iter().find(|c| forbidden.contains(c)) {
        Some(&value) => Err(ConfigError::ForbiddenCoefficient { name, value }),
        None => Ok(()),
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            entry_range: ENTRY_RANGE,
            scalar_range: SCALAR_RANGE,
            invertible_entry_range: INVERTIBLE_ENTRY_RANGE,
            row_operation_entry_range: ROW_OPERATION_ENTRY_RANGE,
            row_op_scale_coefficients: ROW_OP_SCALE_COEFFICIENTS.to_vec(),
            row_op_add_coefficients: ROW_OP_ADD_COEFFICIENTS.to_vec(),
            max_invertible_rejection_attempts:
                MAX_INVERTIBLE_REJECTION_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("The {name} range is empty")]
    EmptyRange { name: &'static str },
    #[error("At least one value is needed for {name}")]
    NoCoefficients { name: &'static str },
    #[error("{value} isn't allowed in {name}")]
    ForbiddenCoefficient { name: &'static str, value: i64 },
    #[error("At least one attempt is needed to find an invertible matrix")]
    NoAttempts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GeneratorConfig::default();

        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.entry_range, -10..=10);
        assert_eq!(config.max_invertible_rejection_attempts, 1000);
    }

    #[test]
    fn empty_ranges_are_rejected() {
        let config = GeneratorConfig {
            scalar_range: 5..=-5,
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyRange {
                name: "scalar_range"
            })
        );
    }

    #[test]
    fn no_op_scale_factors_are_rejected() {
        let config = GeneratorConfig {
            row_op_scale_coefficients: vec![2, 1],
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::ForbiddenCoefficient {
                name: "row_op_scale_coefficients",
                value: 1
            })
        );
    }

    #[test]
    fn zero_add_factor_is_rejected() {
        let config = GeneratorConfig {
            row_op_add_coefficients: vec![0],
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn attempts_must_be_positive() {
        let config = GeneratorConfig {
            max_invertible_rejection_attempts: 0,
            ..Default::default()
        };

        assert_eq!(config.validate(), Err(ConfigError::NoAttempts));
    }
}
