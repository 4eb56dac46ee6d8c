//! Exact fractions.

use crate::input::CellInput;
use smol_str::SmolStr;
use std::{
    convert::TryFrom,
    fmt::{self, Display, Formatter},
    ops::{Add, Div, Mul, Neg, Sub},
    str::FromStr,
};
use thiserror::Error;

/// A fraction which is always kept in lowest terms with a positive
/// denominator, so two equal values are also structurally equal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    numerator: i64,
    denominator: i64,
}

impl Rational {
    pub const ZERO: Rational = Rational::from_integer(0);
    pub const ONE: Rational = Rational::from_integer(1);

    /// Create a new [`Rational`], moving the sign onto the numerator and
    /// dividing out any common factors.
    ///
    /// # Panics
    ///
    /// If `denominator` is zero, or the reduced fraction doesn't fit in an
    /// `i64` (only possible when one side is `i64::MIN`).
    pub fn new(numerator: i64, denominator: i64) -> Self {
        assert!(denominator != 0, "A rational can't have a zero denominator");

        Rational::checked_new(numerator, denominator)
            .expect("The reduced fraction overflowed an i64")
    }

    /// Like [`Rational::new()`], but returning `None` instead of panicking
    /// when the denominator is zero or the result would overflow.
    pub fn checked_new(numerator: i64, denominator: i64) -> Option<Self> {
        if denominator == 0 {
            return None;
        }

        let (mut numerator, mut denominator) =
            (i128::from(numerator), i128::from(denominator));
        if denominator < 0 {
            numerator = -numerator;
            denominator = -denominator;
        }
        let divisor = gcd(numerator, denominator);

        Some(Rational {
            numerator: i64::try_from(numerator / divisor).ok()?,
            denominator: i64::try_from(denominator / divisor).ok()?,
        })
    }

    pub const fn from_integer(value: i64) -> Self {
        Rational {
            numerator: value,
            denominator: 1,
        }
    }

    /// Parse an integer (`"-3"`) or fraction (`"2/4"`) literal.
    ///
    /// Empty text, a lone sign and zero denominators are all rejected, letting
    /// callers tell "nothing entered yet" apart from a real value.
    pub fn parse(text: &str) -> Result<Rational, ParseRationalError> {
        CellInput::parse(text)?.value()
    }

    pub fn numerator(self) -> i64 { self.numerator }

    pub fn denominator(self) -> i64 { self.denominator }

    pub fn is_zero(self) -> bool { self.numerator == 0 }

    /// Get the value as an integer, if the denominator is `1`.
    pub fn to_integer(self) -> Option<i64> {
        if self.denominator == 1 {
            Some(self.numerator)
        } else {
            None
        }
    }

    pub fn recip(self) -> Option<Rational> {
        if self.is_zero() {
            None
        } else {
            Some(Rational::new(self.denominator, self.numerator))
        }
    }

    pub fn checked_div(self, other: Rational) -> Option<Rational> {
        other.recip().map(|inverse| self * inverse)
    }

    /// The text shown to a user, `"n"` for whole numbers and `"n/d"`
    /// otherwise.
    pub fn to_display_text(self) -> SmolStr {
        match self.to_integer() {
            Some(whole) => SmolStr::new(whole.to_string()),
            None => {
                SmolStr::new(format!("{}/{}", self.numerator, self.denominator))
            },
        }
    }
}

/// Euclid's algorithm, treating `gcd(0, 0)` as `1` so it's always safe to
/// divide by.
fn gcd(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.abs(), b.abs());

    while b != 0 {
        let remainder = a % b;
        a = b;
        b = remainder;
    }

    if a == 0 {
        1
    } else {
        a
    }
}

impl Default for Rational {
    fn default() -> Self { Rational::ZERO }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self { Rational::from_integer(value) }
}

impl Add for Rational {
    type Output = Rational;

    fn add(self, rhs: Rational) -> Rational {
        Rational::new(
            self.numerator * rhs.denominator + rhs.numerator * self.denominator,
            self.denominator * rhs.denominator,
        )
    }
}

impl Sub for Rational {
    type Output = Rational;

    fn sub(self, rhs: Rational) -> Rational { self + -rhs }
}

impl Mul for Rational {
    type Output = Rational;

    fn mul(self, rhs: Rational) -> Rational {
        Rational::new(
            self.numerator * rhs.numerator,
            self.denominator * rhs.denominator,
        )
    }
}

impl Div for Rational {
    type Output = Rational;

    /// # Panics
    ///
    /// When dividing by zero. Use [`Rational::checked_div()`] if the divisor
    /// may be zero.
    fn div(self, rhs: Rational) -> Rational {
        self.checked_div(rhs)
            .expect("Attempted to divide a rational by zero")
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_text())
    }
}

impl FromStr for Rational {
    type Err = ParseRationalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Rational::parse(s) }
}

/// Reasons a piece of text can't be turned into a [`Rational`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseRationalError {
    #[error("Nothing was entered")]
    Empty,
    #[error("Only a sign was entered")]
    LoneSign,
    #[error("\"{text}\" is not a whole number")]
    InvalidNumber { text: SmolStr },
    #[error("The denominator can't be zero")]
    ZeroDenominator,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_sign_and_common_factors() {
        let got = Rational::new(6, -8);

        assert_eq!(got.numerator(), -3);
        assert_eq!(got.denominator(), 4);
    }

    #[test]
    fn zero_is_always_zero_over_one() {
        assert_eq!(Rational::new(0, -7), Rational::ZERO);
        assert_eq!(Rational::ZERO.denominator(), 1);
    }

    #[test]
    fn arithmetic_stays_exact() {
        let half = Rational::new(1, 2);
        let third = Rational::new(1, 3);

        assert_eq!(half + third, Rational::new(5, 6));
        assert_eq!(half - third, Rational::new(1, 6));
        assert_eq!(half * third, Rational::new(1, 6));
        assert_eq!(half / third, Rational::new(3, 2));
        assert_eq!(-half, Rational::new(-1, 2));
    }

    #[test]
    fn division_by_zero_is_checked() {
        assert_eq!(Rational::ONE.checked_div(Rational::ZERO), None);
        assert_eq!(Rational::ZERO.recip(), None);
    }

    #[test]
    #[should_panic]
    fn zero_denominator_is_a_caller_error() { let _ = Rational::new(1, 0); }

    #[test]
    fn parsed_fractions_compare_after_reduction() {
        let two_quarters = Rational::parse("2/4").unwrap();
        let one_half = Rational::parse("1/2").unwrap();

        assert_eq!(two_quarters, one_half);
    }

    #[test]
    fn parse_valid_literals() {
        let inputs = vec![
            ("3", Rational::from_integer(3)),
            ("-3", Rational::from_integer(-3)),
            ("  7 ", Rational::from_integer(7)),
            ("-3/5", Rational::new(-3, 5)),
            ("3/-6", Rational::new(-1, 2)),
            (" 10 / 4 ", Rational::new(5, 2)),
            ("0/9", Rational::ZERO),
        ];

        for (src, should_be) in inputs {
            let got = Rational::parse(src).unwrap();
            assert_eq!(got, should_be, "parsing {:?}", src);
        }
    }

    #[test]
    fn parse_rejects_incomplete_or_invalid_text() {
        assert_eq!(Rational::parse(""), Err(ParseRationalError::Empty));
        assert_eq!(Rational::parse("   "), Err(ParseRationalError::Empty));
        assert_eq!(Rational::parse("-"), Err(ParseRationalError::LoneSign));
        assert_eq!(
            Rational::parse("1/0"),
            Err(ParseRationalError::ZeroDenominator)
        );
        assert_eq!(
            Rational::parse("abc"),
            Err(ParseRationalError::InvalidNumber { text: "abc".into() })
        );
        assert!(Rational::parse("1.5").is_err());
        assert!(Rational::parse("1/2/3").is_err());
        assert!(Rational::parse("3/").is_err());
    }

    #[test]
    fn extreme_literals_never_panic() {
        assert_eq!(
            Rational::parse("-9223372036854775808/2"),
            Ok(Rational::from_integer(i64::MIN / 2))
        );
        assert_eq!(
            Rational::parse("-9223372036854775808/-2"),
            Ok(Rational::from_integer(1 << 62))
        );
        assert!(Rational::parse("1/-9223372036854775808").is_err());
        assert!(Rational::parse("-9223372036854775808/-1").is_err());
        assert_eq!(Rational::checked_new(i64::MIN, -1), None);
        assert_eq!(Rational::checked_new(3, 0), None);
    }

    #[test]
    fn display_text() {
        assert_eq!(Rational::from_integer(-4).to_display_text().as_str(), "-4");
        assert_eq!(Rational::new(4, 6).to_display_text().as_str(), "2/3");
        assert_eq!(Rational::new(1, -2).to_string(), "-1/2");
    }
}
