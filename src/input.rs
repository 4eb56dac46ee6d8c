//! Text entered by a user, before and after it becomes a number.

use crate::rational::{ParseRationalError, Rational};
use smol_str::SmolStr;
use std::ops::RangeInclusive;

/// What a single answer cell currently holds.
///
/// Fractions are kept exactly as typed (`2/4` stays `2/4`) and only reduced
/// when turned into a [`Rational`] with [`CellInput::value()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellInput {
    Empty,
    /// A `-` or `+` with nothing after it yet.
    PartialSign,
    Integer(i64),
    Fraction { numerator: i64, denominator: i64 },
}

impl CellInput {
    /// Classify some text typed into a cell.
    ///
    /// This is total over all input: anything which isn't one of the
    /// recognised states is reported as a [`ParseRationalError`].
    pub fn parse(text: &str) -> Result<CellInput, ParseRationalError> {
        let text = text.trim();

        match text {
            "" => return Ok(CellInput::Empty),
            "-" | "+" => return Ok(CellInput::PartialSign),
            _ => {},
        }

        match split_fraction(text) {
            Some((numerator, denominator)) => {
                let numerator = parse_integer(numerator)?;
                let denominator = parse_integer(denominator)?;

                if denominator == 0 {
                    Err(ParseRationalError::ZeroDenominator)
                } else {
                    Ok(CellInput::Fraction {
                        numerator,
                        denominator,
                    })
                }
            },
            None => parse_integer(text).map(CellInput::Integer),
        }
    }

    /// Has the user not finished entering a value yet?
    pub fn is_pending(self) -> bool {
        match self {
            CellInput::Empty | CellInput::PartialSign => true,
            CellInput::Integer(_) | CellInput::Fraction { .. } => false,
        }
    }

    /// Commit the input to a normalized [`Rational`].
    pub fn value(self) -> Result<Rational, ParseRationalError> {
        match self {
            CellInput::Empty => Err(ParseRationalError::Empty),
            CellInput::PartialSign => Err(ParseRationalError::LoneSign),
            CellInput::Integer(value) => Ok(Rational::from_integer(value)),
            CellInput::Fraction {
                numerator,
                denominator,
            } => Rational::checked_new(numerator, denominator).ok_or_else(
                || ParseRationalError::InvalidNumber {
                    text: SmolStr::new(format!(
                        "{}/{}",
                        numerator, denominator
                    )),
                },
            ),
        }
    }
}

fn split_fraction(text: &str) -> Option<(&str, &str)> {
    let slash = text.find('/')?;
    Some((&text[..slash], &text[slash + 1..]))
}

fn parse_integer(text: &str) -> Result<i64, ParseRationalError> {
    let text = text.trim();

    text.parse().map_err(|_| ParseRationalError::InvalidNumber {
        text: SmolStr::new(text),
    })
}

/// When a [`FractionEditor`] reduces the fraction it reports.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NormalizeMode {
    /// Keep the fraction as typed until [`FractionEditor::commit()`].
    OnCommit,
    /// Reduce after every keystroke.
    Live,
    /// Never reduce the reported text.
    Never,
}

impl Default for NormalizeMode {
    fn default() -> Self { NormalizeMode::OnCommit }
}

/// The values a [`FractionEditor`] will report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FractionBounds {
    pub numerator: RangeInclusive<i64>,
    pub denominator: RangeInclusive<i64>,
}

impl Default for FractionBounds {
    fn default() -> Self {
        FractionBounds {
            numerator: -99..=99,
            denominator: 1..=99,
        }
    }
}

/// A numerator/denominator pair being edited one field at a time.
///
/// The raw pair is retained verbatim across keystrokes so typing `2` then
/// `4` into the denominator of `1/_` doesn't get rewritten underneath the
/// user. Every edit returns the text to hand back to the surrounding form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FractionEditor {
    numerator: i64,
    denominator: i64,
    bounds: FractionBounds,
    mode: NormalizeMode,
}

impl FractionEditor {
    pub fn new(mode: NormalizeMode) -> Self {
        FractionEditor {
            numerator: 0,
            denominator: 1,
            bounds: FractionBounds::default(),
            mode,
        }
    }

    /// Start editing from some previously reported text. Anything which
    /// isn't a complete value starts from `0/1`.
    pub fn from_text(text: &str, mode: NormalizeMode) -> Self {
        let mut editor = FractionEditor::new(mode);

        match CellInput::parse(text) {
            Ok(CellInput::Integer(value)) => editor.numerator = value,
            Ok(CellInput::Fraction {
                numerator,
                denominator,
            }) => {
                editor.numerator = numerator;
                editor.denominator = denominator;
            },
            _ => {},
        }

        editor
    }

    /// # Panics
    ///
    /// If either range is empty, or the denominator bounds would allow zero
    /// or negative denominators.
    pub fn with_bounds(self, bounds: FractionBounds) -> Self {
        assert!(
            !bounds.numerator.is_empty() && !bounds.denominator.is_empty(),
            "Fraction bounds can't be empty"
        );
        assert!(
            *bounds.denominator.start() >= 1,
            "Denominators must be at least 1"
        );

        FractionEditor { bounds, ..self }
    }

    /// The pair exactly as entered, without clamping or reduction.
    pub fn raw(&self) -> (i64, i64) { (self.numerator, self.denominator) }

    pub fn set_numerator(&mut self, numerator: i64) -> SmolStr {
        self.numerator = numerator;
        self.report(false)
    }

    pub fn set_denominator(&mut self, denominator: i64) -> SmolStr {
        self.denominator = denominator;
        self.report(false)
    }

    /// Finish editing (e.g. the field lost focus), reducing the fraction
    /// unless the editor is in [`NormalizeMode::Never`].
    pub fn commit(&mut self) -> SmolStr {
        let (numerator, denominator) = self.reported_pair(true);
        self.numerator = numerator;
        self.denominator = denominator;

        pair_text(numerator, denominator)
    }

    /// The value currently shown, after clamping.
    pub fn value(&self) -> Rational {
        let (numerator, denominator) = self.clamped();
        Rational::new(numerator, denominator)
    }

    fn report(&self, committing: bool) -> SmolStr {
        let (numerator, denominator) = self.reported_pair(committing);
        pair_text(numerator, denominator)
    }

    fn reported_pair(&self, committing: bool) -> (i64, i64) {
        let normalize = match self.mode {
            NormalizeMode::Live => true,
            NormalizeMode::OnCommit => committing,
            NormalizeMode::Never => false,
        };

        if normalize {
            let value = self.value();
            (value.numerator(), value.denominator())
        } else {
            self.clamped()
        }
    }

    fn clamped(&self) -> (i64, i64) {
        (
            clamp(self.numerator, &self.bounds.numerator),
            clamp(self.denominator, &self.bounds.denominator),
        )
    }
}

impl Default for FractionEditor {
    fn default() -> Self { FractionEditor::new(NormalizeMode::default()) }
}

fn clamp(value: i64, range: &RangeInclusive<i64>) -> i64 {
    value.max(*range.start()).min(*range.end())
}

fn pair_text(numerator: i64, denominator: i64) -> SmolStr {
    if denominator == 1 {
        SmolStr::new(numerator.to_string())
    } else {
        SmolStr::new(format!("{}/{}", numerator, denominator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_cell_text() {
        let inputs = vec![
            ("", CellInput::Empty),
            ("  ", CellInput::Empty),
            ("-", CellInput::PartialSign),
            ("12", CellInput::Integer(12)),
            ("-4", CellInput::Integer(-4)),
            (
                "2/4",
                CellInput::Fraction {
                    numerator: 2,
                    denominator: 4,
                },
            ),
        ];

        for (src, should_be) in inputs {
            let got = CellInput::parse(src).unwrap();
            assert_eq!(got, should_be, "classifying {:?}", src);
        }
    }

    #[test]
    fn pending_cells_have_no_value() {
        for src in &["", "-", "+"] {
            let got = CellInput::parse(src).unwrap();

            assert!(got.is_pending());
            assert!(got.value().is_err());
        }
    }

    #[test]
    fn fractions_are_only_reduced_when_committed() {
        let got = CellInput::parse("6/-8").unwrap();

        assert_eq!(
            got,
            CellInput::Fraction {
                numerator: 6,
                denominator: -8
            }
        );
        assert_eq!(got.value(), Ok(Rational::new(-3, 4)));
    }

    #[test]
    fn editor_keeps_raw_pair_until_commit() {
        let mut editor = FractionEditor::new(NormalizeMode::OnCommit);

        assert_eq!(editor.set_numerator(2).as_str(), "2");
        assert_eq!(editor.set_denominator(4).as_str(), "2/4");
        assert_eq!(editor.raw(), (2, 4));

        assert_eq!(editor.commit().as_str(), "1/2");
        assert_eq!(editor.raw(), (1, 2));
        assert_eq!(editor.value(), Rational::new(1, 2));
    }

    #[test]
    fn live_editor_reduces_every_keystroke() {
        let mut editor = FractionEditor::new(NormalizeMode::Live);

        editor.set_numerator(3);
        let got = editor.set_denominator(9);

        assert_eq!(got.as_str(), "1/3");
        assert_eq!(editor.raw(), (3, 9));
    }

    #[test]
    fn never_mode_reports_unreduced_text_on_commit() {
        let mut editor = FractionEditor::from_text("4/6", NormalizeMode::Never);

        assert_eq!(editor.commit().as_str(), "4/6");
        assert_eq!(editor.value(), Rational::new(2, 3));
    }

    #[test]
    fn reported_values_are_clamped() {
        let mut editor = FractionEditor::default();

        editor.set_numerator(500);
        let got = editor.set_denominator(0);

        assert_eq!(got.as_str(), "99");
        assert_eq!(editor.raw(), (500, 0));
        assert_eq!(editor.value(), Rational::from_integer(99));
    }

    #[test]
    #[should_panic(expected = "Fraction bounds can't be empty")]
    fn empty_denominator_bounds_are_rejected() {
        let _ = FractionEditor::default().with_bounds(FractionBounds {
            numerator: -99..=99,
            denominator: 1..=0,
        });
    }

    #[test]
    fn custom_bounds_clamp_reported_values() {
        let mut editor = FractionEditor::default().with_bounds(FractionBounds {
            numerator: -9..=9,
            denominator: 2..=9,
        });

        editor.set_numerator(-20);
        let got = editor.set_denominator(1);

        assert_eq!(got.as_str(), "-9/2");
        assert_eq!(editor.value(), Rational::new(-9, 2));
    }

    #[test]
    fn overflowing_fractions_are_invalid_numbers() {
        let got = CellInput::parse("1/-9223372036854775808").unwrap();

        assert!(!got.is_pending());
        assert!(matches!(
            got.value(),
            Err(ParseRationalError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn unparsable_text_starts_from_zero() {
        let editor = FractionEditor::from_text("banana", NormalizeMode::Live);

        assert_eq!(editor.raw(), (0, 1));
    }
}
