//! Rounding and display of measured values.
//!
//! Values are rounded half-to-even at the requested decimal position and
//! rendered in fixed point with `max(digit, 0)` fractional digits. The
//! period is then replaced by the locale decimal separator.

use serde::{Deserialize, Serialize};

use crate::error::LabtableError;
use crate::Result;

/// Decimal separator used when none is configured.
pub const DEFAULT_DECIMAL_SEPARATOR: char = ',';

/// Largest accepted rounding digit magnitude.
///
/// Every finite f64 is exhausted well before 10^±400.
pub const MAX_DIGIT: i32 = 400;

/// Reject rounding digits outside `-MAX_DIGIT..=MAX_DIGIT`.
pub fn check_digit(digit: i32) -> Result<i32> {
    if digit.unsigned_abs() > MAX_DIGIT.unsigned_abs() {
        return Err(LabtableError::DigitOutOfRange(digit));
    }
    Ok(digit)
}

/// Locale settings for rendering numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    /// Character placed between the integer and fractional part
    pub decimal_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            decimal_separator: DEFAULT_DECIMAL_SEPARATOR,
        }
    }
}

impl NumberFormat {
    /// Create a format with the default (comma) separator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the decimal separator
    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    /// Round `x` to `digit` and render it, or return `None` for an absent value.
    pub fn format(&self, x: Option<f64>, digit: i32) -> Result<Option<String>> {
        let Some(x) = x else {
            return Ok(None);
        };
        if !x.is_finite() {
            return Err(LabtableError::non_numeric(x, "value formatting"));
        }
        check_digit(digit)?;

        let precision = digit.max(0) as usize;
        let rendered = format!("{:.*}", precision, round_to_digit(x, digit));
        if self.decimal_separator == '.' {
            return Ok(Some(rendered));
        }
        Ok(Some(rendered.replace('.', &self.decimal_separator.to_string())))
    }
}

/// Round `x` half-to-even at decimal position `digit`.
///
/// Positive positions count digits after the point, zero and negative
/// positions round into the integer part (`-1` rounds to tens). Negative
/// zero results are normalised to zero.
pub fn round_to_digit(x: f64, digit: i32) -> f64 {
    // past MAX_DIGIT the scale is infinite either way
    let magnitude = digit.unsigned_abs().min(MAX_DIGIT.unsigned_abs() + 1) as i32;
    let scale = 10f64.powi(magnitude);
    let rounded = if digit >= 0 {
        let scaled = x * scale;
        if !scaled.is_finite() {
            // already finer than the requested position
            return x;
        }
        scaled.round_ties_even() / scale
    } else {
        if !scale.is_finite() {
            return 0.0;
        }
        (x / scale).round_ties_even() * scale
    };
    rounded + 0.0
}

/// Render `x` at `digit` with the default number format.
///
/// ```rust
/// use labtablelib::format_value;
///
/// assert_eq!(format_value(Some(1.5), 1).unwrap().as_deref(), Some("1,5"));
/// assert_eq!(format_value(Some(82.33), -1).unwrap().as_deref(), Some("80"));
/// assert_eq!(format_value(None, 3).unwrap(), None);
/// ```
pub fn format_value(x: Option<f64>, digit: i32) -> Result<Option<String>> {
    NumberFormat::default().format(x, digit)
}
