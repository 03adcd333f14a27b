//! Location of the first significant digit of a number.
//!
//! The position is counted from the decimal point: `1` is the first digit
//! after the point, `0` the units digit, `-1` the tens digit and so on.
//! Rounding a value to that position keeps exactly one significant digit,
//! which is how the standard error drives the precision of a column.

use crate::error::LabtableError;
use crate::Result;

/// Find the decimal position of the first nonzero digit of `x`.
///
/// Returns `None` when `x` is absent and `Some(0)` for zero. The sign of
/// `x` is ignored.
///
/// ```rust
/// use labtablelib::first_significant_digit;
///
/// assert_eq!(first_significant_digit(Some(0.052)).unwrap(), Some(2));
/// assert_eq!(first_significant_digit(Some(146.0)).unwrap(), Some(-2));
/// assert_eq!(first_significant_digit(None).unwrap(), None);
/// ```
pub fn first_significant_digit(x: Option<f64>) -> Result<Option<i32>> {
    let Some(x) = x else {
        return Ok(None);
    };
    if !x.is_finite() {
        return Err(LabtableError::non_numeric(x, "significant digit lookup"));
    }
    if x == 0.0 {
        return Ok(Some(0));
    }

    // Display for f64 is the shortest round-trip form and never uses an exponent
    let repr = x.abs().to_string();
    let point = repr.find('.').unwrap_or(repr.len());
    let Some(first) = repr
        .chars()
        .filter(|c| *c != '.')
        .position(|c| c != '0')
    else {
        return Ok(Some(0));
    };

    Ok(Some(first as i32 - point as i32 + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locate(x: f64) -> i32 {
        first_significant_digit(Some(x)).unwrap().unwrap()
    }

    #[test]
    fn test_reference_sequence() {
        let values = [
            0.0, 6.0, 12.0, 146.0, 19023.0, -0.052, 0.28, 0.000197, 0.8392, 0.00720,
        ];
        let positions: Vec<i32> = values.iter().map(|&x| locate(x)).collect();
        assert_eq!(positions, vec![0, 0, -1, -2, -4, 2, 1, 4, 1, 3]);
    }

    #[test]
    fn test_absent_and_zero() {
        assert_eq!(first_significant_digit(None).unwrap(), None);
        assert_eq!(first_significant_digit(Some(0.0)).unwrap(), Some(0));
        assert_eq!(first_significant_digit(Some(-0.0)).unwrap(), Some(0));
    }

    #[test]
    fn test_sign_independent() {
        for x in [0.3, 7.5, 1234.0, 0.00042, 98.6] {
            assert_eq!(locate(x), locate(-x), "sign changed position of {x}");
        }
    }

    #[test]
    fn test_magnitude_ordering() {
        assert!(locate(1.0) <= 1);
        assert!(locate(9.99) <= 1);
        assert!(locate(250.0) <= 1);
        assert!(locate(0.9) >= 1);
        assert!(locate(0.09) > locate(0.9));
        assert!(locate(0.0009) > locate(0.09));
    }

    #[test]
    fn test_extreme_magnitudes() {
        assert_eq!(locate(1e-5), 5);
        assert_eq!(locate(3.2e-9), 9);
        assert_eq!(locate(1e20), -20);
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(first_significant_digit(Some(f64::NAN)).is_err());
        assert!(first_significant_digit(Some(f64::INFINITY)).is_err());
    }
}
