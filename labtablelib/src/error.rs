//! Error types for labtablelib

use thiserror::Error;

/// Errors that can occur while building or rendering a measurement table
#[derive(Error, Debug)]
pub enum LabtableError {
    /// No quantity/unit pairs were given
    #[error("empty input given: no quantities")]
    EmptyQuantities,

    /// No data columns were given
    #[error("empty input given: no data columns")]
    EmptyData,

    /// The same quantity name appears twice in the quantity map
    #[error("quantity '{0}' is listed more than once")]
    DuplicateQuantity(String),

    /// Quantity map and dataset disagree on the number of columns
    #[error("{quantities} quantities given but data has {columns} columns")]
    ColumnCountMismatch { quantities: usize, columns: usize },

    /// Rounding digit vector has the wrong length
    #[error("{found} rounding digits given but data has {expected} columns")]
    RoundingDigitsMismatch { expected: usize, found: usize },

    /// A value is present but is not a finite number
    #[error("non-numeric value {value} in {context}")]
    NonNumeric { value: f64, context: String },

    /// A rounding digit too far from the decimal point to mean anything for f64
    #[error("rounding digit {0} is outside -400..=400")]
    DigitOutOfRange(i32),

    /// A column has no present values, so mean and standard error are undefined
    #[error("column {} has no values to compute statistics from", .index + 1)]
    EmptyColumn { index: usize },

    /// A table template is malformed
    #[error("invalid table template: {0}")]
    InvalidTemplate(String),

    /// Writing rendered lines to the sink failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LabtableError {
    /// Whether this error stems from malformed or mismatched input.
    ///
    /// Everything except sink failures is an input error.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, LabtableError::Io(_))
    }

    pub(crate) fn non_numeric(value: f64, context: impl Into<String>) -> Self {
        LabtableError::NonNumeric {
            value,
            context: context.into(),
        }
    }
}
