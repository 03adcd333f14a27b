//! Per-column descriptive statistics.
//!
//! For every column the engine computes the mean and the standard error
//! of the present values, then resolves the rounding digit: an explicit
//! digit wins, otherwise the position of the first significant digit of
//! the standard error is used. Mean and standard error are then shown at
//! that same precision.
//!
//! Numeric results ([`Statistics`]) and their display form
//! ([`RenderedStatistics`]) are separate values, so statistics can be
//! recomputed and re-rendered any number of times.

use serde::{Deserialize, Serialize};

use crate::data::Dataset;
use crate::digits::first_significant_digit;
use crate::error::LabtableError;
use crate::format::NumberFormat;
use crate::Result;

/// Numeric statistics of a single column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    /// Number of present values
    pub count: usize,
    /// Arithmetic mean of the present values
    pub mean: f64,
    /// Population standard deviation divided by `sqrt(count)`
    pub standard_error: f64,
    /// Resolved rounding digit
    pub digit: i32,
    /// Whether `digit` was supplied by the caller rather than derived
    pub explicit_digit: bool,
}

impl ColumnStatistics {
    /// Compute statistics over the present values of a column.
    ///
    /// Returns `None` when the column has no present values.
    pub fn from_values(values: &[Option<f64>], digit: Option<i32>) -> Result<Option<Self>> {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        if let Some(bad) = present.iter().find(|x| !x.is_finite()) {
            return Err(LabtableError::non_numeric(*bad, "statistics input"));
        }
        if present.is_empty() {
            return Ok(None);
        }

        let count = present.len();
        let n = count as f64;
        let mean = present.iter().sum::<f64>() / n;
        let variance = present.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let mut standard_error = variance.sqrt() / n.sqrt();
        // summation error of identical values, not a real spread
        if standard_error <= f64::EPSILON * mean.abs() * n {
            standard_error = 0.0;
        }

        let (digit, explicit_digit) = match digit {
            Some(d) => (d, true),
            None => (
                first_significant_digit(Some(standard_error))?.unwrap_or_default(),
                false,
            ),
        };

        Ok(Some(Self {
            count,
            mean,
            standard_error,
            digit,
            explicit_digit,
        }))
    }
}

/// Display strings for the statistics of every column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedStatistics {
    /// Rounded means, one per column
    pub means: Vec<String>,
    /// Rounded standard errors, one per column
    pub standard_errors: Vec<String>,
}

/// Numeric statistics for all columns of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    columns: Vec<ColumnStatistics>,
}

impl Statistics {
    /// Per-column statistics in column order
    pub fn columns(&self) -> &[ColumnStatistics] {
        &self.columns
    }

    /// Resolved rounding digit of every column
    pub fn digits(&self) -> Vec<i32> {
        self.columns.iter().map(|c| c.digit).collect()
    }

    /// Round means and standard errors at each column's digit.
    pub fn render(&self, format: &NumberFormat) -> Result<RenderedStatistics> {
        let mut means = Vec::with_capacity(self.columns.len());
        let mut standard_errors = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            means.push(format.format(Some(column.mean), column.digit)?.unwrap_or_default());
            standard_errors.push(
                format
                    .format(Some(column.standard_error), column.digit)?
                    .unwrap_or_default(),
            );
        }
        Ok(RenderedStatistics {
            means,
            standard_errors,
        })
    }
}

/// Compute statistics for every column of `dataset`.
///
/// `digits` holds one optional explicit rounding digit per column. Columns
/// without any present value are rejected, since their mean is undefined.
pub fn compute_statistics(dataset: &Dataset, digits: &[Option<i32>]) -> Result<Statistics> {
    if digits.len() != dataset.column_count() {
        return Err(LabtableError::RoundingDigitsMismatch {
            expected: dataset.column_count(),
            found: digits.len(),
        });
    }

    let columns = dataset
        .columns()
        .iter()
        .zip(digits)
        .enumerate()
        .map(|(index, (values, digit))| -> Result<ColumnStatistics> {
            let stats = ColumnStatistics::from_values(values, *digit)?
                .ok_or(LabtableError::EmptyColumn { index })?;
            tracing::debug!(
                column = index,
                count = stats.count,
                mean = stats.mean,
                standard_error = stats.standard_error,
                digit = stats.digit,
                explicit = stats.explicit_digit,
                "resolved column precision"
            );
            Ok(stats)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Statistics { columns })
}
