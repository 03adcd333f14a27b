//! Input data structures: quantities and padded measurement columns.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::LabtableError;
use crate::Result;

/// A measured physical quantity and the unit it is expressed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    /// Quantity name shown in the header (e.g. "t")
    pub name: String,
    /// Unit shown next to the name (e.g. "s")
    pub unit: String,
}

impl Quantity {
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
        }
    }
}

impl<N: Into<String>, U: Into<String>> From<(N, U)> for Quantity {
    fn from((name, unit): (N, U)) -> Self {
        Quantity::new(name, unit)
    }
}

/// Check that quantities form a non-empty name → unit mapping.
pub(crate) fn validate_quantities(quantities: &[Quantity]) -> Result<()> {
    if quantities.is_empty() {
        return Err(LabtableError::EmptyQuantities);
    }
    let mut seen = HashSet::new();
    for quantity in quantities {
        if !seen.insert(quantity.name.as_str()) {
            return Err(LabtableError::DuplicateQuantity(quantity.name.clone()));
        }
    }
    Ok(())
}

/// Measurement columns, right-padded with absent values to a common length.
///
/// Each column holds the observations of one quantity. `None` marks a
/// missing observation and is distinct from a measured zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    columns: Vec<Vec<Option<f64>>>,
    rows: usize,
}

impl Dataset {
    /// Validate and pad raw columns.
    ///
    /// Fails when there are no columns or when a present value is not a
    /// finite number. Empty columns are allowed.
    pub fn new(mut columns: Vec<Vec<Option<f64>>>) -> Result<Self> {
        if columns.is_empty() {
            return Err(LabtableError::EmptyData);
        }

        for (index, column) in columns.iter().enumerate() {
            if let Some((row, value)) = column
                .iter()
                .enumerate()
                .find_map(|(row, v)| v.filter(|x| !x.is_finite()).map(|x| (row, x)))
            {
                return Err(LabtableError::non_numeric(
                    value,
                    format!("column {}, row {}", index + 1, row + 1),
                ));
            }
        }

        let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
        for column in &mut columns {
            column.resize(rows, None);
        }

        Ok(Self { columns, rows })
    }

    /// Number of columns (quantities)
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows after padding (length of the longest input column)
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// All padded columns
    pub fn columns(&self) -> &[Vec<Option<f64>>] {
        &self.columns
    }

    /// One padded column
    pub fn column(&self, index: usize) -> Option<&[Option<f64>]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Values of observation `row` across all columns
    pub fn row(&self, row: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        self.columns
            .iter()
            .map(move |column| column.get(row).copied().flatten())
    }
}
