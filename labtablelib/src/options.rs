//! Rendering options for measurement tables.

use serde::{Deserialize, Serialize};

/// Optional parts of the rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOptions {
    /// Prepend a 1-based row counter column
    pub index_column: bool,
    /// Append the mean and standard error rows
    pub statistics_rows: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self::all()
    }
}

impl TableOptions {
    /// Index column and statistics rows (default)
    pub fn all() -> Self {
        Self {
            index_column: true,
            statistics_rows: true,
        }
    }

    /// Bare data rows only
    pub fn none() -> Self {
        Self {
            index_column: false,
            statistics_rows: false,
        }
    }

    /// Builder: set index column inclusion
    pub fn with_index_column(mut self, include: bool) -> Self {
        self.index_column = include;
        self
    }

    /// Builder: set statistics rows inclusion
    pub fn with_statistics_rows(mut self, include: bool) -> Self {
        self.statistics_rows = include;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default() {
        let opts = TableOptions::default();
        assert!(opts.index_column);
        assert!(opts.statistics_rows);
    }

    #[test]
    fn test_options_builder() {
        let opts = TableOptions::none().with_statistics_rows(true);
        assert!(!opts.index_column);
        assert!(opts.statistics_rows);
    }
}
