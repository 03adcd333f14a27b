//! # labtablelib
//!
//! Results tables for repeated physical measurements, with per-column mean
//! and standard error shown at the precision the measurement justifies.
//!
//! ## Overview
//!
//! Each column holds the observations of one quantity. For every column the
//! library computes the mean and the standard error of the present values
//! and picks a rounding digit: the position of the standard error's first
//! significant digit, unless the caller fixes it. Data cells, means and
//! standard errors of a column are all rounded to that digit and rendered
//! with a locale decimal separator.
//!
//! - **Locator**: [`first_significant_digit`]
//! - **Formatter**: [`format_value`], [`NumberFormat`]
//! - **Statistics**: [`compute_statistics`], [`Statistics`]
//! - **Assembler**: [`LabTable`], rendering through a [`TableTemplate`]
//!
//! Missing observations are `None`, never zero. Rounding is half-to-even.
//!
//! ## Example
//!
//! ```rust
//! use labtablelib::{LabTable, Quantity, TableOptions};
//!
//! let table = LabTable::new(
//!     vec![Quantity::new("A", "B"), Quantity::new("C", "D")],
//!     vec![
//!         vec![Some(1.0), Some(2.0), Some(3.0)],
//!         vec![Some(155.0), Some(64.0), Some(28.0)],
//!     ],
//!     None,
//! )
//! .unwrap();
//!
//! let stats = table.statistics().unwrap();
//! assert_eq!(stats.digits(), vec![1, -1]);
//!
//! let lines = table.render_lines(&TableOptions::default()).unwrap();
//! assert!(lines.contains(&"$\\bar{x}$ & 2,0 & 80 \\\\".to_string()));
//! ```

pub mod data;
pub mod digits;
pub mod error;
pub mod format;
pub mod options;
pub mod stats;
pub mod table;
pub mod template;

pub use data::{Dataset, Quantity};
pub use digits::first_significant_digit;
pub use error::LabtableError;
pub use format::{check_digit, format_value, round_to_digit, NumberFormat, MAX_DIGIT};
pub use options::TableOptions;
pub use stats::{compute_statistics, ColumnStatistics, RenderedStatistics, Statistics};
pub use table::{LabTable, TableData, TableRow};
pub use template::TableTemplate;

/// Result type for labtablelib operations
pub type Result<T> = std::result::Result<T, LabtableError>;
