//! Table assembly: from validated measurements to markup lines.
//!
//! The data flow is:
//! 1. `LabTable::new` validates quantities, columns and rounding digits
//! 2. Statistics are computed (they also decide each column's precision)
//! 3. `TableData` holds every display cell, ready for JSON or markup
//! 4. `TableData::to_lines` places the cells into the template
//!
//! Nothing is emitted until every cell has been rendered, so a failing
//! table never produces partial output.

use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::data::{validate_quantities, Dataset, Quantity};
use crate::error::LabtableError;
use crate::format::check_digit;
use crate::options::TableOptions;
use crate::stats::{compute_statistics, Statistics};
use crate::template::TableTemplate;
use crate::Result;

/// A single row of display cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Leading cell (row number, statistic label), when the table has a leading column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// One display cell per quantity
    pub values: Vec<String>,
}

impl TableRow {
    fn cells(&self) -> Vec<String> {
        self.label
            .iter()
            .cloned()
            .chain(self.values.iter().cloned())
            .collect()
    }
}

/// Table-ready measurement data.
///
/// Every value is already rounded and formatted; templates only place
/// the strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    /// Header row: quantity/unit cells, with the index header as label
    pub header: TableRow,
    /// One row per observation
    pub rows: Vec<TableRow>,
    /// Mean row, when statistics rows are enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<TableRow>,
    /// Standard error row, when statistics rows are enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_error: Option<TableRow>,
    /// Resolved rounding digit of every column
    pub digits: Vec<i32>,
}

impl TableData {
    /// Number of table columns including the leading column.
    pub fn column_count(&self) -> usize {
        self.header.values.len() + usize::from(self.header.label.is_some())
    }

    /// Lay the cells out as markup lines.
    pub fn to_lines(&self, template: &TableTemplate) -> Result<Vec<String>> {
        let mut lines = template.opening(self.column_count())?;
        lines.push(template.rule.clone());
        lines.push(template.row(&self.header.cells()));
        lines.push(template.rule.clone());
        lines.push(template.rule.clone());

        for row in &self.rows {
            lines.push(template.row(&row.cells()));
            lines.push(template.rule.clone());
        }

        if let (Some(mean), Some(error)) = (&self.mean, &self.standard_error) {
            lines.push(template.rule.clone());
            lines.push(template.row(&mean.cells()));
            lines.push(template.rule.clone());
            lines.push(template.row(&error.cells()));
            lines.push(template.rule.clone());
        }

        lines.extend(template.postamble.iter().cloned());
        Ok(lines)
    }
}

/// Measurements of several quantities, ready to be rendered as a table.
///
/// ```rust
/// use labtablelib::{LabTable, Quantity, TableOptions};
///
/// let table = LabTable::new(
///     vec![Quantity::new("t", "s"), Quantity::new("l", "m")],
///     vec![vec![Some(1.21), Some(1.19)], vec![Some(0.36)]],
///     None,
/// )
/// .unwrap();
///
/// let lines = table.render_lines(&TableOptions::default()).unwrap();
/// assert_eq!(lines[2], "\\begin{tabular}{|r|r|r|}");
/// assert!(lines.contains(&"2 & 1,190 &  -  \\\\".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct LabTable {
    quantities: Vec<Quantity>,
    dataset: Dataset,
    digits: Vec<Option<i32>>,
}

impl LabTable {
    /// Validate and take ownership of one table's measurements.
    ///
    /// `columns` holds one sequence of observations per quantity, in the
    /// same order; shorter columns are padded with absent values.
    /// `digits` optionally fixes the rounding digit of each column
    /// (`None` entries are derived from the standard error).
    pub fn new(
        quantities: Vec<Quantity>,
        columns: Vec<Vec<Option<f64>>>,
        digits: Option<Vec<Option<i32>>>,
    ) -> Result<Self> {
        validate_quantities(&quantities)?;
        let dataset = Dataset::new(columns)?;

        if quantities.len() != dataset.column_count() {
            return Err(LabtableError::ColumnCountMismatch {
                quantities: quantities.len(),
                columns: dataset.column_count(),
            });
        }

        let digits = match digits {
            Some(digits) if digits.len() != dataset.column_count() => {
                return Err(LabtableError::RoundingDigitsMismatch {
                    expected: dataset.column_count(),
                    found: digits.len(),
                });
            }
            Some(digits) => digits,
            None => vec![None; dataset.column_count()],
        };
        for digit in digits.iter().flatten() {
            check_digit(*digit)?;
        }

        tracing::debug!(
            columns = dataset.column_count(),
            rows = dataset.row_count(),
            explicit_digits = digits.iter().flatten().count(),
            "measurement table constructed"
        );

        Ok(Self {
            quantities,
            dataset,
            digits,
        })
    }

    pub fn quantities(&self) -> &[Quantity] {
        &self.quantities
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Rounding digits as supplied (`None` = derived)
    pub fn rounding_digits(&self) -> &[Option<i32>] {
        &self.digits
    }

    /// Compute per-column mean, standard error and resolved digit.
    pub fn statistics(&self) -> Result<Statistics> {
        compute_statistics(&self.dataset, &self.digits)
    }

    /// Build the display cells of the whole table.
    pub fn to_table(&self, template: &TableTemplate, options: &TableOptions) -> Result<TableData> {
        template.validate()?;
        let format = template.number_format();
        let statistics = self.statistics()?;
        let digits = statistics.digits();

        let leading = options.index_column || options.statistics_rows;
        let leading_cell = |text: String| leading.then_some(text);
        let index_cell = |text: String| {
            if options.index_column {
                text
            } else {
                String::new()
            }
        };

        let header = TableRow {
            label: leading_cell(index_cell(template.index_header.clone())),
            values: self
                .quantities
                .iter()
                .map(|q| template.header(&q.name, &q.unit))
                .collect::<Result<Vec<_>>>()?,
        };

        let mut rows = Vec::with_capacity(self.dataset.row_count());
        for i in 0..self.dataset.row_count() {
            let values = self
                .dataset
                .row(i)
                .zip(&digits)
                .map(|(value, &digit)| -> Result<String> {
                    Ok(format
                        .format(value, digit)?
                        .unwrap_or_else(|| template.missing.clone()))
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(TableRow {
                label: leading_cell(index_cell((i + 1).to_string())),
                values,
            });
        }

        let (mean, standard_error) = if options.statistics_rows {
            let rendered = statistics.render(&format)?;
            (
                Some(TableRow {
                    label: Some(template.mean_label.clone()),
                    values: rendered.means,
                }),
                Some(TableRow {
                    label: Some(template.error_label.clone()),
                    values: rendered.standard_errors,
                }),
            )
        } else {
            (None, None)
        };

        Ok(TableData {
            header,
            rows,
            mean,
            standard_error,
            digits,
        })
    }

    /// Render with the default LaTeX template.
    pub fn render_lines(&self, options: &TableOptions) -> Result<Vec<String>> {
        self.render_lines_with(&TableTemplate::default(), options)
    }

    /// Render with a custom template.
    pub fn render_lines_with(
        &self,
        template: &TableTemplate,
        options: &TableOptions,
    ) -> Result<Vec<String>> {
        self.to_table(template, options)?.to_lines(template)
    }

    /// Render and write the lines to `writer`, one per line.
    pub fn write_to<W: Write>(
        &self,
        mut writer: W,
        template: &TableTemplate,
        options: &TableOptions,
    ) -> Result<()> {
        for line in self.render_lines_with(template, options)? {
            writeln!(writer, "{line}")?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantities(names: &[&str]) -> Vec<Quantity> {
        names.iter().map(|n| Quantity::new(*n, "u")).collect()
    }

    fn small_table() -> LabTable {
        LabTable::new(
            vec![Quantity::new("A", "B"), Quantity::new("C", "D")],
            vec![
                vec![Some(1.0), Some(2.0), Some(3.0)],
                vec![Some(0.5), None],
            ],
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_empty_quantities() {
        let err = LabTable::new(vec![], vec![vec![Some(1.0)]], None).unwrap_err();
        assert!(matches!(err, LabtableError::EmptyQuantities));
    }

    #[test]
    fn test_rejects_empty_data() {
        let err = LabTable::new(quantities(&["A"]), vec![], None).unwrap_err();
        assert!(matches!(err, LabtableError::EmptyData));
    }

    #[test]
    fn test_rejects_column_count_mismatch() {
        let more_data = LabTable::new(
            quantities(&["A"]),
            vec![vec![Some(1.0), Some(2.0)], vec![Some(1.0), Some(2.0)]],
            None,
        );
        assert!(matches!(
            more_data,
            Err(LabtableError::ColumnCountMismatch {
                quantities: 1,
                columns: 2
            })
        ));

        let less_data = LabTable::new(quantities(&["A", "C"]), vec![vec![Some(1.0)]], None);
        assert!(matches!(
            less_data,
            Err(LabtableError::ColumnCountMismatch {
                quantities: 2,
                columns: 1
            })
        ));
    }

    #[test]
    fn test_rejects_digit_count_mismatch() {
        let too_many = LabTable::new(
            quantities(&["A"]),
            vec![vec![Some(1.0), Some(2.0)]],
            Some(vec![Some(-1), Some(5)]),
        );
        assert!(matches!(
            too_many,
            Err(LabtableError::RoundingDigitsMismatch {
                expected: 1,
                found: 2
            })
        ));

        let too_few = LabTable::new(
            quantities(&["A", "C"]),
            vec![vec![Some(1.0)], vec![Some(2.0)]],
            Some(vec![Some(5)]),
        );
        assert!(matches!(
            too_few,
            Err(LabtableError::RoundingDigitsMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_digit() {
        for digit in [i32::MIN, i32::MAX] {
            let err = LabTable::new(
                quantities(&["A"]),
                vec![vec![Some(12.0), Some(13.0)]],
                Some(vec![Some(digit)]),
            )
            .unwrap_err();
            assert!(matches!(err, LabtableError::DigitOutOfRange(d) if d == digit));
            assert!(err.is_invalid_input());
        }
    }

    #[test]
    fn test_rejects_duplicate_quantity() {
        let err = LabTable::new(
            quantities(&["A", "A"]),
            vec![vec![Some(1.0)], vec![Some(2.0)]],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, LabtableError::DuplicateQuantity(_)));
    }

    #[test]
    fn test_pads_and_keeps_digits() {
        let table = small_table();
        assert_eq!(table.dataset().row_count(), 3);
        assert_eq!(table.rounding_digits(), &[None::<i32>, None]);
    }

    #[test]
    fn test_full_latex_layout() {
        let lines = small_table().render_lines(&TableOptions::all()).unwrap();
        let expected = vec![
            "\\begin{table}[!ht]",
            "\\centering",
            "\\begin{tabular}{|r|r|r|}",
            "\\hline",
            "\\# & \\tabh{A}{B} & \\tabh{C}{D} \\\\",
            "\\hline",
            "\\hline",
            "1 & 1,0 & 0 \\\\",
            "\\hline",
            "2 & 2,0 &  -  \\\\",
            "\\hline",
            "3 & 3,0 &  -  \\\\",
            "\\hline",
            "\\hline",
            "$\\bar{x}$ & 2,0 & 0 \\\\",
            "\\hline",
            "$\\sigma_0$ & 0,5 & 0 \\\\",
            "\\hline",
            "\\end{tabular}",
            "\\caption{}",
            "\\label{tab:}",
            "\\end{table}",
        ];
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_without_index_or_statistics() {
        let lines = small_table().render_lines(&TableOptions::none()).unwrap();
        assert_eq!(lines[2], "\\begin{tabular}{|r|r|}");
        assert_eq!(lines[4], "\\tabh{A}{B} & \\tabh{C}{D} \\\\");
        assert_eq!(lines[7], "1,0 & 0 \\\\");
        assert!(!lines.iter().any(|l| l.contains("bar{x}")));
        assert_eq!(lines.len(), 4 + 3 + 6 + 4);
    }

    #[test]
    fn test_statistics_without_index_keep_label_column() {
        let table = small_table()
            .to_table(
                &TableTemplate::default(),
                &TableOptions::none().with_statistics_rows(true),
            )
            .unwrap();
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.header.label.as_deref(), Some(""));
        assert_eq!(table.rows[0].label.as_deref(), Some(""));
        assert_eq!(table.mean.unwrap().label.as_deref(), Some("$\\bar{x}$"));
    }

    #[test]
    fn test_rendering_twice_is_identical() {
        let table = small_table();
        let options = TableOptions::default();
        assert_eq!(
            table.render_lines(&options).unwrap(),
            table.render_lines(&options).unwrap()
        );
    }

    #[test]
    fn test_explicit_zero_digit_is_honoured() {
        let table = LabTable::new(
            quantities(&["A"]),
            vec![vec![Some(1.0), Some(2.0), Some(3.0)]],
            Some(vec![Some(0)]),
        )
        .unwrap();
        let data = table
            .to_table(&TableTemplate::default(), &TableOptions::default())
            .unwrap();
        assert_eq!(data.digits, vec![0]);
        assert_eq!(data.rows[0].values, vec!["1"]);
        assert_eq!(data.standard_error.unwrap().values, vec!["0"]);
    }

    #[test]
    fn test_all_absent_column_fails_without_output() {
        let table = LabTable::new(
            quantities(&["A", "C"]),
            vec![vec![Some(1.0)], vec![None]],
            None,
        )
        .unwrap();
        let mut sink = Vec::new();
        let err = table
            .write_to(&mut sink, &TableTemplate::default(), &TableOptions::default())
            .unwrap_err();
        assert!(matches!(err, LabtableError::EmptyColumn { index: 1 }));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_write_to_sink() {
        let mut sink = Vec::new();
        small_table()
            .write_to(&mut sink, &TableTemplate::default(), &TableOptions::none())
            .unwrap();
        let text = String::from_utf8(sink).unwrap();
        assert!(text.starts_with("\\begin{table}[!ht]\n"));
        assert!(text.ends_with("\\end{table}\n"));
    }

    #[test]
    fn test_custom_template() {
        let template = TableTemplate {
            missing: "n/a".to_string(),
            decimal_separator: '.',
            ..TableTemplate::default()
        };
        let lines = small_table()
            .render_lines_with(&template, &TableOptions::none())
            .unwrap();
        assert_eq!(lines[9], "2.0 & n/a \\\\");
    }
}
