//! Markup template for the rendered table.
//!
//! The assembler never hardcodes markup: wrapper directives, rule markers,
//! cell delimiters and labels all come from a [`TableTemplate`]. The
//! default reproduces a LaTeX `tabular` inside a floating `table`.
//!
//! Preamble lines and the header cell are minijinja templates: preamble
//! lines see `colspec`, the header cell sees `quantity` and `unit`.
//! Templates deserialize from JSON with every field optional, so a
//! caller only overrides what differs from the default:
//!
//! ```rust
//! use labtablelib::TableTemplate;
//!
//! let template = TableTemplate::from_json(r#"{"missing": "--", "decimal_separator": "."}"#).unwrap();
//! assert_eq!(template.missing, "--");
//! assert_eq!(template.rule, "\\hline");
//! ```

use minijinja::{context, Environment};
use serde::{Deserialize, Serialize};

use crate::error::LabtableError;
use crate::format::{NumberFormat, DEFAULT_DECIMAL_SEPARATOR};
use crate::Result;

/// Stand-in quantity used to check that the header cell shows the name
const QUANTITY_SENTINEL: &str = "\u{1}quantity\u{1}";

fn render(source: &str, ctx: minijinja::Value) -> Result<String> {
    Environment::new()
        .render_str(source, ctx)
        .map_err(|e| LabtableError::InvalidTemplate(format!("'{source}': {e}")))
}

/// Markup tokens used to lay out a measurement table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableTemplate {
    /// Lines opening the table, rendered with `colspec`
    pub preamble: Vec<String>,
    /// Alignment token repeated once per column in `colspec`
    pub column_align: String,
    /// Separator placed around and between alignment tokens
    pub column_border: String,
    /// Horizontal rule line
    pub rule: String,
    /// Delimiter between cells of a row
    pub cell_separator: String,
    /// Appended to every row
    pub row_end: String,
    /// Header cell template, rendered with `quantity` and `unit`
    pub header_cell: String,
    /// Header of the row counter column
    pub index_header: String,
    /// Shown in place of a missing observation
    pub missing: String,
    /// Label of the mean row
    pub mean_label: String,
    /// Label of the standard error row
    pub error_label: String,
    /// Lines closing the table
    pub postamble: Vec<String>,
    /// Decimal separator for every rendered number
    pub decimal_separator: char,
}

impl Default for TableTemplate {
    fn default() -> Self {
        Self::latex()
    }
}

impl TableTemplate {
    /// LaTeX table with a `\tabh{quantity}{unit}` header macro.
    pub fn latex() -> Self {
        Self {
            preamble: vec![
                "\\begin{table}[!ht]".to_string(),
                "\\centering".to_string(),
                "\\begin{tabular}{ {{- colspec -}} }".to_string(),
            ],
            column_align: "r".to_string(),
            column_border: "|".to_string(),
            rule: "\\hline".to_string(),
            cell_separator: " & ".to_string(),
            row_end: " \\\\".to_string(),
            header_cell: "\\tabh{ {{- quantity -}} }{ {{- unit -}} }".to_string(),
            index_header: "\\#".to_string(),
            missing: " - ".to_string(),
            mean_label: "$\\bar{x}$".to_string(),
            error_label: "$\\sigma_0$".to_string(),
            postamble: vec![
                "\\end{tabular}".to_string(),
                "\\caption{}".to_string(),
                "\\label{tab:}".to_string(),
                "\\end{table}".to_string(),
            ],
            decimal_separator: DEFAULT_DECIMAL_SEPARATOR,
        }
    }

    /// Parse a template from JSON, filling unspecified fields from the default.
    pub fn from_json(json: &str) -> Result<Self> {
        let template: Self = serde_json::from_str(json)
            .map_err(|e| LabtableError::InvalidTemplate(e.to_string()))?;
        template.validate()?;
        Ok(template)
    }

    /// Check that every template renders and the header cell shows the quantity name.
    pub fn validate(&self) -> Result<()> {
        self.opening(1)?;
        if !self.header(QUANTITY_SENTINEL, "")?.contains(QUANTITY_SENTINEL) {
            return Err(LabtableError::InvalidTemplate(format!(
                "header_cell '{}' never shows {{{{ quantity }}}}",
                self.header_cell
            )));
        }
        Ok(())
    }

    /// Builder: set the decimal separator
    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    /// Number format carrying this template's decimal separator
    pub fn number_format(&self) -> NumberFormat {
        NumberFormat::new().with_decimal_separator(self.decimal_separator)
    }

    /// Column specification for `columns` columns, e.g. `|r|r|r|`.
    pub fn colspec(&self, columns: usize) -> String {
        let mut spec = self.column_border.clone();
        for _ in 0..columns {
            spec.push_str(&self.column_align);
            spec.push_str(&self.column_border);
        }
        spec
    }

    /// Preamble lines with the column specification filled in.
    pub fn opening(&self, columns: usize) -> Result<Vec<String>> {
        let colspec = self.colspec(columns);
        self.preamble
            .iter()
            .map(|line| render(line, context! { colspec => &colspec }))
            .collect()
    }

    /// Header cell for one quantity.
    pub fn header(&self, quantity: &str, unit: &str) -> Result<String> {
        render(&self.header_cell, context! { quantity => quantity, unit => unit })
    }

    /// Join cells into a finished row line.
    pub fn row(&self, cells: &[String]) -> String {
        let mut line = cells.join(&self.cell_separator);
        line.push_str(&self.row_end);
        line
    }
}
