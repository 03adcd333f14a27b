//! Measurement file loading

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use labtablelib::{LabTable, Quantity};
use serde::Deserialize;

/// One quantity's observations as stored in the input file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeasurementColumn {
    pub quantity: String,
    pub unit: String,
    #[serde(default)]
    pub values: Vec<Option<f64>>,
    /// Fixed rounding digit; derived from the standard error when missing
    #[serde(default)]
    pub digit: Option<i32>,
}

/// Input file: `{"columns": [{"quantity": "t", "unit": "s", "values": [1.2, null]}]}`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeasurementFile {
    pub columns: Vec<MeasurementColumn>,
}

impl MeasurementFile {
    /// Parse measurements from JSON text
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid measurement file")
    }

    /// Read measurements from `path`, or from stdin when `path` is `-`
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let text = if path == "-" {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read measurements from stdin")?;
            text
        } else {
            std::fs::read_to_string(Path::new(path))
                .with_context(|| format!("failed to read file '{path}'"))?
        };
        Self::from_json(&text)
    }

    /// Build the validated table
    pub fn into_table(self) -> labtablelib::Result<LabTable> {
        let mut quantities = Vec::with_capacity(self.columns.len());
        let mut data = Vec::with_capacity(self.columns.len());
        let mut digits = Vec::with_capacity(self.columns.len());
        for column in self.columns {
            quantities.push(Quantity::new(column.quantity, column.unit));
            data.push(column.values);
            digits.push(column.digit);
        }
        LabTable::new(quantities, data, Some(digits))
    }
}
