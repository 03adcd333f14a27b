//! # labtable
//!
//! Command-line front end for labtablelib: turns a file of repeated
//! measurements into a LaTeX results table with mean and standard error.
//!
//! ## Usage
//!
//! ```bash
//! # Render measurements.json as a LaTeX table on stdout
//! labtable measurements.json
//!
//! # Read from stdin, no row counter, no statistics rows
//! cat measurements.json | labtable - --no-index --no-stats
//!
//! # Use a period as decimal separator and write to a file
//! labtable measurements.json -d . --out table.tex
//!
//! # Emit the table cells as JSON
//! labtable measurements.json --output json
//! ```
//!
//! Set `RUST_LOG=labtablelib=debug` to see the resolved precision of each column.

mod input;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use labtablelib::{TableOptions, TableTemplate};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::input::MeasurementFile;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("labtable")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Measurement tables with mean, standard error and significant-digit rounding")
        .arg(
            Arg::new("input")
                .help("Measurement file (JSON), or - for stdin")
                .default_value("-"),
        )
        .arg(
            Arg::new("no-index")
                .long("no-index")
                .action(ArgAction::SetTrue)
                .help("Omit the row counter column"),
        )
        .arg(
            Arg::new("no-stats")
                .long("no-stats")
                .action(ArgAction::SetTrue)
                .help("Omit the mean and standard error rows"),
        )
        .arg(
            Arg::new("template")
                .short('t')
                .long("template")
                .help("JSON file overriding template tokens"),
        )
        .arg(
            Arg::new("decimal-separator")
                .short('d')
                .long("decimal-separator")
                .help("Decimal separator (default: ,)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["latex", "json"])
                .default_value("latex")
                .help("Output format"),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .help("Write to this file instead of stdout"),
        )
}

/// Load the template file (if any) and apply the separator override
fn build_template(matches: &ArgMatches) -> anyhow::Result<TableTemplate> {
    let mut template = match matches.get_one::<String>("template") {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read template '{path}'"))?;
            TableTemplate::from_json(&json)?
        }
        None => TableTemplate::default(),
    };

    if let Some(separator) = matches.get_one::<String>("decimal-separator") {
        let mut chars = separator.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => template = template.with_decimal_separator(c),
            _ => {
                return Err(anyhow!(
                    "decimal separator must be a single character, got '{separator}'"
                ))
            }
        }
    }

    Ok(template)
}

/// Extract table options from matches
fn extract_options(matches: &ArgMatches) -> TableOptions {
    TableOptions::all()
        .with_index_column(!matches.get_flag("no-index"))
        .with_statistics_rows(!matches.get_flag("no-stats"))
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let input = matches
        .get_one::<String>("input")
        .map(|s| s.as_str())
        .unwrap_or("-");
    let template = build_template(matches)?;
    let options = extract_options(matches);
    let table = MeasurementFile::load(input)?.into_table()?;

    // nothing touches the sink until rendering has succeeded
    let rendered = match matches.get_one::<String>("output").map(|s| s.as_str()) {
        Some("json") => {
            let data = table.to_table(&template, &options)?;
            serde_json::to_string_pretty(&data)? + "\n"
        }
        _ => {
            let mut text = table.render_lines_with(&template, &options)?.join("\n");
            text.push('\n');
            text
        }
    };

    let mut writer: Box<dyn Write> = match matches.get_one::<String>("out") {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create '{path}'"))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };
    writer.write_all(rendered.as_bytes())?;
    writer.flush()?;

    tracing::info!(
        input,
        columns = table.dataset().column_count(),
        rows = table.dataset().row_count(),
        "table rendered"
    );
    Ok(())
}

/// Initialize tracing to stderr, keeping stdout for the table
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let matches = build_command().get_matches();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
