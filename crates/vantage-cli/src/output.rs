use std::io::Write;

use serde::Serialize;
use vantage_core::{Function, Query, Table};

use crate::error::CliError;

/// One JSON line per written table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub function: Function,
    pub symbol: String,
    pub datatype: &'static str,
    pub columns: usize,
    pub rows: usize,
    pub destination: String,
}

impl TableSummary {
    pub fn new(query: &Query, table: &Table, destination: String) -> Self {
        Self {
            function: query.function(),
            symbol: query.symbol().to_string(),
            datatype: query.datatype().as_str(),
            columns: table.column_count(),
            rows: table.row_count(),
            destination,
        }
    }
}

/// Summaries go to stderr when stdout carries the CSV itself.
pub fn emit_summary(summary: &TableSummary, tables_on_stdout: bool) -> Result<(), CliError> {
    let line = serde_json::to_string(summary)?;
    if tables_on_stdout {
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{line}")?;
    } else {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}")?;
    }
    Ok(())
}
