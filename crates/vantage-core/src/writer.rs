//! Persisting tables as comma-separated files.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::{Table, WriteError};

/// Write `table` to `path`, creating the file or truncating an existing one.
///
/// Values are quoted only when they contain a delimiter, quote, or line
/// break, so the output reads back through [`crate::read_csv_table`]
/// unchanged.
pub fn write_table(table: &Table, path: impl AsRef<Path>) -> Result<(), WriteError> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path).map_err(|source| WriteError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    for record in table.records() {
        writer.write_record(record).map_err(|source| WriteError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    }

    writer.flush().map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), records = table.record_count(), "wrote table");
    Ok(())
}

/// Write `table` as CSV into any writer, e.g. stdout.
pub fn write_table_to<W: Write>(table: &Table, sink: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(sink);
    for record in table.records() {
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render `table` as CSV text.
pub fn to_csv_string(table: &Table) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_table_to(table, &mut buffer)?;
    // csv::Writer only emits the UTF-8 it was given.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
