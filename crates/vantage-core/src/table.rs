//! Canonical header + rows output shared by every decoder.

use crate::DecodeError;

/// Ordered text rows where row 0 is the header.
///
/// Every row has exactly as many columns as the header. Values are carried
/// verbatim as the remote API sent them; nothing is parsed into numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table, checking every data row against the header width.
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, DecodeError> {
        let expected = header.len();
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
        {
            return Err(DecodeError::RaggedRow {
                row: index + 1,
                expected,
                found: row.len(),
            });
        }

        Ok(Self { header, rows })
    }

    /// Build a table from rows a decoder constructed at the header's width.
    pub(crate) fn from_uniform_rows(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == header.len()));
        Self { header, rows }
    }

    /// Build a table from records whose first entry is the header.
    pub fn from_records(records: Vec<Vec<String>>) -> Result<Self, DecodeError> {
        let mut records = records.into_iter();
        let header = records.next().ok_or(DecodeError::MissingHeader)?;
        Self::new(header, records.collect())
    }

    /// A table holding only the header row.
    pub fn header_only<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows, excluding the header.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Total number of records including the header.
    pub fn record_count(&self) -> usize {
        self.rows.len() + 1
    }

    /// Iterate over every record, header first.
    pub fn records(&self) -> impl Iterator<Item = &[String]> {
        std::iter::once(self.header.as_slice()).chain(self.rows.iter().map(Vec::as_slice))
    }

    pub fn into_records(self) -> Vec<Vec<String>> {
        let mut records = Vec::with_capacity(self.rows.len() + 1);
        records.push(self.header);
        records.extend(self.rows);
        records
    }
}
