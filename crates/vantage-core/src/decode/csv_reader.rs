use std::io::{self, Read};

use tracing::debug;

use crate::{DecodeError, Table};

/// Read an RFC 4180 stream into a [`Table`] without reinterpreting it.
///
/// The first record is taken as the header exactly as the remote API sent it.
/// Records must all have the header's width, and a quoted field left open at
/// end of input is rejected rather than silently swallowing the rest of the
/// body.
pub fn read_csv_table<R: Read>(reader: R) -> Result<Table, DecodeError> {
    // Quote balance is only known once the stream is exhausted, so widths
    // are checked by hand and reported after it.
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(QuoteTracker::new(reader));

    let mut records: Vec<Vec<String>> = Vec::new();
    let mut ragged = None;
    for record in csv_reader.records() {
        let record = record?;
        if ragged.is_none() {
            if let Some(header) = records.first() {
                if record.len() != header.len() {
                    ragged = Some(ragged_record(&record, header.len()));
                }
            }
        }
        records.push(record.iter().map(str::to_owned).collect());
    }

    if let Some(offset) = csv_reader.into_inner().open_quote_offset() {
        return Err(DecodeError::UnterminatedQuote { offset });
    }
    if let Some(error) = ragged {
        return Err(error);
    }

    let table = Table::from_records(records)?;
    debug!(
        rows = table.row_count(),
        columns = table.column_count(),
        "decoded csv body"
    );
    Ok(table)
}

fn ragged_record(record: &csv::StringRecord, expected: usize) -> DecodeError {
    let position = record.position();
    DecodeError::Csv {
        offset: position.map(csv::Position::byte),
        line: position.map(csv::Position::line),
        message: format!(
            "found record with {} fields, but the header has {expected} fields",
            record.len()
        ),
    }
}

/// Where the byte stream stands relative to RFC 4180 quoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    Unquoted { at_field_start: bool },
    Quoted { opened_at: u64 },
    /// A `"` inside a quoted field: either an escape or the closing quote.
    QuoteInQuoted { opened_at: u64 },
}

impl QuoteState {
    fn advance(self, byte: u8, offset: u64) -> Self {
        let starts_field = matches!(byte, b',' | b'\n' | b'\r');
        match self {
            Self::Unquoted { at_field_start: true } if byte == b'"' => {
                Self::Quoted { opened_at: offset }
            }
            Self::Unquoted { .. } => Self::Unquoted {
                at_field_start: starts_field,
            },
            Self::Quoted { opened_at } if byte == b'"' => Self::QuoteInQuoted { opened_at },
            Self::Quoted { .. } => self,
            Self::QuoteInQuoted { opened_at } if byte == b'"' => Self::Quoted { opened_at },
            Self::QuoteInQuoted { .. } => Self::Unquoted {
                at_field_start: starts_field,
            },
        }
    }
}

/// Follows field quoting as bytes stream past, so a field left open at end
/// of input can be reported at the byte where it opened.
struct QuoteTracker<R> {
    inner: R,
    consumed: u64,
    state: QuoteState,
}

impl<R> QuoteTracker<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            consumed: 0,
            state: QuoteState::Unquoted {
                at_field_start: true,
            },
        }
    }

    fn open_quote_offset(&self) -> Option<u64> {
        match self.state {
            QuoteState::Quoted { opened_at } => Some(opened_at),
            _ => None,
        }
    }
}

impl<R: Read> Read for QuoteTracker<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        for (index, byte) in buf[..read].iter().enumerate() {
            self.state = self.state.advance(*byte, self.consumed + index as u64);
        }
        self.consumed += read as u64;
        Ok(read)
    }
}
