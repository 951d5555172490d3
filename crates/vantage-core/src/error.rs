use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use thiserror::Error;

use crate::http_client::HttpError;

/// Caller-supplied parameters that violate a precondition.
///
/// Every variant is raised before any network activity takes place.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid interval '{value}', expected one of 1, 5, 15, 30, 60 (minutes)")]
    InvalidInterval { value: String },

    #[error("function {function} requires an intraday interval")]
    MissingInterval { function: &'static str },
    #[error("function {function} has no JSON decoder; request datatype csv instead")]
    JsonUnsupported { function: &'static str },

    #[error("intraday column set must not be empty")]
    EmptyColumnSet,
    #[error("api key cannot be empty")]
    EmptyApiKey,
    #[error("timeout must be at least 1 millisecond")]
    ZeroTimeout,
}

/// Structural failure while reading a response body.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed CSV record{}: {message}", describe_offset(.offset, .line))]
    Csv {
        offset: Option<u64>,
        line: Option<u64>,
        message: String,
    },

    #[error("unterminated quoted field starting at byte {offset}")]
    UnterminatedQuote { offset: u64 },

    #[error("response body is empty; expected a header record")]
    MissingHeader,

    #[error("row {row} has {found} columns, header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("malformed JSON at line {line}, column {column}: {source}")]
    Json {
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl From<csv::Error> for DecodeError {
    fn from(error: csv::Error) -> Self {
        let position = error.position();
        Self::Csv {
            offset: position.map(csv::Position::byte),
            line: position.map(csv::Position::line),
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            line: error.line(),
            column: error.column(),
            source: error,
        }
    }
}

fn describe_offset(offset: &Option<u64>, line: &Option<u64>) -> String {
    match (*offset, *line) {
        (Some(offset), Some(line)) => format!(" at byte {offset} (line {line})"),
        (Some(offset), None) => format!(" at byte {offset}"),
        _ => String::new(),
    }
}

/// What was wrong with the value found under a required key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    Missing,
    NotText { found: &'static str },
    NotObject { found: &'static str },
}

impl Display for Mismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => f.write_str("is missing"),
            Self::NotText { found } => write!(f, "must be a string, found {found}"),
            Self::NotObject { found } => write!(f, "must be an object, found {found}"),
        }
    }
}

/// A required JSON field or section is absent or has the wrong type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("field '{field}' in '{section}' {mismatch}")]
pub struct SchemaMismatch {
    section: String,
    field: String,
    mismatch: Mismatch,
}

impl SchemaMismatch {
    pub fn new(section: impl Into<String>, field: impl Into<String>, mismatch: Mismatch) -> Self {
        Self {
            section: section.into(),
            field: field.into(),
            mismatch,
        }
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub const fn mismatch(&self) -> Mismatch {
        self.mismatch
    }
}

/// Failure persisting a table.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to write table to '{}': {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write table to '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of [`VantageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Transport,
    Rejected,
    Decode,
    SchemaMismatch,
    Write,
}

/// Top-level error type for fetch, decode, and write operations.
#[derive(Debug, Error)]
pub enum VantageError {
    #[error(transparent)]
    InvalidArgument(#[from] ValidationError),

    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("remote rejected request: {message}")]
    Rejected { status: u16, message: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    SchemaMismatch(#[from] SchemaMismatch),

    #[error(transparent)]
    Write(#[from] WriteError),
}

impl VantageError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Rejected { .. } => ErrorKind::Rejected,
            Self::Decode(_) => ErrorKind::Decode,
            Self::SchemaMismatch(_) => ErrorKind::SchemaMismatch,
            Self::Write(_) => ErrorKind::Write,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_mismatch_names_section_and_field() {
        let error = SchemaMismatch::new(
            "Global Quote",
            "05. price",
            Mismatch::NotText { found: "number" },
        );
        assert_eq!(
            error.to_string(),
            "field '05. price' in 'Global Quote' must be a string, found number"
        );
    }

    #[test]
    fn csv_error_message_includes_offset_when_known() {
        let error = DecodeError::Csv {
            offset: Some(42),
            line: Some(3),
            message: String::from("found record with 2 fields"),
        };
        assert_eq!(
            error.to_string(),
            "malformed CSV record at byte 42 (line 3): found record with 2 fields"
        );
    }

    #[test]
    fn kind_classifies_wrapped_errors() {
        let error = VantageError::from(ValidationError::EmptySymbol);
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);

        let error = VantageError::from(DecodeError::MissingHeader);
        assert_eq!(error.kind(), ErrorKind::Decode);
    }
}
