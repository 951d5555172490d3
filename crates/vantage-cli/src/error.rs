use thiserror::Error;
use vantage_core::{ErrorKind, ValidationError, VantageError};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{symbol}: {source}")]
    Fetch {
        symbol: String,
        #[source]
        source: VantageError,
    },

    #[error("command error: {0}")]
    Command(String),

    #[error("{failed} of {total} fetches failed")]
    Incomplete { failed: usize, total: usize, code: u8 },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::Command(_) => 2,
            Self::Fetch { source, .. } => match source.kind() {
                ErrorKind::InvalidArgument => 2,
                ErrorKind::Transport => 3,
                ErrorKind::Rejected => 4,
                ErrorKind::Decode | ErrorKind::SchemaMismatch => 5,
                ErrorKind::Write => 10,
            },
            Self::Incomplete { code, .. } => *code,
            Self::Serialization(_) => 5,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_core::HttpError;

    #[test]
    fn fetch_failures_map_by_kind() {
        let transport = CliError::Fetch {
            symbol: String::from("IBM"),
            source: VantageError::Transport(HttpError::new(
                vantage_core::HttpErrorKind::Timeout,
                "request timeout",
            )),
        };
        let rejected = CliError::Fetch {
            symbol: String::from("IBM"),
            source: VantageError::Rejected {
                status: 200,
                message: String::from("Invalid API call."),
            },
        };

        assert_eq!(transport.exit_code(), 3);
        assert_eq!(rejected.exit_code(), 4);
        assert_eq!(rejected.to_string(), "IBM: remote rejected request: Invalid API call.");
    }

    #[test]
    fn validation_is_a_usage_error() {
        assert_eq!(CliError::from(ValidationError::EmptySymbol).exit_code(), 2);
    }
}
