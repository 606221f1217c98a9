use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("unknown league '{key}' (known: {known})")]
    UnknownLeague { key: String, known: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Ledger file errors. All of these are fatal for the run that hits them.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("ledger not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read ledger {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ledger header mismatch: expected [{expected}], found [{found}]")]
    Schema { expected: String, found: String },

    #[error("ledger line {line}: invalid {field}: {reason}")]
    InvalidRow {
        line: u64,
        field: &'static str,
        reason: String,
    },

    #[error("ledger CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write ledger {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by a match data source.
///
/// These are retryable-later conditions: services count them and move on.
#[derive(Error, Debug, Clone)]
pub enum SourceError {
    #[error("match source unavailable: {0}")]
    Unavailable(String),

    #[error("unexpected match source payload: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Source(#[from] SourceError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Unavailable(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_both_headers() {
        let err = LedgerError::Schema {
            expected: "date,league".into(),
            found: "date".into(),
        };
        let message = err.to_string();
        assert!(message.contains("expected [date,league]"));
        assert!(message.contains("found [date]"));
    }

    #[test]
    fn invalid_row_names_line_and_field() {
        let err: Error = LedgerError::InvalidRow {
            line: 7,
            field: "market",
            reason: "unknown market 'X'".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "ledger line 7: invalid market: unknown market 'X'"
        );
    }

    #[test]
    fn source_error_is_transparent_in_top_level() {
        let err: Error = SourceError::Unavailable("timeout".into()).into();
        assert_eq!(err.to_string(), "match source unavailable: timeout");
    }
}
