//! Miette-based error diagnostics for CLI error presentation.
//!
//! Fatal errors are converted into diagnostics with a stable code and, where
//! one exists, a help line. TOML syntax errors carry the configuration text
//! and a labeled span pointing at the offending location.

use std::fs;
use std::path::Path;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::adapter::outbound::footystats::API_KEY_ENV;
use crate::error::{self, Error};
use crate::infrastructure::config::Config;

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(picks::config))]
pub struct ConfigError {
    /// Human-readable error message.
    pub message: String,

    /// Source content (the configuration file).
    #[source_code]
    pub src: String,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigError {
    /// Create a new configuration error with source location.
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: (offset, len).into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Configuration that parsed but cannot be used.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(picks::config))]
pub struct SetupError {
    pub message: String,
    #[help]
    pub help: Option<String>,
}

/// Ledger read or write failure.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(picks::ledger))]
pub struct LedgerError {
    pub message: String,
    #[help]
    pub help: Option<String>,
}

/// Match source failure that stopped a command.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(
    code(picks::source),
    help("check your network connection and the FootyStats API key")
)]
pub struct SourceError {
    pub message: String,
}

/// Read and validate the configuration file.
///
/// Syntax errors point at the offending span of the file.
pub fn load_config(path: &Path) -> Result<Config, miette::Report> {
    let src = fs::read_to_string(path).map_err(|err| {
        miette::Report::new(SetupError {
            message: format!("failed to read config file {}: {err}", path.display()),
            help: Some(
                "pass --config PATH or copy config.toml.example to config.toml".to_string(),
            ),
        })
    })?;

    match Config::parse_toml(&src) {
        Ok(config) => Ok(config),
        Err(Error::Config(error::ConfigError::Parse(err))) => {
            let span = err.span().unwrap_or(0..0);
            let message = format!("failed to parse config: {}", err.message().trim());
            Err(miette::Report::new(
                ConfigError::new(message, src, span.start, span.len())
                    .with_help("see config.toml.example for the expected layout"),
            ))
        }
        Err(err) => Err(report(err)),
    }
}

/// Convert a fatal error into a rendered diagnostic.
#[must_use]
pub fn report(err: Error) -> miette::Report {
    let message = err.to_string();
    match err {
        Error::Config(config_err) => miette::Report::new(SetupError {
            help: config_help(&config_err),
            message,
        }),
        Error::Ledger(ledger_err) => miette::Report::new(LedgerError {
            help: ledger_help(&ledger_err),
            message,
        }),
        Error::Source(_) => miette::Report::new(SourceError { message }),
    }
}

fn config_help(err: &error::ConfigError) -> Option<String> {
    match err {
        error::ConfigError::MissingField { field } if *field == API_KEY_ENV => Some(format!(
            "export {API_KEY_ENV} or add it to a .env file"
        )),
        error::ConfigError::UnknownLeague { .. } => {
            Some("run `picks config show` to list configured leagues".to_string())
        }
        error::ConfigError::MissingField { field: "leagues" } => {
            Some("add at least one [leagues.<key>] table".to_string())
        }
        _ => None,
    }
}

fn ledger_help(err: &error::LedgerError) -> Option<String> {
    match err {
        error::LedgerError::NotFound { .. } => {
            Some("run `picks generate-slate` to create the ledger".to_string())
        }
        error::LedgerError::Schema { .. } => Some(
            "run `picks ledger migrate` to convert an older ledger; it was not modified"
                .to_string(),
        ),
        error::LedgerError::InvalidRow { .. } => {
            Some("fix the ledger file by hand; it was not modified".to_string())
        }
        error::LedgerError::Write { .. } => {
            Some("check that the ledger directory is writable".to_string())
        }
        _ => None,
    }
}
