//! Domain validation errors for core domain types.
//!
//! These errors are returned by the `FromStr` implementations of ledger
//! values (markets, tiers, results, scores) and by probability validation.
//!
//! # Examples
//!
//! ```
//! use picks_ledger::domain::error::DomainError;
//! use picks_ledger::domain::FinalScore;
//!
//! let result = "two-one".parse::<FinalScore>();
//! assert!(matches!(result, Err(DomainError::InvalidScore { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when a domain value cannot be constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Market code is not one of `BTTS` / `O2.5`.
    #[error("unknown market '{value}'")]
    UnknownMarket {
        /// The rejected input.
        value: String,
    },

    /// Confidence tier is not one of `STRONG` / `MEDIUM` / `PASS`.
    #[error("unknown confidence tier '{value}'")]
    UnknownConfidence {
        /// The rejected input.
        value: String,
    },

    /// Result is not one of `pending` / `W` / `L`.
    #[error("unknown result '{value}'")]
    UnknownResult {
        /// The rejected input.
        value: String,
    },

    /// Score is not of the form `<int>-<int>`.
    #[error("invalid final score '{value}', expected H-A")]
    InvalidScore {
        /// The rejected input.
        value: String,
    },

    /// Probability is not an integer.
    #[error("invalid probability '{value}'")]
    InvalidProbability {
        /// The rejected input.
        value: String,
    },

    /// Model probabilities are percentages.
    #[error("probability {value} outside 0-100")]
    ProbabilityOutOfRange {
        /// The rejected value.
        value: i64,
    },
}
