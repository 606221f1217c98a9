//! Picks ledger - daily football picks, result grading and accuracy analytics.
//!
//! The crate keeps a CSV ledger of one predicted outcome per match. A slate
//! run appends pending picks for a date from a match data source; a grading
//! run settles them from final scores and repairs rows that break the pick
//! lifecycle; reports read the ledger without writing it.
//!
//! # Architecture
//!
//! - **`domain`** - Picks, markets, confidence tiers, classification and grading
//! - **`port`** - `PickLedger` and `MatchDataSource` traits
//! - **`application`** - Slate generator, result grader and analytics reducers
//! - **`adapter`** - CSV ledger, FootyStats HTTP client and the `picks` CLI
//! - **`infrastructure`** - Configuration, logging and wiring
//!
//! # Example
//!
//! ```
//! use picks_ledger::domain::{Confidence, Market, Probability};
//! use picks_ledger::domain::{confidence_for, market_for};
//!
//! let btts = Probability::clamped(72);
//! let over = Probability::clamped(65);
//! assert_eq!(confidence_for(btts, over), Confidence::Strong);
//! assert_eq!(market_for(btts, over), Market::Btts);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
