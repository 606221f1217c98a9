//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`] - [`ScriptedSource`](source::ScriptedSource), a
//!   [`MatchDataSource`](crate::port::MatchDataSource) with canned fixtures
//!   and results.
//! - [`ledger`] - [`MemoryLedger`](ledger::MemoryLedger), an in-memory
//!   [`PickLedger`](crate::port::PickLedger).
//! - [`domain`] - Builders for picks, fixtures and match details.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod domain;
pub mod ledger;
pub mod source;
