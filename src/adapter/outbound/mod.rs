//! Outbound adapters (driven side).

pub mod footystats;
pub mod ledger;
