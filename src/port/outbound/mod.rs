//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: the pick ledger
//! and the match data source.

pub mod ledger;
pub mod source;
