//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - The `picks` command-line interface
//! - [`outbound`] - CSV ledger and FootyStats match source

pub mod inbound;
pub mod outbound;
