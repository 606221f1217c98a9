//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! business logic.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Ledger and match source construction from config
//! - [`config`] - Configuration loading, validation and logging setup
pub mod bootstrap;
pub mod config;
