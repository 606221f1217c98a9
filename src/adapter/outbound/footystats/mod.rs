//! FootyStats match data source.

pub mod client;
pub mod dto;
pub mod settings;

pub use client::FootyStatsClient;
pub use settings::{SourceConfig, API_KEY_ENV};
