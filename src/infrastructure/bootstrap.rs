//! Infrastructure bootstrap helpers for command wiring.

use std::sync::Arc;

use tracing::debug;

use crate::adapter::outbound::footystats::{FootyStatsClient, API_KEY_ENV};
use crate::adapter::outbound::ledger::CsvLedger;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::Config;
use crate::port::{MatchDataSource, PickLedger};

/// Build the CSV ledger at the configured path.
pub fn build_ledger(config: &Config) -> Arc<dyn PickLedger> {
    Arc::new(CsvLedger::new(&config.ledger))
}

/// Build the FootyStats source.
///
/// The API key comes from the environment only; a missing or blank key is a
/// setup failure.
pub fn build_source(config: &Config) -> Result<Arc<dyn MatchDataSource>> {
    let key = api_key(std::env::var(API_KEY_ENV).ok())?;
    debug!(api_url = %config.source.api_url, "Match source configured");
    Ok(Arc::new(FootyStatsClient::from_config(&config.source, key)))
}

fn api_key(value: Option<String>) -> std::result::Result<String, ConfigError> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(ConfigError::MissingField { field: API_KEY_ENV }),
    }
}
