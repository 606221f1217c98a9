//! Handler for the `config` command group.

use std::path::Path;

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::footystats::API_KEY_ENV;
use crate::error::Result;
use crate::infrastructure::config::Config;

#[derive(Tabled)]
struct LeagueRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Competition")]
    competition_id: u64,
}

fn api_key_loaded() -> bool {
    std::env::var(API_KEY_ENV).is_ok_and(|key| !key.trim().is_empty())
}

/// Execute `config check`. The config was already loaded and validated.
pub fn execute_check(path: &Path, config: &Config) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "config.check",
            "path": path.display().to_string(),
            "valid": true,
            "leagues": config.leagues.len(),
            "api_key_loaded": api_key_loaded(),
        }));
        return Ok(());
    }

    output::success(&format!("{} is valid", path.display()));
    output::field("Leagues", config.leagues.len());
    if !api_key_loaded() {
        output::warning(&format!(
            "{API_KEY_ENV} is not set; generate-slate and grade-results need it"
        ));
    }
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path, config: &Config) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "config": config,
            "api_key_loaded": api_key_loaded(),
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Effective Configuration");
    output::field("Config", path.display());
    output::field("Ledger", config.ledger.display());

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    output::section("Match source");
    output::field("API", &config.source.api_url);
    output::field("Timeout", format!("{}ms", config.source.timeout_ms));
    output::field(
        "Retries",
        format!(
            "{} attempts, {}ms backoff",
            config.source.retry_max_attempts, config.source.retry_backoff_ms
        ),
    );
    if api_key_loaded() {
        output::success(&format!("API key loaded from {API_KEY_ENV}"));
    } else {
        output::warning(&format!("{API_KEY_ENV} not set"));
    }

    output::section("Analytics");
    output::field(
        "Min samples",
        format!(
            "{} all time, {} per day",
            config.analytics.min_samples_all_time, config.analytics.min_samples_daily
        ),
    );
    output::field("Top patterns", config.analytics.top_patterns);

    output::section("Leagues");
    let rows: Vec<LeagueRow> = config
        .leagues
        .iter()
        .map(|(key, league)| LeagueRow {
            key: key.to_string(),
            name: league.name.clone(),
            country: league.country.clone(),
            competition_id: league.competition_id.value(),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
    Ok(())
}
