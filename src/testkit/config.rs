//! Canonical test configurations.
//!
//! Single source of truth for config values used across tests.

use std::path::Path;

use crate::infrastructure::config::{Config, LeagueTable};

/// Competition id of the `swiss` test league.
pub const SWISS: u64 = 12325;
/// Competition id of the `austria` test league.
pub const AUSTRIA: u64 = 12472;

/// Config file content with two leagues and the ledger at `ledger`.
pub fn config_toml(ledger: &Path) -> String {
    format!(
        r#"ledger = "{}"

[logging]
level = "warn"

[source]
api_url = "http://127.0.0.1:9"
timeout_ms = 500
connect_timeout_ms = 200

[leagues.swiss]
name = "Switzerland Super League"
country = "Switzerland"
competition_id = {SWISS}

[leagues.austria]
name = "Austria Bundesliga"
country = "Austria"
competition_id = {AUSTRIA}
"#,
        ledger.display().to_string().replace('\\', "/")
    )
}

/// Parsed form of [`config_toml`].
///
/// # Panics
///
/// Panics if the canonical config fails to parse.
pub fn config(ledger: &Path) -> Config {
    Config::parse_toml(&config_toml(ledger)).expect("valid test config")
}

/// The two-league test table.
pub fn leagues() -> LeagueTable {
    config(Path::new("picks.csv")).leagues
}
