//! Handler for `generate-slate`.

use chrono::Utc;
use serde_json::json;

use crate::adapter::inbound::cli::command::SlateArgs;
use crate::adapter::inbound::cli::output;
use crate::application::SlateGenerator;
use crate::domain::LeagueKey;
use crate::error::Result;
use crate::infrastructure::bootstrap::{build_ledger, build_source};
use crate::infrastructure::config::Config;

/// Execute `generate-slate`.
pub async fn execute(config: &Config, args: &SlateArgs) -> Result<()> {
    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());
    let keys: Vec<LeagueKey> = if args.all {
        Vec::new()
    } else {
        args.leagues.iter().map(|key| LeagueKey::new(key.as_str())).collect()
    };
    let leagues = config.leagues.select(&keys)?;

    let ledger = build_ledger(config);
    let source = build_source(config)?;
    let generator = SlateGenerator::new(ledger, source);

    let pb = output::spinner(&format!(
        "Fetching fixtures for {date} ({} leagues)",
        leagues.len()
    ));
    let report = match generator.generate(date, &leagues).await {
        Ok(report) => {
            output::spinner_success(&pb, "Slate generated");
            report
        }
        Err(err) => {
            output::spinner_fail(&pb, "Slate generation failed");
            return Err(err);
        }
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "generate-slate",
            "report": report,
        }));
        return Ok(());
    }

    output::section(&format!("Slate {date}"));
    output::field("Ledger", config.ledger.display());
    output::field("Added", output::positive(report.added));
    output::field("Duplicates", output::muted(report.duplicates));
    output::field("Out of window", output::muted(report.out_of_window));
    output::field("Total rows", report.total_rows);
    if report.leagues_failed > 0 {
        output::warning(&format!(
            "{} of {} leagues could not be fetched",
            report.leagues_failed,
            leagues.len()
        ));
    }
    if report.added == 0 && report.leagues_failed == 0 {
        output::note("Nothing new to add");
    }
    Ok(())
}
