//! Handler for the `ledger` command group.

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::ledger::CsvLedger;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Execute `ledger migrate`.
pub fn execute_migrate(config: &Config) -> Result<()> {
    let ledger = CsvLedger::new(&config.ledger);
    let report = ledger.migrate()?;

    if output::is_json() {
        output::json_output(json!({
            "command": "ledger.migrate",
            "path": config.ledger.display().to_string(),
            "report": report,
        }));
        return Ok(());
    }

    output::section("Ledger migration");
    output::field("Ledger", config.ledger.display());
    output::field("Rows", report.rows);
    if report.added_final_score {
        output::field("Added column", "final_score");
    }
    if !report.dropped_columns.is_empty() {
        output::field("Dropped columns", report.dropped_columns.join(", "));
    }
    output::field("Shifted results fixed", report.shifted);
    if report.is_noop() {
        output::note("Ledger already uses the current layout");
    } else {
        output::success("Ledger rewritten");
    }
    Ok(())
}
