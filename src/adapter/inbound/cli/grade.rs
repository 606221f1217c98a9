//! Handler for `grade-results`.

use chrono::Utc;
use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::GradeArgs;
use crate::adapter::inbound::cli::output;
use crate::application::{GradeOptions, GradeOutcome, GradeReport, ResultGrader};
use crate::error::Result;
use crate::infrastructure::bootstrap::{build_ledger, build_source};
use crate::infrastructure::config::Config;

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Match ID")]
    match_id: String,
    #[tabled(rename = "Fixture")]
    fixture: String,
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Detail")]
    detail: String,
}

/// Execute `grade-results`.
pub async fn execute(config: &Config, args: &GradeArgs) -> Result<()> {
    let ledger = build_ledger(config);
    let source = build_source(config)?;
    let grader = ResultGrader::new(ledger, source);
    let options = GradeOptions::new(Utc::now()).force(args.force);

    let pb = output::spinner(&format!("Grading picks for {}", args.date));
    let report = match grader.grade(args.date, options).await {
        Ok(report) => {
            output::spinner_success(&pb, "Results graded");
            report
        }
        Err(err) => {
            output::spinner_fail(&pb, "Grading failed");
            return Err(err);
        }
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "grade-results",
            "report": report,
        }));
        return Ok(());
    }

    render(&report);
    Ok(())
}

fn render(report: &GradeReport) {
    if let Some(date) = report.date {
        output::section(&format!("Results {date}"));
    }
    output::field("Updated", output::positive(report.updated));
    output::field("Skipped", output::muted(report.skipped));
    if report.repaired > 0 {
        output::warning(&format!(
            "{} invalid rows reset to pending",
            report.repaired
        ));
    }
    for (reason, count) in &report.skip_reasons {
        output::field(&format!("  {reason}"), count);
    }

    if report.rows.is_empty() {
        output::note("No picks on this date");
        return;
    }
    if output::verbosity() == 0 && report.updated == 0 {
        return;
    }

    let rows: Vec<OutcomeRow> = report
        .rows
        .iter()
        .filter(|row| {
            output::verbosity() > 0 || matches!(row.outcome, GradeOutcome::Graded { .. })
        })
        .map(|row| {
            let (outcome, detail) = match row.outcome {
                GradeOutcome::Graded { result, score } => {
                    let label = if result.is_win() {
                        output::positive(result)
                    } else {
                        output::negative(result)
                    };
                    (label, score.to_string())
                }
                GradeOutcome::Skipped { reason } => {
                    (output::muted("skipped"), reason.to_string())
                }
            };
            OutcomeRow {
                match_id: row.match_id.to_string(),
                fixture: row.fixture.clone(),
                outcome,
                detail,
            }
        })
        .collect();

    output::lines(&Table::new(rows).to_string());
}
