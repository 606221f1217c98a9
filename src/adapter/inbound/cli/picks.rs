//! Handlers for `picks` and `recommendations`.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::application::analytics;
use crate::domain::{Confidence, FinalScore, Market, MatchId, Pick, PickResult, Probability};
use crate::error::Result;
use crate::infrastructure::bootstrap::build_ledger;
use crate::infrastructure::config::Config;

/// JSON shape of a ledger row.
#[derive(Debug, Serialize)]
struct PickView<'a> {
    date: NaiveDate,
    league: &'a str,
    fixture: &'a str,
    kickoff_utc: String,
    market: Market,
    confidence: Confidence,
    model_btts: Probability,
    model_o25: Probability,
    match_id: &'a MatchId,
    final_score: Option<FinalScore>,
    result: PickResult,
}

impl<'a> From<&'a Pick> for PickView<'a> {
    fn from(pick: &'a Pick) -> Self {
        Self {
            date: pick.date(),
            league: pick.league(),
            fixture: pick.fixture(),
            kickoff_utc: pick.kickoff_utc().format("%H:%M").to_string(),
            market: pick.market(),
            confidence: pick.confidence(),
            model_btts: pick.model_btts(),
            model_o25: pick.model_o25(),
            match_id: pick.match_id(),
            final_score: pick.final_score(),
            result: pick.result(),
        }
    }
}

#[derive(Tabled)]
struct PickRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Kickoff")]
    kickoff: String,
    #[tabled(rename = "League")]
    league: String,
    #[tabled(rename = "Match")]
    fixture: String,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "BTTS")]
    btts: String,
    #[tabled(rename = "O2.5")]
    o25: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Result")]
    result: String,
}

impl From<&Pick> for PickRow {
    fn from(pick: &Pick) -> Self {
        let result = match pick.result() {
            PickResult::Win => output::positive(pick.result()),
            PickResult::Loss => output::negative(pick.result()),
            PickResult::Pending => output::muted(pick.result()),
        };
        Self {
            date: pick.date().to_string(),
            kickoff: pick.kickoff_utc().format("%H:%M").to_string(),
            league: pick.league().to_string(),
            fixture: pick.fixture().to_string(),
            market: pick.market().to_string(),
            confidence: pick.confidence().to_string(),
            btts: pick.model_btts().to_string(),
            o25: pick.model_o25().to_string(),
            score: pick
                .final_score()
                .map(|s| s.to_string())
                .unwrap_or_default(),
            result,
        }
    }
}

fn emit(command: &str, date: Option<NaiveDate>, picks: &[&Pick]) {
    let views: Vec<PickView<'_>> = picks.iter().map(|p| PickView::from(*p)).collect();
    output::json_output(json!({
        "command": command,
        "date": date,
        "count": views.len(),
        "picks": views,
    }));
}

/// Execute `picks`.
pub fn execute_list(config: &Config, date: Option<NaiveDate>) -> Result<()> {
    let picks = build_ledger(config).load()?;
    let listed = analytics::listing(&picks, date);

    if output::is_json() {
        emit("picks", date, &listed);
        return Ok(());
    }
    if output::silenced() {
        return Ok(());
    }

    let title = date.map_or_else(|| "All picks".to_string(), |d| format!("Picks {d}"));
    output::section(&title);
    if listed.is_empty() {
        output::note("No picks");
        return Ok(());
    }
    let rows: Vec<PickRow> = listed.iter().map(|p| PickRow::from(*p)).collect();
    output::lines(&Table::new(rows).to_string());
    let pending = listed.iter().filter(|p| !p.is_graded()).count();
    output::field("Total", listed.len());
    output::field("Pending", pending);
    Ok(())
}

/// Execute `recommendations`.
pub fn execute_recommendations(config: &Config, date: Option<NaiveDate>) -> Result<()> {
    let date = date.unwrap_or_else(|| Utc::now().date_naive());
    let picks = build_ledger(config).load()?;
    let selected = analytics::recommendations(&picks, date);

    if output::is_json() {
        emit("recommendations", Some(date), &selected);
        return Ok(());
    }
    if output::silenced() {
        return Ok(());
    }

    output::section(&format!("Recommendations {date}"));
    if selected.is_empty() {
        output::note("No STRONG or MEDIUM picks");
        output::hint(&format!(
            "run {} first",
            output::highlight(format!("picks generate-slate {date} --all"))
        ));
        return Ok(());
    }
    let rows: Vec<PickRow> = selected.iter().map(|p| PickRow::from(*p)).collect();
    output::lines(&Table::new(rows).to_string());
    let strong = selected
        .iter()
        .filter(|p| p.confidence() == Confidence::Strong)
        .count();
    output::field("STRONG", strong);
    output::field("MEDIUM", selected.len() - strong);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::pick;

    #[test]
    fn test_pick_view_serializes_ledger_codes() {
        let graded = pick("42").probabilities(72, 65).graded(2, 1).build();
        let value = serde_json::to_value(PickView::from(&graded)).unwrap();
        assert_eq!(value["market"], "BTTS");
        assert_eq!(value["confidence"], "STRONG");
        assert_eq!(value["final_score"], "2-1");
        assert_eq!(value["result"], "W");
        assert_eq!(value["kickoff_utc"], "17:30");
        assert_eq!(value["match_id"], "42");
    }

    #[test]
    fn test_pick_row_blank_score_when_pending() {
        let row = PickRow::from(&pick("1").build());
        assert_eq!(row.score, "");
        assert_eq!(row.kickoff, "17:30");
    }
}
