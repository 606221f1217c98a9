//! Handlers for the `report` command group.
//!
//! Reports read the ledger and never write it.

use std::fmt::Display;

use chrono::{NaiveDate, Utc};
use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::ReportCommand;
use crate::adapter::inbound::cli::output;
use crate::application::analytics::{
    self, AccuracyReport, LieIndexReport, LieTally, Pattern, PatternQuery, Segment, Tally,
    TopSplit, TOP_PICKS,
};
use crate::domain::Pick;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_ledger;
use crate::infrastructure::config::Config;

#[derive(Tabled)]
struct TallyRow {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Picks")]
    total: usize,
    #[tabled(rename = "W")]
    wins: usize,
    #[tabled(rename = "L")]
    losses: usize,
    #[tabled(rename = "Accuracy")]
    accuracy: String,
}

impl TallyRow {
    fn new(group: impl Display, tally: &Tally) -> Self {
        Self {
            group: group.to_string(),
            total: tally.total,
            wins: tally.wins,
            losses: tally.losses(),
            accuracy: output::percent(tally.win_rate()),
        }
    }
}

#[derive(Tabled)]
struct LieRow {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Picks")]
    count: usize,
    #[tabled(rename = "Lie index")]
    mean: String,
}

impl LieRow {
    fn new(group: impl Display, tally: &LieTally) -> Self {
        Self {
            group: group.to_string(),
            count: tally.count,
            mean: tally
                .mean()
                .map_or_else(|| "-".to_string(), |m| format!("{m:.1}")),
        }
    }
}

#[derive(Tabled)]
struct PatternRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "Record")]
    record: String,
    #[tabled(rename = "Win rate")]
    win_rate: String,
}

/// Execute a `report` subcommand.
pub fn execute(config: &Config, command: &ReportCommand) -> Result<()> {
    let picks = build_ledger(config).load()?;
    match command {
        ReportCommand::Accuracy(args) => accuracy(&picks, args.date),
        ReportCommand::LieIndex(args) => lie_index(&picks, args.date),
        ReportCommand::Patterns(args) => patterns(config, &picks, args.date),
        ReportCommand::TopPicks(args) => {
            top_picks(&picks, args.date.unwrap_or_else(|| Utc::now().date_naive()))
        }
    }
    Ok(())
}

fn scope(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "all time".to_string(), |d| d.to_string())
}

fn no_data(command: &str, date: Option<NaiveDate>) {
    if output::is_json() {
        output::json_output(json!({
            "command": command,
            "date": date,
            "report": null,
        }));
        return;
    }
    output::note(&format!("No graded picks ({})", scope(date)));
}

fn tally_rows<K: Display>(segments: &[Segment<K, Tally>]) -> Vec<TallyRow> {
    segments
        .iter()
        .map(|s| TallyRow::new(&s.key, &s.value))
        .collect()
}

fn accuracy(picks: &[Pick], date: Option<NaiveDate>) {
    let Some(report) = analytics::accuracy(picks, date) else {
        no_data("report.accuracy", date);
        return;
    };
    if output::is_json() {
        output::json_output(json!({
            "command": "report.accuracy",
            "date": date,
            "report": report,
        }));
        return;
    }
    render_accuracy(&report);
}

fn render_accuracy(report: &AccuracyReport) {
    output::section(&format!("Accuracy ({})", scope(report.date)));
    output::field(
        "Overall",
        format!(
            "{} ({}/{})",
            output::highlight(output::percent(report.overall.win_rate())),
            report.overall.wins,
            report.overall.total
        ),
    );

    output::section("By confidence");
    output::lines(&Table::new(tally_rows(&report.by_confidence)).to_string());
    output::section("By league");
    output::lines(&Table::new(tally_rows(&report.by_league)).to_string());
    output::section("By market");
    output::lines(&Table::new(tally_rows(&report.by_market)).to_string());
}

fn lie_index(picks: &[Pick], date: Option<NaiveDate>) {
    let Some(report) = analytics::lie_index(picks, date) else {
        no_data("report.lie_index", date);
        return;
    };
    if output::is_json() {
        output::json_output(json!({
            "command": "report.lie_index",
            "date": date,
            "report": report,
            "mean": report.overall.mean(),
        }));
        return;
    }
    render_lie_index(&report);
}

fn lie_rows<K>(segments: &[Segment<K, LieTally>], label: impl Fn(&K) -> String) -> Vec<LieRow> {
    segments
        .iter()
        .map(|s| LieRow::new(label(&s.key), &s.value))
        .collect()
}

fn render_lie_index(report: &LieIndexReport) {
    output::section(&format!("Lie index ({})", scope(report.date)));
    output::field(
        "Overall",
        output::highlight(LieRow::new("", &report.overall).mean),
    );
    output::note("Mean gap between promised probability and outcome, lower is better");

    output::section("By confidence");
    output::lines(&Table::new(lie_rows(&report.by_confidence, ToString::to_string)).to_string());
    output::section("By league");
    output::lines(&Table::new(lie_rows(&report.by_league, Clone::clone)).to_string());
    output::section("By league and confidence");
    output::lines(
        &Table::new(lie_rows(&report.by_league_confidence, |(league, confidence)| {
            format!("{league} / {confidence}")
        }))
        .to_string(),
    );
}

fn patterns(config: &Config, picks: &[Pick], date: Option<NaiveDate>) {
    let query = PatternQuery {
        date,
        min_samples: config.analytics.min_samples(date.is_some()),
        top: config.analytics.top_patterns,
    };
    let ranked = analytics::rank_patterns(picks, &query);

    if output::is_json() {
        output::json_output(json!({
            "command": "report.patterns",
            "date": date,
            "min_samples": query.min_samples,
            "patterns": ranked,
        }));
        return;
    }

    output::section(&format!("Top patterns ({})", scope(date)));
    if ranked.is_empty() {
        output::note(&format!(
            "No group has {} or more graded picks",
            query.min_samples
        ));
        return;
    }
    let rows: Vec<PatternRow> = ranked
        .iter()
        .enumerate()
        .map(|(i, pattern)| pattern_row(i + 1, pattern))
        .collect();
    output::lines(&Table::new(rows).to_string());
    output::hint(&format!(
        "groups with fewer than {} graded picks are not ranked",
        query.min_samples
    ));
}

fn pattern_row(rank: usize, pattern: &Pattern) -> PatternRow {
    PatternRow {
        rank,
        market: pattern.market.to_string(),
        confidence: pattern.confidence.to_string(),
        band: pattern.band.to_string(),
        record: format!("{}-{}", pattern.tally.wins, pattern.tally.losses()),
        win_rate: output::percent(pattern.tally.win_rate()),
    }
}

fn top_picks(picks: &[Pick], date: NaiveDate) {
    let Some(split) = analytics::top_split(picks, date) else {
        if output::is_json() {
            output::json_output(json!({
                "command": "report.top_picks",
                "date": date,
                "report": null,
            }));
            return;
        }
        output::note(&format!(
            "Need more than {TOP_PICKS} graded picks on {date}"
        ));
        return;
    };
    if output::is_json() {
        output::json_output(json!({
            "command": "report.top_picks",
            "date": date,
            "report": split,
        }));
        return;
    }
    render_top_split(&split);
}

fn render_top_split(split: &TopSplit) {
    output::section(&format!("Top {TOP_PICKS} vs rest ({})", split.date));
    let rows = vec![
        TallyRow::new(format!("Top {TOP_PICKS}"), &split.top),
        TallyRow::new("Rest", &split.rest),
        TallyRow::new("Overall", &split.overall),
    ];
    output::lines(&Table::new(rows).to_string());
    match split.top.cmp_rate(&split.rest) {
        std::cmp::Ordering::Greater => output::success("Top picks beat the rest"),
        std::cmp::Ordering::Less => output::warning("Top picks trail the rest"),
        std::cmp::Ordering::Equal => output::note("Top picks match the rest"),
    }
}
