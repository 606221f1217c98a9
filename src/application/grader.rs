//! Result grading and ledger repair.
//!
//! A pass first repairs every row that breaks a lifecycle invariant, then
//! resolves the target date's rows against the match source one at a time.
//! Each row yields a [`GradeOutcome`]; nothing short of a ledger error aborts
//! the pass. The ledger is rewritten once at the end.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{FinalScore, MatchId, Pick, PickResult};
use crate::error::Result;
use crate::port::{MatchDataSource, PickLedger};

/// Inputs of one grading pass besides the date.
#[derive(Debug, Clone, Copy)]
pub struct GradeOptions {
    /// Re-grade rows that already carry a result.
    pub force: bool,
    /// Reference time for kickoff checks.
    pub now: DateTime<Utc>,
}

impl GradeOptions {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { force: false, now }
    }

    #[must_use]
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Why a row was left as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    AlreadyGraded,
    NotStarted,
    SourceUnavailable,
    NotFound,
    NotFinished,
    ScoreUnavailable,
}

impl SkipReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyGraded => "already_graded",
            Self::NotStarted => "not_started",
            Self::SourceUnavailable => "source_unavailable",
            Self::NotFound => "not_found",
            Self::NotFinished => "not_finished",
            Self::ScoreUnavailable => "score_unavailable",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to one row of the target date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GradeOutcome {
    Graded {
        result: PickResult,
        score: FinalScore,
    },
    Skipped {
        reason: SkipReason,
    },
}

impl GradeOutcome {
    const fn skipped(reason: SkipReason) -> Self {
        Self::Skipped { reason }
    }
}

/// Outcome for one row, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowOutcome {
    pub match_id: MatchId,
    pub fixture: String,
    #[serde(flatten)]
    pub outcome: GradeOutcome,
}

/// Totals of one grading pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GradeReport {
    pub date: Option<NaiveDate>,
    /// Rows graded in this pass.
    pub updated: usize,
    /// Target-date rows left unchanged.
    pub skipped: usize,
    /// Rows reset by invariant repair, across the whole ledger.
    pub repaired: usize,
    pub skip_reasons: BTreeMap<SkipReason, usize>,
    pub rows: Vec<RowOutcome>,
}

impl GradeReport {
    fn record(&mut self, pick: &Pick, outcome: GradeOutcome) {
        match outcome {
            GradeOutcome::Graded { .. } => self.updated += 1,
            GradeOutcome::Skipped { reason } => {
                self.skipped += 1;
                *self.skip_reasons.entry(reason).or_default() += 1;
            }
        }
        self.rows.push(RowOutcome {
            match_id: pick.match_id().clone(),
            fixture: pick.fixture().to_string(),
            outcome,
        });
    }
}

/// Grades pending picks from authoritative results.
pub struct ResultGrader {
    ledger: Arc<dyn PickLedger>,
    source: Arc<dyn MatchDataSource>,
}

impl ResultGrader {
    pub fn new(ledger: Arc<dyn PickLedger>, source: Arc<dyn MatchDataSource>) -> Self {
        Self { ledger, source }
    }

    /// Repair the ledger, grade `date`, and persist.
    pub async fn grade(&self, date: NaiveDate, options: GradeOptions) -> Result<GradeReport> {
        let mut picks = self.ledger.load()?;
        let mut report = GradeReport {
            date: Some(date),
            repaired: repair(&mut picks, options.now),
            ..GradeReport::default()
        };

        for pick in picks.iter_mut().filter(|p| p.date() == date) {
            let outcome = self.grade_one(pick, options).await;
            report.record(pick, outcome);
        }

        self.ledger.save(&picks)?;

        info!(
            %date,
            updated = report.updated,
            skipped = report.skipped,
            repaired = report.repaired,
            force = options.force,
            ledger = %self.ledger.location(),
            "Results graded"
        );
        Ok(report)
    }

    async fn grade_one(&self, pick: &mut Pick, options: GradeOptions) -> GradeOutcome {
        if pick.is_graded() && !options.force {
            return GradeOutcome::skipped(SkipReason::AlreadyGraded);
        }
        if !pick.has_kicked_off(options.now) {
            return GradeOutcome::skipped(SkipReason::NotStarted);
        }

        let detail = match self.source.match_by_id(pick.match_id()).await {
            Ok(Some(detail)) => detail,
            Ok(None) => {
                debug!(match_id = %pick.match_id(), "Match not found at source");
                return GradeOutcome::skipped(SkipReason::NotFound);
            }
            Err(err) => {
                warn!(
                    match_id = %pick.match_id(),
                    source = self.source.source_name(),
                    error = %err,
                    "Result lookup failed"
                );
                return GradeOutcome::skipped(SkipReason::SourceUnavailable);
            }
        };

        if !detail.status.is_complete() {
            debug!(
                match_id = %pick.match_id(),
                status = detail.status.as_str(),
                "Match not finished"
            );
            return GradeOutcome::skipped(SkipReason::NotFinished);
        }
        let Some(score) = detail.final_score() else {
            return GradeOutcome::skipped(SkipReason::ScoreUnavailable);
        };

        let previous = pick.result();
        let result = pick.record_result(score);
        debug!(
            match_id = %pick.match_id(),
            market = %pick.market(),
            %score,
            result = result.code(),
            previous = previous.code(),
            "Graded pick"
        );
        GradeOutcome::Graded { result, score }
    }
}

/// Reset every row that breaks a lifecycle invariant at `now`.
///
/// Every [`Violation`](crate::domain::Violation) is repaired the same way:
/// the row returns to pending with no score. Returns the number of rows reset.
pub fn repair(picks: &mut [Pick], now: DateTime<Utc>) -> usize {
    let mut repaired = 0;
    for pick in picks.iter_mut() {
        let Some(violation) = pick.violation(now) else {
            continue;
        };
        warn!(
            date = %pick.date(),
            match_id = %pick.match_id(),
            violation = %violation,
            result = pick.result().code(),
            score = ?pick.final_score().map(|s| s.to_string()),
            "Repairing ledger row"
        );
        pick.revert_to_pending();
        repaired += 1;
    }
    repaired
}
