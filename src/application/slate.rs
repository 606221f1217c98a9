//! Slate generation: append pending picks for a date.
//!
//! Fixtures are fetched one league at a time so a failing league only costs
//! its own picks. A fixture is kept when its competition is tracked and its
//! kickoff falls on the target date in UTC. Picks already in the ledger, and
//! fixtures listed twice, are inserted once.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{CompetitionId, LeagueKey, Pick, PickDraft, PickKey};
use crate::error::Result;
use crate::infrastructure::config::League;
use crate::port::{MatchDataSource, MatchSummary, PickLedger};

/// Outcome of one slate run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlateReport {
    pub date: Option<NaiveDate>,
    /// New pending picks appended.
    pub added: usize,
    /// Fixtures already present in the ledger or listed twice.
    pub duplicates: usize,
    /// Fixtures whose kickoff is not on the target date.
    pub out_of_window: usize,
    /// Leagues whose fixture listing failed.
    pub leagues_failed: usize,
    /// Ledger size after the run.
    pub total_rows: usize,
}

/// Builds the daily slate.
pub struct SlateGenerator {
    ledger: Arc<dyn PickLedger>,
    source: Arc<dyn MatchDataSource>,
}

impl SlateGenerator {
    pub fn new(ledger: Arc<dyn PickLedger>, source: Arc<dyn MatchDataSource>) -> Self {
        Self { ledger, source }
    }

    /// Append picks for `date` across `leagues` and persist the ledger.
    pub async fn generate(
        &self,
        date: NaiveDate,
        leagues: &[(LeagueKey, League)],
    ) -> Result<SlateReport> {
        let mut picks = self.ledger.load_or_create()?;
        let mut existing: HashSet<PickKey> = picks
            .iter()
            .filter(|p| p.date() == date)
            .map(Pick::key)
            .collect();

        let tracked: HashMap<CompetitionId, &League> = leagues
            .iter()
            .map(|(_, league)| (league.competition_id, league))
            .collect();

        let mut report = SlateReport {
            date: Some(date),
            ..SlateReport::default()
        };

        for (key, league) in leagues {
            let fixtures = match self
                .source
                .matches_on_date(date, &[league.competition_id])
                .await
            {
                Ok(fixtures) => fixtures,
                Err(err) => {
                    warn!(
                        league = %key,
                        source = self.source.source_name(),
                        error = %err,
                        "Fixture listing failed, skipping league"
                    );
                    report.leagues_failed += 1;
                    continue;
                }
            };

            let before = report.added;
            for fixture in fixtures {
                let Some(league) = tracked.get(&fixture.competition_id) else {
                    debug!(
                        match_id = %fixture.match_id,
                        competition_id = %fixture.competition_id,
                        "Ignoring untracked competition"
                    );
                    continue;
                };
                let Some(draft) = draft_for(date, league, &fixture) else {
                    report.out_of_window += 1;
                    continue;
                };

                let pick = Pick::classify(draft);
                if !existing.insert(pick.key()) {
                    report.duplicates += 1;
                    continue;
                }
                debug!(
                    match_id = %pick.match_id(),
                    market = %pick.market(),
                    confidence = %pick.confidence(),
                    "Added pick"
                );
                picks.push(pick);
                report.added += 1;
            }
            info!(league = %key, added = report.added - before, "League processed");
        }

        self.ledger.save(&picks)?;
        report.total_rows = picks.len();

        info!(
            %date,
            added = report.added,
            duplicates = report.duplicates,
            out_of_window = report.out_of_window,
            leagues_failed = report.leagues_failed,
            total_rows = report.total_rows,
            ledger = %self.ledger.location(),
            "Slate generated"
        );
        Ok(report)
    }
}

/// Draft a pick for `fixture`, or `None` when it does not kick off on `date`.
fn draft_for(date: NaiveDate, league: &League, fixture: &MatchSummary) -> Option<PickDraft> {
    let kickoff = fixture.kickoff()?;
    if kickoff.date_naive() != date {
        return None;
    }
    Some(PickDraft {
        date,
        league: league.name.clone(),
        fixture: fixture.fixture(),
        kickoff_utc: kickoff.time(),
        model_btts: fixture.btts_probability,
        model_o25: fixture.over25_probability,
        match_id: fixture.match_id.clone(),
    })
}
