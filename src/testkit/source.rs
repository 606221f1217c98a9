//! Scripted [`MatchDataSource`] for testing.
//!
//! Fixtures are returned for any requested competition they belong to,
//! regardless of date, so callers' date filtering is exercised. Results are
//! looked up by match id; unknown ids resolve to `Ok(None)`.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{CompetitionId, MatchId};
use crate::error::SourceError;
use crate::port::{MatchDataSource, MatchDetail, MatchSummary};

/// A source with pre-loaded fixtures, results and failures.
#[derive(Default)]
pub struct ScriptedSource {
    fixtures: Vec<MatchSummary>,
    failing_competitions: HashSet<CompetitionId>,
    details: HashMap<MatchId, Result<Option<MatchDetail>, SourceError>>,
    fixture_calls: Arc<AtomicU32>,
    detail_calls: Arc<AtomicU32>,
    requested: Mutex<Vec<MatchId>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fixtures(mut self, fixtures: Vec<MatchSummary>) -> Self {
        self.fixtures.extend(fixtures);
        self
    }

    /// Make listing fail for any request that includes `competition`.
    pub fn with_failing_competition(mut self, competition: u64) -> Self {
        self.failing_competitions
            .insert(CompetitionId::new(competition));
        self
    }

    pub fn with_result(mut self, match_id: &str, detail: MatchDetail) -> Self {
        self.details
            .insert(MatchId::from(match_id), Ok(Some(detail)));
        self
    }

    /// Make resolving `match_id` fail with `SourceError::Unavailable`.
    pub fn with_failing_match(mut self, match_id: &str) -> Self {
        self.details.insert(
            MatchId::from(match_id),
            Err(SourceError::Unavailable("scripted failure".into())),
        );
        self
    }

    /// Number of `matches_on_date` calls so far.
    pub fn fixture_calls(&self) -> u32 {
        self.fixture_calls.load(Ordering::SeqCst)
    }

    /// Number of `match_by_id` calls so far.
    pub fn detail_calls(&self) -> u32 {
        self.detail_calls.load(Ordering::SeqCst)
    }

    /// Match ids passed to `match_by_id`, in call order.
    pub fn requested(&self) -> Vec<MatchId> {
        self.requested
            .lock()
            .map(|ids| ids.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MatchDataSource for ScriptedSource {
    async fn matches_on_date(
        &self,
        _date: NaiveDate,
        competitions: &[CompetitionId],
    ) -> Result<Vec<MatchSummary>, SourceError> {
        self.fixture_calls.fetch_add(1, Ordering::SeqCst);
        if competitions
            .iter()
            .any(|c| self.failing_competitions.contains(c))
        {
            return Err(SourceError::Unavailable("scripted failure".into()));
        }
        Ok(self
            .fixtures
            .iter()
            .filter(|m| competitions.contains(&m.competition_id))
            .cloned()
            .collect())
    }

    async fn match_by_id(&self, match_id: &MatchId) -> Result<Option<MatchDetail>, SourceError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut ids) = self.requested.lock() {
            ids.push(match_id.clone());
        }
        self.details.get(match_id).cloned().unwrap_or(Ok(None))
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}
