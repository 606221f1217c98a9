//! The pick record and its lifecycle.
//!
//! A pick is created pending, graded exactly once, and read-only after that.
//! The classification fields (`market`, `confidence`, both model
//! probabilities) are fixed at creation; only [`Pick::record_result`] and
//! [`Pick::revert_to_pending`] change a pick.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::classifier::{confidence_for, market_for};
use super::id::MatchId;
use super::market::{Confidence, Market, Probability};
use super::score::{FinalScore, PickResult};

/// Unique identity of a pick in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PickKey {
    pub date: NaiveDate,
    pub match_id: MatchId,
}

impl fmt::Display for PickKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.date, self.match_id)
    }
}

/// Inputs for a new pick, before classification.
#[derive(Debug, Clone)]
pub struct PickDraft {
    pub date: NaiveDate,
    pub league: String,
    pub fixture: String,
    pub kickoff_utc: NaiveTime,
    pub model_btts: Probability,
    pub model_o25: Probability,
    pub match_id: MatchId,
}

/// Every stored field of a pick, as read back from a ledger.
#[derive(Debug, Clone)]
pub struct PickParts {
    pub date: NaiveDate,
    pub league: String,
    pub fixture: String,
    pub kickoff_utc: NaiveTime,
    pub market: Market,
    pub confidence: Confidence,
    pub model_btts: Probability,
    pub model_o25: Probability,
    pub match_id: MatchId,
    pub final_score: Option<FinalScore>,
    pub result: PickResult,
}

/// A lifecycle invariant that a stored pick breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Graded although the match has not kicked off yet.
    PrematureResult,
    /// Graded without a final score.
    MissingScore,
    /// Pending but carrying a final score.
    StaleScore,
}

impl Violation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrematureResult => "premature_result",
            Self::MissingScore => "missing_score",
            Self::StaleScore => "stale_score",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One predicted outcome for one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick {
    date: NaiveDate,
    league: String,
    fixture: String,
    kickoff_utc: NaiveTime,
    market: Market,
    confidence: Confidence,
    model_btts: Probability,
    model_o25: Probability,
    match_id: MatchId,
    final_score: Option<FinalScore>,
    result: PickResult,
}

impl Pick {
    /// Create a pending pick, classifying it from the model probabilities.
    #[must_use]
    pub fn classify(draft: PickDraft) -> Self {
        Self {
            market: market_for(draft.model_btts, draft.model_o25),
            confidence: confidence_for(draft.model_btts, draft.model_o25),
            date: draft.date,
            league: draft.league,
            fixture: draft.fixture,
            kickoff_utc: draft.kickoff_utc,
            model_btts: draft.model_btts,
            model_o25: draft.model_o25,
            match_id: draft.match_id,
            final_score: None,
            result: PickResult::Pending,
        }
    }

    /// Rebuild a pick from stored fields without re-classifying it.
    ///
    /// Stored rows may break lifecycle invariants (see [`Pick::violation`]);
    /// they are kept as-is so the grader can repair them.
    #[must_use]
    pub fn restore(parts: PickParts) -> Self {
        Self {
            date: parts.date,
            league: parts.league,
            fixture: parts.fixture,
            kickoff_utc: parts.kickoff_utc,
            market: parts.market,
            confidence: parts.confidence,
            model_btts: parts.model_btts,
            model_o25: parts.model_o25,
            match_id: parts.match_id,
            final_score: parts.final_score,
            result: parts.result,
        }
    }

    #[must_use]
    pub fn key(&self) -> PickKey {
        PickKey {
            date: self.date,
            match_id: self.match_id.clone(),
        }
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn league(&self) -> &str {
        &self.league
    }

    /// Display label, `"<home> vs <away>"`.
    #[must_use]
    pub fn fixture(&self) -> &str {
        &self.fixture
    }

    #[must_use]
    pub const fn kickoff_utc(&self) -> NaiveTime {
        self.kickoff_utc
    }

    #[must_use]
    pub const fn market(&self) -> Market {
        self.market
    }

    #[must_use]
    pub const fn confidence(&self) -> Confidence {
        self.confidence
    }

    #[must_use]
    pub const fn model_btts(&self) -> Probability {
        self.model_btts
    }

    #[must_use]
    pub const fn model_o25(&self) -> Probability {
        self.model_o25
    }

    #[must_use]
    pub fn match_id(&self) -> &MatchId {
        &self.match_id
    }

    #[must_use]
    pub const fn final_score(&self) -> Option<FinalScore> {
        self.final_score
    }

    #[must_use]
    pub const fn result(&self) -> PickResult {
        self.result
    }

    #[must_use]
    pub const fn is_graded(&self) -> bool {
        self.result.is_graded()
    }

    /// Kickoff as a UTC instant.
    #[must_use]
    pub fn kickoff_at(&self) -> DateTime<Utc> {
        self.date.and_time(self.kickoff_utc).and_utc()
    }

    #[must_use]
    pub fn has_kicked_off(&self, now: DateTime<Utc>) -> bool {
        self.kickoff_at() <= now
    }

    /// The stronger of the two model probabilities.
    #[must_use]
    pub fn promise(&self) -> Probability {
        self.model_btts.max(self.model_o25)
    }

    /// Model probability of the chosen market.
    #[must_use]
    pub const fn market_probability(&self) -> Probability {
        match self.market {
            Market::Btts => self.model_btts,
            Market::Over25 => self.model_o25,
        }
    }

    /// Record the final score and grade the pick by its own market.
    pub fn record_result(&mut self, score: FinalScore) -> PickResult {
        self.result = self.market.grade(score);
        self.final_score = Some(score);
        self.result
    }

    /// Drop any grading and return the pick to pending.
    pub fn revert_to_pending(&mut self) {
        self.result = PickResult::Pending;
        self.final_score = None;
    }

    /// The first lifecycle invariant this pick breaks at `now`, if any.
    #[must_use]
    pub fn violation(&self, now: DateTime<Utc>) -> Option<Violation> {
        match (self.result.is_graded(), self.final_score.is_some()) {
            (true, _) if !self.has_kicked_off(now) => Some(Violation::PrematureResult),
            (true, false) => Some(Violation::MissingScore),
            (false, true) => Some(Violation::StaleScore),
            _ => None,
        }
    }
}
