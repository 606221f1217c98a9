//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for dates, picks, fixtures and match
//! details so tests focus on assertions rather than construction boilerplate.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::domain::{
    CompetitionId, FinalScore, MatchId, Pick, PickDraft, PickParts, PickResult, Probability,
};
use crate::port::{MatchDetail, MatchStatus, MatchSummary};

/// Default slate date of test picks.
pub const DEFAULT_DATE: &str = "2025-03-08";

/// Parse a `YYYY-MM-DD` date.
///
/// # Panics
///
/// Panics on a malformed date.
pub fn day(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid test date")
}

/// UTC instant at `HH:MM` on `date`.
///
/// # Panics
///
/// Panics on a malformed date or time.
pub fn at(date: &str, time: &str) -> DateTime<Utc> {
    let time = NaiveTime::parse_from_str(time, "%H:%M").expect("valid test time");
    day(date).and_time(time).and_utc()
}

/// Builder for ledger picks, classified from the model probabilities.
#[derive(Debug, Clone)]
pub struct PickBuilder {
    draft: PickDraft,
    score: Option<FinalScore>,
    stored_result: Option<PickResult>,
    stored_score: Option<Option<FinalScore>>,
}

impl PickBuilder {
    /// A pending pick on [`DEFAULT_DATE`] at 17:30 with BTTS 72 / O2.5 65.
    pub fn new(match_id: &str) -> Self {
        Self {
            draft: PickDraft {
                date: day(DEFAULT_DATE),
                league: "Switzerland Super League".into(),
                fixture: format!("Home {match_id} vs Away {match_id}"),
                kickoff_utc: NaiveTime::from_hms_opt(17, 30, 0).expect("valid time"),
                model_btts: Probability::clamped(72),
                model_o25: Probability::clamped(65),
                match_id: MatchId::from(match_id),
            },
            score: None,
            stored_result: None,
            stored_score: None,
        }
    }

    #[must_use]
    pub fn date(mut self, date: &str) -> Self {
        self.draft.date = day(date);
        self
    }

    /// Kickoff as `HH:MM` UTC.
    ///
    /// # Panics
    ///
    /// Panics on a malformed time.
    #[must_use]
    pub fn kickoff(mut self, time: &str) -> Self {
        self.draft.kickoff_utc = NaiveTime::parse_from_str(time, "%H:%M").expect("valid time");
        self
    }

    #[must_use]
    pub fn league(mut self, league: &str) -> Self {
        self.draft.league = league.into();
        self
    }

    #[must_use]
    pub fn fixture(mut self, fixture: &str) -> Self {
        self.draft.fixture = fixture.into();
        self
    }

    #[must_use]
    pub fn probabilities(mut self, btts: i64, o25: i64) -> Self {
        self.draft.model_btts = Probability::clamped(btts);
        self.draft.model_o25 = Probability::clamped(o25);
        self
    }

    /// Grade the pick with this final score.
    #[must_use]
    pub fn graded(mut self, home: u32, away: u32) -> Self {
        self.score = Some(FinalScore::new(home, away));
        self
    }

    /// Force the stored result, bypassing grading.
    #[must_use]
    pub fn stored_result(mut self, result: PickResult) -> Self {
        self.stored_result = Some(result);
        self
    }

    /// Force the stored score, bypassing grading.
    #[must_use]
    pub fn stored_score(mut self, score: Option<FinalScore>) -> Self {
        self.stored_score = Some(score);
        self
    }

    pub fn build(self) -> Pick {
        let mut pick = Pick::classify(self.draft);
        if let Some(score) = self.score {
            pick.record_result(score);
        }
        if self.stored_result.is_none() && self.stored_score.is_none() {
            return pick;
        }
        Pick::restore(PickParts {
            date: pick.date(),
            league: pick.league().to_string(),
            fixture: pick.fixture().to_string(),
            kickoff_utc: pick.kickoff_utc(),
            market: pick.market(),
            confidence: pick.confidence(),
            model_btts: pick.model_btts(),
            model_o25: pick.model_o25(),
            match_id: pick.match_id().clone(),
            final_score: self.stored_score.unwrap_or(pick.final_score()),
            result: self.stored_result.unwrap_or(pick.result()),
        })
    }
}

/// Shorthand for `PickBuilder::new(match_id)`.
pub fn pick(match_id: &str) -> PickBuilder {
    PickBuilder::new(match_id)
}

/// A fixture in `competition` kicking off at `kickoff`.
pub fn fixture(
    match_id: &str,
    competition: u64,
    kickoff: DateTime<Utc>,
    btts: i64,
    o25: i64,
) -> MatchSummary {
    MatchSummary {
        competition_id: CompetitionId::new(competition),
        match_id: MatchId::from(match_id),
        home_name: format!("Home {match_id}"),
        away_name: format!("Away {match_id}"),
        kickoff_unix: kickoff.timestamp(),
        btts_probability: Probability::clamped(btts),
        over25_probability: Probability::clamped(o25),
    }
}

/// A completed match with a known score.
pub fn finished(home: u32, away: u32) -> MatchDetail {
    MatchDetail {
        status: MatchStatus::Complete,
        home_goals: Some(home),
        away_goals: Some(away),
    }
}

/// A match in `status` without goal counts.
pub fn unscored(status: MatchStatus) -> MatchDetail {
    MatchDetail {
        status,
        home_goals: None,
        away_goals: None,
    }
}
