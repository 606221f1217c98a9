//! Match data source port.
//!
//! The slate generator lists matches scheduled on a date; the result grader
//! resolves single matches by their external identifier. Implementations
//! return [`SourceError`] on transport or API failure, which callers count
//! and skip rather than treat as fatal.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{CompetitionId, FinalScore, MatchId, Probability};
use crate::error::SourceError;

/// A scheduled match with the model's per-match probability estimates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    pub competition_id: CompetitionId,
    pub match_id: MatchId,
    pub home_name: String,
    pub away_name: String,
    /// Kickoff as Unix seconds.
    pub kickoff_unix: i64,
    pub btts_probability: Probability,
    pub over25_probability: Probability,
}

impl MatchSummary {
    /// Kickoff as a UTC instant, if the timestamp is representable.
    #[must_use]
    pub fn kickoff(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.kickoff_unix, 0)
    }

    /// Display label used in the ledger's `match` column.
    #[must_use]
    pub fn fixture(&self) -> String {
        format!("{} vs {}", self.home_name, self.away_name)
    }
}

/// Progress of a match as reported by the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    /// Full time; goal counts are authoritative.
    Complete,
    /// Suspended or cancelled.
    Abandoned,
}

impl MatchStatus {
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Complete => "complete",
            Self::Abandoned => "abandoned",
        }
    }
}

/// Current state of a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchDetail {
    pub status: MatchStatus,
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
}

impl MatchDetail {
    /// Final score when both goal counts are known.
    #[must_use]
    pub fn final_score(&self) -> Option<FinalScore> {
        Some(FinalScore::new(self.home_goals?, self.away_goals?))
    }
}

/// Provider of fixtures and results.
#[async_trait]
pub trait MatchDataSource: Send + Sync {
    /// List matches scheduled on `date` for the given competitions.
    ///
    /// Implementations may return matches outside the requested competitions
    /// or date; callers filter.
    async fn matches_on_date(
        &self,
        date: NaiveDate,
        competitions: &[CompetitionId],
    ) -> Result<Vec<MatchSummary>, SourceError>;

    /// Resolve one match. `Ok(None)` means the source does not know it.
    async fn match_by_id(&self, match_id: &MatchId) -> Result<Option<MatchDetail>, SourceError>;

    /// Source name for logging.
    fn source_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_score_requires_both_counts() {
        let detail = MatchDetail {
            status: MatchStatus::Complete,
            home_goals: Some(2),
            away_goals: None,
        };
        assert!(detail.final_score().is_none());

        let detail = MatchDetail {
            away_goals: Some(0),
            ..detail
        };
        assert_eq!(detail.final_score(), Some(FinalScore::new(2, 0)));
    }

    #[test]
    fn summary_kickoff_and_label() {
        let summary = MatchSummary {
            competition_id: CompetitionId::new(12325),
            match_id: MatchId::from("1"),
            home_name: "Basel".into(),
            away_name: "Servette".into(),
            kickoff_unix: 1_741_455_000,
            btts_probability: Probability::clamped(60),
            over25_probability: Probability::clamped(55),
        };
        assert_eq!(summary.fixture(), "Basel vs Servette");
        assert_eq!(
            summary.kickoff().unwrap().to_rfc3339(),
            "2025-03-08T17:30:00+00:00"
        );
    }
}
