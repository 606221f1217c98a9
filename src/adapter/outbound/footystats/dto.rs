//! FootyStats API payloads.
//!
//! Example `todays-matches` response:
//! ```json
//! {"success":true,"pager":{"current_page":1,"max_page":2},"data":[
//!   {"id":7412331,"competition_id":12325,"home_name":"Basel","away_name":"Servette",
//!    "date_unix":1741455000,"status":"incomplete","btts_potential":72,"o25_potential":65,
//!    "homeGoalCount":0,"awayGoalCount":0}]}
//! ```
//! The `match` endpoint wraps a single object of the same shape in `data`.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{CompetitionId, MatchId, Probability};
use crate::port::{MatchDetail, MatchStatus, MatchSummary};

#[derive(Debug, Deserialize)]
pub struct TodaysMatchesResponse {
    #[serde(default)]
    pub data: Vec<MatchDto>,
    #[serde(default)]
    pub pager: Option<Pager>,
}

#[derive(Debug, Deserialize)]
pub struct Pager {
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default = "first_page")]
    pub max_page: u32,
}

const fn first_page() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct MatchResponse {
    #[serde(default)]
    pub data: Option<MatchDto>,
}

/// One match as FootyStats reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchDto {
    pub id: u64,
    #[serde(default)]
    pub competition_id: u64,
    #[serde(default)]
    pub home_name: String,
    #[serde(default)]
    pub away_name: String,
    #[serde(default)]
    pub date_unix: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub btts_potential: Option<f64>,
    #[serde(default)]
    pub o25_potential: Option<f64>,
    /// `-1` until the match has a score.
    #[serde(default, rename = "homeGoalCount")]
    pub home_goal_count: Option<i64>,
    #[serde(default, rename = "awayGoalCount")]
    pub away_goal_count: Option<i64>,
}

fn probability(value: Option<f64>) -> Probability {
    // Truncates like an integer read of the raw value; absent reads as 0.
    Probability::clamped(value.unwrap_or(0.0) as i64)
}

fn goals(value: Option<i64>) -> Option<u32> {
    value.and_then(|g| u32::try_from(g).ok())
}

impl MatchDto {
    #[must_use]
    pub fn into_summary(self) -> MatchSummary {
        MatchSummary {
            competition_id: CompetitionId::new(self.competition_id),
            match_id: MatchId::from(self.id),
            btts_probability: probability(self.btts_potential),
            over25_probability: probability(self.o25_potential),
            home_name: self.home_name,
            away_name: self.away_name,
            kickoff_unix: self.date_unix,
        }
    }

    /// Map to a detail, judging `incomplete` matches against `now`.
    #[must_use]
    pub fn to_detail(&self, now: DateTime<Utc>) -> MatchDetail {
        let status = match self.status.trim().to_ascii_lowercase().as_str() {
            "complete" => MatchStatus::Complete,
            "suspended" | "canceled" | "cancelled" => MatchStatus::Abandoned,
            _ if self.date_unix > now.timestamp() => MatchStatus::Scheduled,
            _ => MatchStatus::InProgress,
        };
        MatchDetail {
            status,
            home_goals: goals(self.home_goal_count),
            away_goals: goals(self.away_goal_count),
        }
    }
}
