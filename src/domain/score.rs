//! Final scores and pick results.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::DomainError;

/// Full-time score of a match, home goals first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FinalScore {
    pub home: u32,
    pub away: u32,
}

impl FinalScore {
    #[must_use]
    pub const fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    #[must_use]
    pub const fn total_goals(self) -> u32 {
        self.home + self.away
    }
}

impl fmt::Display for FinalScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

impl FromStr for FinalScore {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidScore {
            value: s.to_string(),
        };
        let (home, away) = s.trim().split_once('-').ok_or_else(invalid)?;
        let home = home.trim().parse().map_err(|_| invalid())?;
        let away = away.trim().parse().map_err(|_| invalid())?;
        Ok(Self { home, away })
    }
}

impl Serialize for FinalScore {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Grading state of a pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum PickResult {
    #[default]
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
}

impl PickResult {
    /// Ledger code for this result.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Win => "W",
            Self::Loss => "L",
        }
    }

    /// True for W or L.
    #[must_use]
    pub const fn is_graded(self) -> bool {
        !matches!(self, Self::Pending)
    }

    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Win)
    }
}

impl fmt::Display for PickResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PickResult {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "W" | "w" => Ok(Self::Win),
            "L" | "l" => Ok(Self::Loss),
            p if p.eq_ignore_ascii_case("pending") => Ok(Self::Pending),
            _ => Err(DomainError::UnknownResult {
                value: s.to_string(),
            }),
        }
    }
}
