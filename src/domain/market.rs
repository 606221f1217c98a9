//! Betting markets, confidence tiers and model probabilities.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::DomainError;
use super::score::{FinalScore, PickResult};

/// The outcome a pick predicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Market {
    /// Both teams score.
    #[serde(rename = "BTTS")]
    Btts,
    /// Three or more total goals.
    #[serde(rename = "O2.5")]
    Over25,
}

impl Market {
    /// Ledger code for this market.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Btts => "BTTS",
            Self::Over25 => "O2.5",
        }
    }

    /// Grade a final score against this market.
    ///
    /// BTTS wins when both sides scored; OVER 2.5 wins on three or more goals.
    #[must_use]
    pub const fn grade(self, score: FinalScore) -> PickResult {
        let won = match self {
            Self::Btts => score.home > 0 && score.away > 0,
            Self::Over25 => score.total_goals() >= 3,
        };
        if won {
            PickResult::Win
        } else {
            PickResult::Loss
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Market {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BTTS" => Ok(Self::Btts),
            // Older ledgers wrote the dotless form.
            "O2.5" | "O25" => Ok(Self::Over25),
            _ => Err(DomainError::UnknownMarket {
                value: s.to_string(),
            }),
        }
    }
}

/// Strength of a pick, derived once from the model probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    Strong,
    Medium,
    Pass,
}

impl Confidence {
    pub const ALL: [Self; 3] = [Self::Strong, Self::Medium, Self::Pass];

    /// Ledger code for this tier.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Strong => "STRONG",
            Self::Medium => "MEDIUM",
            Self::Pass => "PASS",
        }
    }

    /// Ranking weight used when ordering picks by strength.
    #[must_use]
    pub const fn weight(self) -> u8 {
        match self {
            Self::Strong => 3,
            Self::Medium => 2,
            Self::Pass => 1,
        }
    }

    /// Whether this tier is surfaced as a recommendation.
    #[must_use]
    pub const fn is_recommended(self) -> bool {
        matches!(self, Self::Strong | Self::Medium)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Confidence {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STRONG" => Ok(Self::Strong),
            "MEDIUM" => Ok(Self::Medium),
            "PASS" => Ok(Self::Pass),
            _ => Err(DomainError::UnknownConfidence {
                value: s.to_string(),
            }),
        }
    }
}

/// A model probability expressed as an integer percentage (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Probability(u8);

impl Probability {
    /// Validate a percentage.
    pub fn try_new(value: i64) -> Result<Self, DomainError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= 100)
            .map(Self)
            .ok_or(DomainError::ProbabilityOutOfRange { value })
    }

    /// Clamp an arbitrary source value into 0-100.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Probability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s.trim().parse().map_err(|_| DomainError::InvalidProbability {
            value: s.to_string(),
        })?;
        Self::try_new(value)
    }
}
