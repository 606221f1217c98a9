//! Pattern mining: which (market, tier, probability band) groups win most.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::{graded, Tally};
use crate::domain::{Confidence, Market, Pick, Probability};

/// Probability band of the chosen market. Values under 60 have no band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Band {
    #[serde(rename = "80-100")]
    From80,
    #[serde(rename = "75-79")]
    From75,
    #[serde(rename = "70-74")]
    From70,
    #[serde(rename = "65-69")]
    From65,
    #[serde(rename = "60-64")]
    From60,
}

impl Band {
    #[must_use]
    pub const fn of(probability: Probability) -> Option<Self> {
        match probability.percent() {
            80..=100 => Some(Self::From80),
            75..=79 => Some(Self::From75),
            70..=74 => Some(Self::From70),
            65..=69 => Some(Self::From65),
            60..=64 => Some(Self::From60),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::From80 => "80-100",
            Self::From75 => "75-79",
            Self::From70 => "70-74",
            Self::From65 => "65-69",
            Self::From60 => "60-64",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A ranked group and its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pattern {
    pub market: Market,
    pub confidence: Confidence,
    pub band: Band,
    #[serde(flatten)]
    pub tally: Tally,
}

/// Parameters of a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternQuery {
    pub date: Option<NaiveDate>,
    /// Groups with fewer graded picks are dropped, whatever their rate.
    pub min_samples: usize,
    /// Number of groups kept after ranking.
    pub top: usize,
}

/// Rank groups by win rate desc, then sample count desc.
///
/// Remaining ties fall back to market, tier and band order so the ranking is
/// deterministic.
pub fn rank_patterns(picks: &[Pick], query: &PatternQuery) -> Vec<Pattern> {
    let mut groups: BTreeMap<(Market, Confidence, Band), Tally> = BTreeMap::new();
    for pick in graded(picks, query.date) {
        let Some(band) = Band::of(pick.market_probability()) else {
            continue;
        };
        groups
            .entry((pick.market(), pick.confidence(), band))
            .or_default()
            .add(pick);
    }

    let mut patterns: Vec<Pattern> = groups
        .into_iter()
        .filter(|(_, tally)| tally.total >= query.min_samples)
        .map(|((market, confidence, band), tally)| Pattern {
            market,
            confidence,
            band,
            tally,
        })
        .collect();

    // Stable sort keeps key order among full ties.
    patterns.sort_by(|a, b| {
        b.tally
            .cmp_rate(&a.tally)
            .then_with(|| b.tally.total.cmp(&a.tally.total))
    });
    patterns.truncate(query.top);
    patterns
}
