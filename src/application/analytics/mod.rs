//! Read-only reductions over the ledger.
//!
//! Every reducer takes loaded picks and an optional date filter and reads only
//! graded rows (W or L). Empty input yields `None` or an empty ranking; no
//! reducer divides by zero.

pub mod accuracy;
pub mod lie_index;
pub mod patterns;
pub mod recommendations;

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::Pick;

pub use accuracy::{accuracy, AccuracyReport};
pub use lie_index::{lie_index, LieIndexReport, LieTally};
pub use patterns::{rank_patterns, Band, Pattern, PatternQuery};
pub use recommendations::{listing, recommendations, top_split, TopSplit, TOP_PICKS};

/// Win/loss counts of a group of graded picks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub wins: usize,
    pub total: usize,
}

impl Tally {
    /// Count graded picks; pending ones are ignored.
    pub fn of<'a>(picks: impl IntoIterator<Item = &'a Pick>) -> Self {
        picks.into_iter().fold(Self::default(), |mut tally, pick| {
            tally.add(pick);
            tally
        })
    }

    pub fn add(&mut self, pick: &Pick) {
        if pick.is_graded() {
            self.total += 1;
            if pick.result().is_win() {
                self.wins += 1;
            }
        }
    }

    #[must_use]
    pub const fn losses(&self) -> usize {
        self.total - self.wins
    }

    /// Win rate in percent, or `None` for an empty group.
    #[must_use]
    pub fn win_rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.wins as f64 * 100.0 / self.total as f64)
    }

    /// Order by win rate without floating point; empty groups sort lowest.
    #[must_use]
    pub fn cmp_rate(&self, other: &Self) -> Ordering {
        match (self.total, other.total) {
            (0, 0) => Ordering::Equal,
            (0, _) => Ordering::Less,
            (_, 0) => Ordering::Greater,
            _ => (self.wins * other.total).cmp(&(other.wins * self.total)),
        }
    }
}

/// One keyed group of a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment<K, V> {
    pub key: K,
    #[serde(flatten)]
    pub value: V,
}

/// Graded picks, restricted to `date` when given, in ledger order.
pub fn graded(picks: &[Pick], date: Option<NaiveDate>) -> impl Iterator<Item = &Pick> {
    picks
        .iter()
        .filter(move |p| p.is_graded() && date.map_or(true, |d| p.date() == d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::pick;

    #[test]
    fn test_tally_ignores_pending() {
        let picks = vec![
            pick("1").graded(1, 1).build(),
            pick("2").graded(0, 1).build(),
            pick("3").build(),
        ];
        let tally = Tally::of(&picks);
        assert_eq!(tally, Tally { wins: 1, total: 2 });
        assert_eq!(tally.losses(), 1);
        assert_eq!(tally.win_rate(), Some(50.0));
        assert_eq!(Tally::default().win_rate(), None);
    }

    #[test]
    fn test_cmp_rate_is_exact() {
        let two_thirds = Tally { wins: 2, total: 3 };
        let four_sixths = Tally { wins: 4, total: 6 };
        let half = Tally { wins: 1, total: 2 };
        assert_eq!(two_thirds.cmp_rate(&four_sixths), Ordering::Equal);
        assert_eq!(two_thirds.cmp_rate(&half), Ordering::Greater);
        assert_eq!(Tally::default().cmp_rate(&half), Ordering::Less);
    }

    #[test]
    fn test_graded_filters_date() {
        let picks = vec![
            pick("1").graded(1, 1).build(),
            pick("2").date("2025-03-09").graded(1, 1).build(),
            pick("3").build(),
        ];
        assert_eq!(graded(&picks, None).count(), 2);
        let day = NaiveDate::from_ymd_opt(2025, 3, 9);
        let ids: Vec<_> = graded(&picks, day).map(|p| p.match_id().as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }
}
