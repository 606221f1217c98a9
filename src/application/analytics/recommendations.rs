//! Slate views: listing, recommendations and the top picks split.

use std::cmp::Reverse;

use chrono::NaiveDate;
use serde::Serialize;

use super::{graded, Tally};
use crate::domain::Pick;

/// Picks shown per day as the headline selection.
pub const TOP_PICKS: usize = 5;

/// All picks, optionally for one date, in ledger order.
pub fn listing(picks: &[Pick], date: Option<NaiveDate>) -> Vec<&Pick> {
    picks
        .iter()
        .filter(|p| date.map_or(true, |d| p.date() == d))
        .collect()
}

/// STRONG and MEDIUM picks for `date`, STRONG first, then by kickoff.
pub fn recommendations(picks: &[Pick], date: NaiveDate) -> Vec<&Pick> {
    let mut selected: Vec<&Pick> = picks
        .iter()
        .filter(|p| p.date() == date && p.confidence().is_recommended())
        .collect();
    selected.sort_by_key(|p| (Reverse(p.confidence().weight()), p.kickoff_utc()));
    selected
}

/// Accuracy of a day's strongest picks against the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopSplit {
    pub date: NaiveDate,
    pub top: Tally,
    pub rest: Tally,
    pub overall: Tally,
}

/// Split a day's graded picks into the first [`TOP_PICKS`] by strength and the rest.
///
/// Strength is confidence weight, then model promise, then earlier kickoff.
/// Needs more graded picks than [`TOP_PICKS`]; otherwise `None`.
pub fn top_split(picks: &[Pick], date: NaiveDate) -> Option<TopSplit> {
    let mut day: Vec<&Pick> = graded(picks, Some(date)).collect();
    if day.len() <= TOP_PICKS {
        return None;
    }
    day.sort_by_key(|p| {
        (
            Reverse(p.confidence().weight()),
            Reverse(p.promise()),
            p.kickoff_utc(),
        )
    });

    let (top, rest) = day.split_at(TOP_PICKS);
    Some(TopSplit {
        date,
        top: Tally::of(top.iter().copied()),
        rest: Tally::of(rest.iter().copied()),
        overall: Tally::of(day.iter().copied()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Confidence;
    use crate::testkit::domain::{day, pick};

    const DATE: &str = "2025-03-08";

    #[test]
    fn test_recommendations_order_and_filter() {
        let picks = vec![
            pick("medium-early").probabilities(61, 50).kickoff("12:00").build(),
            pick("pass").probabilities(40, 50).kickoff("11:00").build(),
            pick("strong-late").probabilities(75, 50).kickoff("20:00").build(),
            pick("strong-early").probabilities(71, 50).kickoff("14:00").build(),
            pick("other-day").date("2025-03-09").probabilities(90, 50).build(),
        ];
        let ids: Vec<_> = recommendations(&picks, day(DATE))
            .iter()
            .map(|p| p.match_id().as_str())
            .collect();
        assert_eq!(ids, vec!["strong-early", "strong-late", "medium-early"]);
    }

    #[test]
    fn test_listing_keeps_ledger_order() {
        let picks = vec![
            pick("b").build(),
            pick("a").date("2025-03-09").build(),
            pick("c").build(),
        ];
        assert_eq!(listing(&picks, None).len(), 3);
        let ids: Vec<_> = listing(&picks, Some(day(DATE)))
            .iter()
            .map(|p| p.match_id().as_str())
            .collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_top_split_needs_six_graded() {
        let five: Vec<_> = (0..5)
            .map(|i| pick(&i.to_string()).graded(1, 1).build())
            .collect();
        assert!(top_split(&five, day(DATE)).is_none());
    }

    #[test]
    fn test_top_split_ranks_by_strength() {
        // Five STRONG winners and two weaker losers.
        let mut picks: Vec<_> = (0..5)
            .map(|i| {
                pick(&format!("s{i}"))
                    .probabilities(75 + i, 50)
                    .graded(1, 1)
                    .build()
            })
            .collect();
        picks.push(pick("m").probabilities(65, 50).graded(0, 1).build());
        picks.push(pick("p").probabilities(50, 40).graded(0, 1).build());
        picks.push(pick("pending").probabilities(99, 10).build());
        assert_eq!(picks[5].confidence(), Confidence::Medium);

        let split = top_split(&picks, day(DATE)).unwrap();
        assert_eq!(split.top, Tally { wins: 5, total: 5 });
        assert_eq!(split.rest, Tally { wins: 0, total: 2 });
        assert_eq!(split.overall, Tally { wins: 5, total: 7 });
    }

    #[test]
    fn test_top_split_breaks_tier_ties_by_promise() {
        let mut picks: Vec<_> = (0..5)
            .map(|i| {
                pick(&format!("hi{i}"))
                    .probabilities(90, 50)
                    .graded(1, 0)
                    .build()
            })
            .collect();
        picks.push(pick("lo").probabilities(71, 50).graded(1, 1).build());

        let split = top_split(&picks, day(DATE)).unwrap();
        assert_eq!(split.top, Tally { wins: 0, total: 5 });
        assert_eq!(split.rest, Tally { wins: 1, total: 1 });
    }
}
