//! Hit rate, overall and by confidence, league and market.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::{graded, Segment, Tally};
use crate::domain::{Confidence, Market, Pick};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyReport {
    pub date: Option<NaiveDate>,
    pub overall: Tally,
    /// STRONG, MEDIUM, PASS order; empty tiers omitted.
    pub by_confidence: Vec<Segment<Confidence, Tally>>,
    /// League name order.
    pub by_league: Vec<Segment<String, Tally>>,
    pub by_market: Vec<Segment<Market, Tally>>,
}

/// Accuracy of graded picks, or `None` when there are none.
pub fn accuracy(picks: &[Pick], date: Option<NaiveDate>) -> Option<AccuracyReport> {
    let mut overall = Tally::default();
    let mut by_confidence: BTreeMap<Confidence, Tally> = BTreeMap::new();
    let mut by_league: BTreeMap<String, Tally> = BTreeMap::new();
    let mut by_market: BTreeMap<Market, Tally> = BTreeMap::new();

    for pick in graded(picks, date) {
        overall.add(pick);
        by_confidence.entry(pick.confidence()).or_default().add(pick);
        by_league
            .entry(pick.league().to_string())
            .or_default()
            .add(pick);
        by_market.entry(pick.market()).or_default().add(pick);
    }

    if overall.total == 0 {
        return None;
    }

    Some(AccuracyReport {
        date,
        overall,
        by_confidence: segments(by_confidence),
        by_league: segments(by_league),
        by_market: segments(by_market),
    })
}

fn segments<K, V>(groups: BTreeMap<K, V>) -> Vec<Segment<K, V>> {
    groups
        .into_iter()
        .map(|(key, value)| Segment { key, value })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::pick;

    #[test]
    fn test_three_wins_two_losses_is_sixty_percent() {
        let picks = vec![
            pick("1").graded(1, 1).build(),
            pick("2").graded(2, 1).build(),
            pick("3").graded(3, 3).build(),
            pick("4").graded(1, 0).build(),
            pick("5").graded(0, 0).build(),
            pick("6").build(),
        ];
        let report = accuracy(&picks, None).unwrap();
        assert_eq!(report.overall, Tally { wins: 3, total: 5 });
        assert_eq!(report.overall.win_rate(), Some(60.0));
    }

    #[test]
    fn test_breakdowns() {
        let picks = vec![
            pick("1").probabilities(80, 50).graded(1, 1).build(),
            pick("2").probabilities(62, 40).graded(1, 0).build(),
            pick("3")
                .league("Austria Bundesliga")
                .probabilities(40, 75)
                .graded(2, 1)
                .build(),
        ];
        let report = accuracy(&picks, None).unwrap();

        let tiers: Vec<_> = report
            .by_confidence
            .iter()
            .map(|s| (s.key, s.value.wins, s.value.total))
            .collect();
        assert_eq!(
            tiers,
            vec![(Confidence::Strong, 2, 2), (Confidence::Medium, 0, 1)]
        );

        let leagues: Vec<_> = report.by_league.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(leagues, vec!["Austria Bundesliga", "Switzerland Super League"]);

        let markets: Vec<_> = report
            .by_market
            .iter()
            .map(|s| (s.key, s.value.total))
            .collect();
        assert_eq!(markets, vec![(Market::Btts, 2), (Market::Over25, 1)]);
    }

    #[test]
    fn test_no_graded_rows_is_no_data() {
        assert!(accuracy(&[], None).is_none());
        assert!(accuracy(&[pick("1").build()], None).is_none());
    }

    #[test]
    fn test_date_filter() {
        let picks = vec![
            pick("1").graded(1, 1).build(),
            pick("2").date("2025-03-09").graded(1, 0).build(),
        ];
        let day = NaiveDate::from_ymd_opt(2025, 3, 9);
        let report = accuracy(&picks, day).unwrap();
        assert_eq!(report.overall, Tally { wins: 0, total: 1 });
        assert!(accuracy(&picks, NaiveDate::from_ymd_opt(2025, 1, 1)).is_none());
    }
}
