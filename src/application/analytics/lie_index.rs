//! Calibration "lie index".
//!
//! For a graded pick the model promised `max(model_btts, model_o25)` percent;
//! the outcome delivered 100 on a win and 0 on a loss. The lie is the absolute
//! gap between the two, and a group's index is the mean lie.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::{graded, Segment};
use crate::domain::{Confidence, Pick};

/// Running sum of lies for a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LieTally {
    pub sum: u64,
    pub count: usize,
}

impl LieTally {
    fn add(&mut self, lie: u8) {
        self.sum += u64::from(lie);
        self.count += 1;
    }

    /// Mean lie, or `None` for an empty group.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum as f64 / self.count as f64)
    }
}

/// Lie of one pick, or `None` while it is pending.
#[must_use]
pub fn lie_of(pick: &Pick) -> Option<u8> {
    if !pick.is_graded() {
        return None;
    }
    let actual: u8 = if pick.result().is_win() { 100 } else { 0 };
    Some(pick.promise().percent().abs_diff(actual))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LieIndexReport {
    pub date: Option<NaiveDate>,
    pub overall: LieTally,
    pub by_confidence: Vec<Segment<Confidence, LieTally>>,
    pub by_league: Vec<Segment<String, LieTally>>,
    pub by_league_confidence: Vec<Segment<(String, Confidence), LieTally>>,
}

/// Lie index of graded picks, or `None` when there are none.
pub fn lie_index(picks: &[Pick], date: Option<NaiveDate>) -> Option<LieIndexReport> {
    let mut overall = LieTally::default();
    let mut by_confidence: BTreeMap<Confidence, LieTally> = BTreeMap::new();
    let mut by_league: BTreeMap<String, LieTally> = BTreeMap::new();
    let mut by_league_confidence: BTreeMap<(String, Confidence), LieTally> = BTreeMap::new();

    for pick in graded(picks, date) {
        let Some(lie) = lie_of(pick) else {
            continue;
        };
        overall.add(lie);
        by_confidence.entry(pick.confidence()).or_default().add(lie);
        by_league
            .entry(pick.league().to_string())
            .or_default()
            .add(lie);
        by_league_confidence
            .entry((pick.league().to_string(), pick.confidence()))
            .or_default()
            .add(lie);
    }

    if overall.count == 0 {
        return None;
    }

    Some(LieIndexReport {
        date,
        overall,
        by_confidence: into_segments(by_confidence),
        by_league: into_segments(by_league),
        by_league_confidence: into_segments(by_league_confidence),
    })
}

fn into_segments<K>(groups: BTreeMap<K, LieTally>) -> Vec<Segment<K, LieTally>> {
    groups
        .into_iter()
        .map(|(key, value)| Segment { key, value })
        .collect()
}
