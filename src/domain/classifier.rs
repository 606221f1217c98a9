//! Pick classification rules.
//!
//! Both rules run once, when a pick is created, and their output is frozen
//! into the ledger row.

use super::market::{Confidence, Market, Probability};

/// Probability at or above which a pick is STRONG.
pub const STRONG_THRESHOLD: u8 = 70;

/// Probability at or above which a pick is MEDIUM.
pub const MEDIUM_THRESHOLD: u8 = 60;

/// Confidence tier from the stronger of the two model probabilities.
#[must_use]
pub fn confidence_for(btts: Probability, over25: Probability) -> Confidence {
    let strongest = btts.max(over25).percent();
    if strongest >= STRONG_THRESHOLD {
        Confidence::Strong
    } else if strongest >= MEDIUM_THRESHOLD {
        Confidence::Medium
    } else {
        Confidence::Pass
    }
}

/// Market with the higher probability; ties go to BTTS.
#[must_use]
pub fn market_for(btts: Probability, over25: Probability) -> Market {
    if btts >= over25 {
        Market::Btts
    } else {
        Market::Over25
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(v: i64) -> Probability {
        Probability::clamped(v)
    }

    #[test]
    fn confidence_tiers_use_the_stronger_probability() {
        assert_eq!(confidence_for(p(70), p(10)), Confidence::Strong);
        assert_eq!(confidence_for(p(10), p(85)), Confidence::Strong);
        assert_eq!(confidence_for(p(69), p(60)), Confidence::Medium);
        assert_eq!(confidence_for(p(59), p(59)), Confidence::Pass);
        assert_eq!(confidence_for(p(0), p(0)), Confidence::Pass);
    }

    #[test]
    fn confidence_boundaries_are_inclusive() {
        assert_eq!(confidence_for(p(60), p(0)), Confidence::Medium);
        assert_eq!(confidence_for(p(0), p(70)), Confidence::Strong);
    }

    #[test]
    fn market_prefers_higher_probability() {
        assert_eq!(market_for(p(72), p(65)), Market::Btts);
        assert_eq!(market_for(p(50), p(51)), Market::Over25);
    }

    #[test]
    fn market_tie_favors_btts() {
        assert_eq!(market_for(p(64), p(64)), Market::Btts);
    }
}
