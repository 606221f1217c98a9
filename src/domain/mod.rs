//! Source-agnostic domain logic: picks, markets, scores and classification.

pub mod classifier;
pub mod error;
pub mod id;
pub mod market;
pub mod pick;
pub mod score;

pub use classifier::{confidence_for, market_for};
pub use id::{CompetitionId, LeagueKey, MatchId};
pub use market::{Confidence, Market, Probability};
pub use pick::{Pick, PickDraft, PickKey, PickParts, Violation};
pub use score::{FinalScore, PickResult};
