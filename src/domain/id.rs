//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// External match identifier - newtype for type safety.
///
/// This is the primary correlation key between a ledger row and the
/// match data source. The inner String is private to ensure all
/// construction goes through the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(String);

impl MatchId {
    /// Create a new `MatchId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the match ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MatchId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for MatchId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<u64> for MatchId {
    fn from(id: u64) -> Self {
        Self::new(id.to_string())
    }
}

/// Stable competition (league season) identifier at the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompetitionId(u64);

impl CompetitionId {
    /// Create a new `CompetitionId`.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw identifier.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CompetitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CompetitionId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Key of a league entry in the league table (e.g. `swiss`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeagueKey(String);

impl LeagueKey {
    /// Create a new `LeagueKey` from a string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the league key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeagueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LeagueKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for LeagueKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_id_from_numeric_source_id() {
        assert_eq!(MatchId::from(7_412_331_u64).as_str(), "7412331");
    }

    #[test]
    fn competition_id_deserializes_from_bare_integer() {
        #[derive(Deserialize)]
        struct Wrapper {
            id: CompetitionId,
        }
        let parsed: Wrapper = toml::from_str("id = 12325").unwrap();
        assert_eq!(parsed.id, CompetitionId::new(12325));
    }

    #[test]
    fn league_key_display_is_raw_key() {
        assert_eq!(LeagueKey::from("swiss").to_string(), "swiss");
    }
}
