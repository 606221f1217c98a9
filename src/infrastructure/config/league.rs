//! Tracked league table.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{CompetitionId, LeagueKey};
use crate::error::ConfigError;

/// One tracked league.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct League {
    /// Display name, written to the ledger's `league` column.
    pub name: String,
    #[serde(default)]
    pub country: String,
    /// Current-season competition id at the data source.
    pub competition_id: CompetitionId,
}

/// Immutable table of tracked leagues, keyed by config key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LeagueTable(BTreeMap<LeagueKey, League>);

impl LeagueTable {
    #[must_use]
    pub fn new(leagues: BTreeMap<LeagueKey, League>) -> Self {
        Self(leagues)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, key: &LeagueKey) -> Option<&League> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LeagueKey, &League)> {
        self.0.iter()
    }

    /// Resolve a league selection.
    ///
    /// An empty `keys` selects every league. Unknown keys fail before anything
    /// is fetched. Repeated keys select once.
    pub fn select(&self, keys: &[LeagueKey]) -> Result<Vec<(LeagueKey, League)>, ConfigError> {
        if keys.is_empty() {
            return Ok(self
                .0
                .iter()
                .map(|(key, league)| (key.clone(), league.clone()))
                .collect());
        }

        let mut seen = BTreeSet::new();
        let mut selected = Vec::with_capacity(keys.len());
        for key in keys {
            let league = self.get(key).ok_or_else(|| ConfigError::UnknownLeague {
                key: key.to_string(),
                known: self.known_keys(),
            })?;
            if seen.insert(key) {
                selected.push((key.clone(), league.clone()));
            }
        }
        Ok(selected)
    }

    fn known_keys(&self) -> String {
        self.0
            .keys()
            .map(LeagueKey::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.is_empty() {
            return Err(ConfigError::MissingField { field: "leagues" });
        }

        let mut ids = BTreeMap::new();
        for (key, league) in &self.0 {
            if league.name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "leagues.name",
                    reason: format!("league '{key}' has an empty name"),
                });
            }
            if let Some(other) = ids.insert(league.competition_id, key) {
                return Err(ConfigError::InvalidValue {
                    field: "leagues.competition_id",
                    reason: format!(
                        "competition id {} is used by both '{other}' and '{key}'",
                        league.competition_id
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LeagueTable {
        toml::from_str(
            r#"
            [swiss]
            name = "Switzerland Super League"
            country = "Switzerland"
            competition_id = 12325

            [austria]
            name = "Austria Bundesliga"
            country = "Austria"
            competition_id = 12472
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_select_all_is_key_ordered() {
        let selected = table().select(&[]).unwrap();
        let keys: Vec<_> = selected.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["austria", "swiss"]);
    }

    #[test]
    fn test_select_named_dedupes() {
        let selected = table()
            .select(&["swiss".into(), "swiss".into()])
            .unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].1.competition_id, CompetitionId::new(12325));
    }

    #[test]
    fn test_select_unknown_lists_known_keys() {
        let err = table().select(&["italy".into()]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown league 'italy' (known: austria, swiss)"
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_competition_ids() {
        let mut leagues: BTreeMap<LeagueKey, League> = table().0;
        let mut copy = leagues[&LeagueKey::from("swiss")].clone();
        copy.name = "Copy".into();
        leagues.insert("copy".into(), copy);
        let err = LeagueTable::new(leagues).validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "leagues.competition_id",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_empty_table() {
        assert!(matches!(
            LeagueTable::default().validate(),
            Err(ConfigError::MissingField { field: "leagues" })
        ));
    }
}
