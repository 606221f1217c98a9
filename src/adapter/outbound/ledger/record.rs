//! Row-level mapping between ledger CSV records and [`Pick`].

use std::fmt::Display;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use csv::StringRecord;

use crate::domain::{MatchId, Pick, PickParts};
use crate::error::LedgerError;

/// Column order of the ledger file. The header row must match exactly.
pub const LEDGER_COLUMNS: [&str; 11] = [
    "date",
    "league",
    "match",
    "kickoff_utc",
    "market",
    "confidence",
    "model_btts",
    "model_o25",
    "match_id",
    "final_score",
    "result",
];

const DATE_FORMAT: &str = "%Y-%m-%d";
const KICKOFF_FORMAT: &str = "%H:%M";

/// Fails unless `headers` names exactly [`LEDGER_COLUMNS`] in order.
pub fn check_header(headers: &StringRecord) -> Result<(), LedgerError> {
    let found: Vec<&str> = headers.iter().map(str::trim).collect();
    if found == LEDGER_COLUMNS {
        return Ok(());
    }
    Err(LedgerError::Schema {
        expected: LEDGER_COLUMNS.join(","),
        found: found.join(","),
    })
}

/// Position of each [`LEDGER_COLUMNS`] entry in an older ledger's header.
///
/// Columns are matched by name, ignoring case and surrounding whitespace.
/// Only `final_score` may be absent; unknown columns are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    positions: [Option<usize>; 11],
    pub dropped: Vec<String>,
}

impl ColumnMap {
    pub fn from_header(headers: &StringRecord) -> Result<Self, LedgerError> {
        let names: Vec<String> = headers.iter().map(|h| h.trim().to_ascii_lowercase()).collect();
        let mut positions = [None; 11];
        for (slot, column) in positions.iter_mut().zip(LEDGER_COLUMNS) {
            *slot = names.iter().position(|name| name == column);
        }

        let missing: Vec<&str> = LEDGER_COLUMNS
            .iter()
            .zip(&positions)
            .filter(|(column, position)| position.is_none() && **column != "final_score")
            .map(|(column, _)| *column)
            .collect();
        if !missing.is_empty() {
            return Err(LedgerError::Schema {
                expected: LEDGER_COLUMNS.join(","),
                found: names.join(","),
            });
        }

        let dropped = names
            .iter()
            .filter(|name| !LEDGER_COLUMNS.contains(&name.as_str()))
            .cloned()
            .collect();
        Ok(Self { positions, dropped })
    }

    /// Whether `final_score` had to be added.
    #[must_use]
    pub fn adds_final_score(&self) -> bool {
        self.positions[9].is_none()
    }

    /// Rebuild `record` in [`LEDGER_COLUMNS`] order.
    ///
    /// A `W` or `L` sitting in `final_score` with an empty `result` is moved
    /// into `result`; the second value reports whether that happened.
    #[must_use]
    pub fn remap(&self, record: &StringRecord) -> (StringRecord, bool) {
        let mut cells: Vec<String> = self
            .positions
            .iter()
            .map(|position| {
                position
                    .and_then(|i| record.get(i))
                    .map(|c| c.trim().to_string())
                    .unwrap_or_default()
            })
            .collect();

        let shifted = cells[10].is_empty()
            && matches!(cells[9].to_ascii_uppercase().as_str(), "W" | "L");
        if shifted {
            cells[10] = std::mem::take(&mut cells[9]);
        }
        (StringRecord::from(cells), shifted)
    }
}

fn cell<'r>(record: &'r StringRecord, index: usize) -> &'r str {
    record.get(index).map(str::trim).unwrap_or_default()
}

fn parse_cell<T>(record: &StringRecord, index: usize, line: u64) -> Result<T, LedgerError>
where
    T: FromStr,
    T::Err: Display,
{
    cell(record, index)
        .parse()
        .map_err(|e: T::Err| LedgerError::InvalidRow {
            line,
            field: LEDGER_COLUMNS[index],
            reason: e.to_string(),
        })
}

fn required<'r>(record: &'r StringRecord, index: usize, line: u64) -> Result<&'r str, LedgerError> {
    let value = cell(record, index);
    if value.is_empty() {
        return Err(LedgerError::InvalidRow {
            line,
            field: LEDGER_COLUMNS[index],
            reason: "value is empty".to_string(),
        });
    }
    Ok(value)
}

/// Parse one data record. `line` is the 1-based file line for errors.
pub fn pick_from_record(record: &StringRecord, line: u64) -> Result<Pick, LedgerError> {
    let invalid = |index: usize, reason: String| LedgerError::InvalidRow {
        line,
        field: LEDGER_COLUMNS[index],
        reason,
    };

    let date = NaiveDate::parse_from_str(required(record, 0, line)?, DATE_FORMAT)
        .map_err(|e| invalid(0, e.to_string()))?;
    let kickoff_utc = NaiveTime::parse_from_str(required(record, 3, line)?, KICKOFF_FORMAT)
        .map_err(|e| invalid(3, e.to_string()))?;

    let final_score = match cell(record, 9) {
        "" => None,
        _ => Some(parse_cell(record, 9, line)?),
    };

    Ok(Pick::restore(PickParts {
        date,
        league: required(record, 1, line)?.to_string(),
        fixture: required(record, 2, line)?.to_string(),
        kickoff_utc,
        market: parse_cell(record, 4, line)?,
        confidence: parse_cell(record, 5, line)?,
        model_btts: parse_cell(record, 6, line)?,
        model_o25: parse_cell(record, 7, line)?,
        match_id: MatchId::new(required(record, 8, line)?),
        final_score,
        result: parse_cell(record, 10, line)?,
    }))
}

/// Serialize one pick in [`LEDGER_COLUMNS`] order.
#[must_use]
pub fn record_from_pick(pick: &Pick) -> [String; 11] {
    [
        pick.date().format(DATE_FORMAT).to_string(),
        pick.league().to_string(),
        pick.fixture().to_string(),
        pick.kickoff_utc().format(KICKOFF_FORMAT).to_string(),
        pick.market().code().to_string(),
        pick.confidence().code().to_string(),
        pick.model_btts().to_string(),
        pick.model_o25().to_string(),
        pick.match_id().to_string(),
        pick.final_score().map(|s| s.to_string()).unwrap_or_default(),
        pick.result().code().to_string(),
    ]
}
