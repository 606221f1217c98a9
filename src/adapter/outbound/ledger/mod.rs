//! CSV pick ledger.
//!
//! The ledger is a single CSV file with the header in [`LEDGER_COLUMNS`].
//! Reads are strict: a header mismatch or any malformed field fails the
//! whole load. Writes go to a temp file in the ledger's directory, are
//! synced, and then renamed over the target. [`CsvLedger::migrate`] brings
//! ledgers written with an older header up to the current layout.

mod record;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::Pick;
use crate::error::{LedgerError, Result};
use crate::port::PickLedger;

use record::ColumnMap;
pub use record::LEDGER_COLUMNS;

/// File-backed ledger at a fixed path.
#[derive(Debug, Clone)]
pub struct CsvLedger {
    path: PathBuf,
}

impl CsvLedger {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a complete ledger from `reader`. The header row is mandatory.
    pub fn parse<R: Read>(reader: R) -> std::result::Result<Vec<Pick>, LedgerError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = csv.records();
        let Some(header) = records.next() else {
            return Err(LedgerError::Schema {
                expected: LEDGER_COLUMNS.join(","),
                found: String::new(),
            });
        };
        record::check_header(&header?)?;

        let mut picks = Vec::new();
        for result in records {
            let row = result?;
            let line = row.position().map_or(0, csv::Position::line);
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            if row.len() != LEDGER_COLUMNS.len() {
                return Err(LedgerError::InvalidRow {
                    line,
                    field: "row",
                    reason: format!(
                        "expected {} columns, found {}",
                        LEDGER_COLUMNS.len(),
                        row.len()
                    ),
                });
            }
            picks.push(record::pick_from_record(&row, line)?);
        }
        Ok(picks)
    }

    /// Read the raw file, `None` when it does not exist.
    fn read_bytes(&self) -> std::result::Result<Option<Vec<u8>>, LedgerError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(LedgerError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Parse the file. With `allow_blank`, a blank file reads as empty.
    fn read(&self, allow_blank: bool) -> std::result::Result<Option<Vec<Pick>>, LedgerError> {
        let Some(bytes) = self.read_bytes()? else {
            return Ok(None);
        };
        if allow_blank && bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Some(Vec::new()));
        }
        Self::parse(bytes.as_slice()).map(Some)
    }

    /// Write `picks` to a synced temp file next to the ledger.
    ///
    /// The ledger itself is untouched until [`StagedLedger::commit`].
    /// Dropping the staged file discards it.
    pub fn stage(&self, picks: &[Pick]) -> std::result::Result<StagedLedger, LedgerError> {
        let write_err = |source: io::Error| LedgerError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(write_err)?;

        let temp = tempfile::Builder::new()
            .prefix(".picks-")
            .suffix(".csv.tmp")
            .tempfile_in(&dir)
            .map_err(write_err)?;

        if let Ok(meta) = fs::metadata(&self.path) {
            fs::set_permissions(temp.path(), meta.permissions()).map_err(write_err)?;
        }

        let mut writer = csv::Writer::from_writer(temp);
        writer.write_record(LEDGER_COLUMNS)?;
        for pick in picks {
            writer.write_record(record::record_from_pick(pick))?;
        }
        let mut temp = writer
            .into_inner()
            .map_err(|e| write_err(e.into_error()))?;
        temp.flush().map_err(write_err)?;
        temp.as_file().sync_all().map_err(write_err)?;

        debug!(
            path = %self.path.display(),
            temp = %temp.path().display(),
            rows = picks.len(),
            "Staged ledger"
        );

        Ok(StagedLedger {
            temp,
            target: self.path.clone(),
        })
    }

    /// Rewrite an older ledger into the current column layout.
    ///
    /// Columns are matched by name, so a ledger without `final_score` or with
    /// reordered columns is accepted. Rows whose result was shifted into
    /// `final_score` are fixed. Every row must then parse strictly; any
    /// failure leaves the file as it was.
    pub fn migrate(&self) -> std::result::Result<MigrationReport, LedgerError> {
        let bytes = self.read_bytes()?.ok_or_else(|| LedgerError::NotFound {
            path: self.path.clone(),
        })?;
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes.as_slice());

        let mut records = csv.records();
        let header = records.next().transpose()?.ok_or_else(|| LedgerError::Schema {
            expected: LEDGER_COLUMNS.join(","),
            found: String::new(),
        })?;
        let map = ColumnMap::from_header(&header)?;

        let mut report = MigrationReport {
            added_final_score: map.adds_final_score(),
            dropped_columns: map.dropped.clone(),
            ..MigrationReport::default()
        };
        let mut picks = Vec::new();
        for result in records {
            let row = result?;
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            let line = row.position().map_or(0, csv::Position::line);
            let (remapped, shifted) = map.remap(&row);
            if shifted {
                debug!(line, "Moved shifted result out of final_score");
                report.shifted += 1;
            }
            picks.push(record::pick_from_record(&remapped, line)?);
        }
        report.rows = picks.len();

        self.stage(&picks)?.commit()?;
        info!(
            path = %self.path.display(),
            rows = report.rows,
            shifted = report.shifted,
            added_final_score = report.added_final_score,
            "Migrated ledger"
        );
        Ok(report)
    }
}

/// Outcome of [`CsvLedger::migrate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Data rows rewritten.
    pub rows: usize,
    /// Rows whose `W`/`L` was moved from `final_score` into `result`.
    pub shifted: usize,
    /// Whether the `final_score` column was added.
    pub added_final_score: bool,
    /// Header columns with no place in the current layout.
    pub dropped_columns: Vec<String>,
}

impl MigrationReport {
    /// Whether the file already had the current layout and needed no fixes.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.shifted == 0 && !self.added_final_score && self.dropped_columns.is_empty()
    }
}

/// A fully written ledger waiting to replace the live file.
#[derive(Debug)]
pub struct StagedLedger {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedLedger {
    #[must_use]
    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    /// Atomically replace the ledger with the staged contents.
    pub fn commit(self) -> std::result::Result<(), LedgerError> {
        let target = self.target;
        self.temp
            .persist(&target)
            .map_err(|e| LedgerError::Write {
                path: target.clone(),
                source: e.error,
            })?;
        debug!(path = %target.display(), "Committed ledger");
        Ok(())
    }
}

impl PickLedger for CsvLedger {
    fn load(&self) -> Result<Vec<Pick>> {
        self.read(false)?.ok_or_else(|| {
            LedgerError::NotFound {
                path: self.path.clone(),
            }
            .into()
        })
    }

    fn load_or_create(&self) -> Result<Vec<Pick>> {
        Ok(self.read(true)?.unwrap_or_default())
    }

    fn save(&self, picks: &[Pick]) -> Result<()> {
        self.stage(picks)?.commit()?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FinalScore, Market, PickResult};
    use crate::error::Error;

    const HEADER: &str =
        "date,league,match,kickoff_utc,market,confidence,model_btts,model_o25,match_id,final_score,result\n";

    fn ledger_text(rows: &[&str]) -> String {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text
    }

    const PENDING: &str =
        "2025-03-08,Switzerland Super League,Basel vs Servette,17:30,BTTS,STRONG,72,65,7412331,,pending";
    const GRADED: &str =
        "2025-03-08,Austria Bundesliga,Sturm Graz vs LASK,15:00,O2.5,MEDIUM,55,63,7412400,2-1,W";

    fn write_ledger(dir: &tempfile::TempDir, text: &str) -> CsvLedger {
        let path = dir.path().join("picks.csv");
        fs::write(&path, text).unwrap();
        CsvLedger::new(path)
    }

    #[test]
    fn test_parse_reads_rows_in_order() {
        let picks = CsvLedger::parse(ledger_text(&[PENDING, GRADED]).as_bytes()).unwrap();
        assert_eq!(picks.len(), 2);
        assert_eq!(picks[0].match_id().as_str(), "7412331");
        assert_eq!(picks[1].result(), PickResult::Win);
        assert_eq!(picks[1].final_score(), Some(FinalScore::new(2, 1)));
    }

    #[test]
    fn test_parse_header_only_is_empty_ledger() {
        assert!(CsvLedger::parse(HEADER.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_parse_requires_header_row() {
        match CsvLedger::parse(&b""[..]) {
            Err(LedgerError::Schema { found, .. }) => assert!(found.is_empty()),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_file_fails_load_but_not_load_or_create() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = write_ledger(&dir, "");
        assert!(matches!(
            ledger.load(),
            Err(Error::Ledger(LedgerError::Schema { .. }))
        ));
        assert_eq!(fs::read_to_string(ledger.path()).unwrap(), "");
        assert!(ledger.load_or_create().unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_header_mismatch() {
        let text = "date,league,match,kickoff_utc,market,confidence,model_btts,model_o25,match_id,result\n";
        let err = CsvLedger::parse(text.as_bytes()).unwrap_err();
        assert!(matches!(err, LedgerError::Schema { .. }));
    }

    #[test]
    fn test_parse_reports_line_of_bad_row() {
        let bad = PENDING.replace("BTTS", "1X2");
        let text = ledger_text(&[GRADED, &bad]);
        match CsvLedger::parse(text.as_bytes()) {
            Err(LedgerError::InvalidRow { line, field, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(field, "market");
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_short_rows() {
        let text = ledger_text(&["2025-03-08,League,A vs B,17:30,BTTS"]);
        let err = CsvLedger::parse(text.as_bytes()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRow { field: "row", .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = CsvLedger::new(dir.path().join("absent.csv"));
        assert!(matches!(
            ledger.load(),
            Err(Error::Ledger(LedgerError::NotFound { .. }))
        ));
        assert!(ledger.load_or_create().unwrap().is_empty());
    }

    #[test]
    fn test_save_round_trips_and_quotes_commas() {
        let dir = tempfile::tempdir().unwrap();
        let quoted = PENDING.replace(
            "Basel vs Servette",
            "\"Inter, Milano vs Roma\"",
        );
        let ledger = write_ledger(&dir, &ledger_text(&[&quoted, GRADED]));

        let picks = ledger.load().unwrap();
        assert_eq!(picks[0].fixture(), "Inter, Milano vs Roma");

        ledger.save(&picks).unwrap();
        let text = fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(text, ledger_text(&[&quoted, GRADED]));
        assert_eq!(ledger.load().unwrap(), picks);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = CsvLedger::new(dir.path().join("data/results/picks.csv"));
        ledger.save(&[]).unwrap();
        assert_eq!(fs::read_to_string(ledger.path()).unwrap(), HEADER);
    }

    #[test]
    fn test_uncommitted_stage_leaves_ledger_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let original = ledger_text(&[PENDING]);
        let ledger = write_ledger(&dir, &original);

        let mut picks = ledger.load().unwrap();
        picks[0].record_result(FinalScore::new(1, 1));

        let staged = ledger.stage(&picks).unwrap();
        let temp = staged.temp_path().to_path_buf();
        assert!(temp.exists());
        assert_eq!(temp.parent(), ledger.path().parent());
        drop(staged);

        assert!(!temp.exists());
        assert_eq!(fs::read_to_string(ledger.path()).unwrap(), original);
    }

    const LEGACY_HEADER: &str =
        "date,league,match,kickoff_utc,market,confidence,model_btts,model_o25,match_id,result\n";

    #[test]
    fn test_migrate_adds_final_score_column() {
        let dir = tempfile::tempdir().unwrap();
        let legacy = format!(
            "{LEGACY_HEADER}\
             2025-03-08,Switzerland Super League,Basel vs Servette,17:30,BTTS,STRONG,72,65,7412331,pending\n\
             2025-03-08,Austria Bundesliga,Sturm Graz vs LASK,15:00,O25,MEDIUM,55,63,7412400,W\n"
        );
        let ledger = write_ledger(&dir, &legacy);
        assert!(matches!(
            ledger.load(),
            Err(Error::Ledger(LedgerError::Schema { .. }))
        ));

        let report = ledger.migrate().unwrap();
        assert_eq!(report.rows, 2);
        assert_eq!(report.shifted, 0);
        assert!(report.added_final_score);
        assert!(!report.is_noop());

        let picks = ledger.load().unwrap();
        assert_eq!(picks[0].result(), PickResult::Pending);
        assert_eq!(picks[1].market(), Market::Over25);
        assert_eq!(picks[1].result(), PickResult::Win);
        assert!(picks[1].final_score().is_none());
        assert!(fs::read_to_string(ledger.path()).unwrap().starts_with(HEADER));
    }

    #[test]
    fn test_migrate_moves_shifted_results() {
        let dir = tempfile::tempdir().unwrap();
        let shifted = GRADED.replace("2-1,W", "L,");
        let ledger = write_ledger(&dir, &ledger_text(&[PENDING, &shifted]));

        let report = ledger.migrate().unwrap();
        assert_eq!(report.shifted, 1);
        assert!(!report.added_final_score);

        let picks = ledger.load().unwrap();
        assert_eq!(picks[1].result(), PickResult::Loss);
        assert!(picks[1].final_score().is_none());
    }

    #[test]
    fn test_migrate_current_ledger_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let text = ledger_text(&[PENDING, GRADED]);
        let ledger = write_ledger(&dir, &text);

        let report = ledger.migrate().unwrap();
        assert!(report.is_noop());
        assert_eq!(report.rows, 2);
        assert_eq!(fs::read_to_string(ledger.path()).unwrap(), text);
    }

    #[test]
    fn test_migrate_bad_row_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let legacy = format!(
            "{LEGACY_HEADER}2025-03-08,Switzerland Super League,A vs B,17:30,1X2,STRONG,72,65,900,pending\n"
        );
        let ledger = write_ledger(&dir, &legacy);

        match ledger.migrate() {
            Err(LedgerError::InvalidRow { line: 2, field, .. }) => assert_eq!(field, "market"),
            other => panic!("expected invalid row, got {other:?}"),
        }
        assert_eq!(fs::read_to_string(ledger.path()).unwrap(), legacy);
    }

    #[test]
    fn test_migrate_missing_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = CsvLedger::new(dir.path().join("absent.csv"));
        assert!(matches!(ledger.migrate(), Err(LedgerError::NotFound { .. })));
    }

    #[test]
    fn test_commit_replaces_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = write_ledger(&dir, &ledger_text(&[PENDING]));

        let mut picks = ledger.load().unwrap();
        picks[0].record_result(FinalScore::new(1, 1));
        ledger.stage(&picks).unwrap().commit().unwrap();

        let reloaded = ledger.load().unwrap();
        assert_eq!(reloaded[0].result(), PickResult::Win);
        assert_eq!(reloaded[0].final_score(), Some(FinalScore::new(1, 1)));

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
