//! In-memory [`PickLedger`] for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use crate::domain::Pick;
use crate::error::{LedgerError, Result};
use crate::port::PickLedger;

/// A ledger held in memory. `None` contents model an absent file.
#[derive(Default)]
pub struct MemoryLedger {
    picks: Mutex<Option<Vec<Pick>>>,
    saves: AtomicU32,
    fail_saves: bool,
}

impl MemoryLedger {
    /// An absent ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// An existing ledger with `picks`.
    pub fn with_picks(picks: Vec<Pick>) -> Self {
        Self {
            picks: Mutex::new(Some(picks)),
            ..Self::default()
        }
    }

    /// Make every save fail with a write error, leaving contents untouched.
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// Current contents; empty when absent.
    pub fn picks(&self) -> Vec<Pick> {
        self.picks
            .lock()
            .ok()
            .and_then(|p| p.clone())
            .unwrap_or_default()
    }

    pub fn exists(&self) -> bool {
        self.picks.lock().map(|p| p.is_some()).unwrap_or(false)
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> u32 {
        self.saves.load(Ordering::SeqCst)
    }
}

impl PickLedger for MemoryLedger {
    fn load(&self) -> Result<Vec<Pick>> {
        if !self.exists() {
            return Err(LedgerError::NotFound {
                path: self.location().into(),
            }
            .into());
        }
        Ok(self.picks())
    }

    fn load_or_create(&self) -> Result<Vec<Pick>> {
        Ok(self.picks())
    }

    fn save(&self, picks: &[Pick]) -> Result<()> {
        if self.fail_saves {
            return Err(LedgerError::Write {
                path: self.location().into(),
                source: std::io::Error::other("scripted write failure"),
            }
            .into());
        }
        if let Ok(mut stored) = self.picks.lock() {
            *stored = Some(picks.to_vec());
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
