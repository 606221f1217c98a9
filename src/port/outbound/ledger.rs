//! Pick ledger persistence port.

use crate::domain::Pick;
use crate::error::Result;

/// Storage for the full pick ledger.
///
/// The ledger is read and rewritten whole. Implementations must make
/// [`PickLedger::save`] atomic: a reader observes either the previous
/// complete ledger or the new one, never a partial write.
pub trait PickLedger: Send + Sync {
    /// Read all picks in stored order.
    ///
    /// Fails with [`LedgerError::NotFound`](crate::error::LedgerError::NotFound)
    /// when the ledger does not exist.
    fn load(&self) -> Result<Vec<Pick>>;

    /// Read all picks, treating a missing ledger as empty.
    fn load_or_create(&self) -> Result<Vec<Pick>>;

    /// Replace the ledger contents with `picks`.
    fn save(&self, picks: &[Pick]) -> Result<()>;

    /// Human-readable location for logs and reports.
    fn location(&self) -> String;
}
