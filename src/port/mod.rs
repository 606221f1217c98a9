//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the seams between the ledger engine and the outside world.
//! Application services are generic over them; adapters implement them.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │  slate / grader /       │
//!     ┌──────────────┤  analytics              ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                                                       ▼
//! ┌──────────────┐                                    ┌──────────────┐
//! │ PickLedger   │                                    │ MatchData    │
//! │ (CSV file)   │                                    │ Source (HTTP)│
//! └──────────────┘                                    └──────────────┘
//! ```

pub mod outbound;

pub use outbound::ledger::PickLedger;
pub use outbound::source::{MatchDataSource, MatchDetail, MatchStatus, MatchSummary};
