//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate the ledger and
//! match source ports to implement the commands.

pub mod analytics;
pub mod grader;
pub mod slate;

pub use grader::{GradeOptions, GradeOutcome, GradeReport, ResultGrader, SkipReason};
pub use slate::{SlateGenerator, SlateReport};
