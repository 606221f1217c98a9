//! Infrastructure configuration modules.

pub mod analytics;
pub mod league;
pub mod logging;
pub mod settings;

pub use analytics::AnalyticsConfig;
pub use league::{League, LeagueTable};
pub use logging::LoggingConfig;
pub use settings::Config;
