//! Command-line interface definitions.
//!
//! Defines the CLI structure for the `picks` binary using `clap`. Data
//! commands write the ledger; report commands only read it.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgGroup, Parser, Subcommand};

/// Football picks ledger: daily slates, result grading and accuracy reports
#[derive(Parser, Debug)]
#[command(name = "picks")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(
        short,
        long,
        global = true,
        default_value = "config.toml",
        value_name = "PATH"
    )]
    pub config: PathBuf,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the picks CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Append pending picks for a date to the ledger
    GenerateSlate(SlateArgs),

    /// Grade a date's picks from final scores
    GradeResults(GradeArgs),

    /// Accuracy, calibration and pattern reports
    #[command(subcommand)]
    Report(ReportCommand),

    /// List picks in the ledger
    Picks(DateFilterArg),

    /// Show STRONG and MEDIUM picks for a date
    Recommendations(RecommendationsArgs),

    /// Maintain the ledger file
    #[command(subcommand)]
    Ledger(LedgerCommand),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `picks ledger`.
#[derive(Subcommand, Debug)]
pub enum LedgerCommand {
    /// Rewrite an older ledger into the current column layout.
    Migrate,
}

/// Subcommands for `picks report`.
#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Hit rate overall and by confidence, league and market.
    Accuracy(DateFilterArg),
    /// Mean gap between promised probability and outcome.
    LieIndex(DateFilterArg),
    /// Best (market, confidence, band) groups by win rate.
    Patterns(DateFilterArg),
    /// Accuracy of a day's five strongest picks against the rest.
    TopPicks(DateFilterArg),
}

/// Subcommands for `picks config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate the configuration file.
    Check,
    /// Display the effective configuration with defaults applied.
    Show,
}

/// Arguments for `generate-slate`. One of `--all` or `--league` is required.
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("scope").required(true).args(["all", "leagues"])))]
pub struct SlateArgs {
    /// Slate date (YYYY-MM-DD), defaults to today in UTC.
    pub date: Option<NaiveDate>,

    /// Cover every configured league.
    #[arg(long)]
    pub all: bool,

    /// Cover one league by key; repeatable.
    #[arg(long = "league", value_name = "KEY")]
    pub leagues: Vec<String>,
}

/// Arguments for `grade-results`.
#[derive(Parser, Debug)]
pub struct GradeArgs {
    /// Date whose picks are graded (YYYY-MM-DD).
    pub date: NaiveDate,

    /// Re-grade picks that already have a result.
    #[arg(long)]
    pub force: bool,
}

/// Shared optional date filter.
#[derive(Parser, Debug)]
pub struct DateFilterArg {
    /// Restrict to one date (YYYY-MM-DD).
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

/// Arguments for `recommendations`.
#[derive(Parser, Debug)]
pub struct RecommendationsArgs {
    /// Slate date (YYYY-MM-DD), defaults to today in UTC.
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_generate_slate_all() {
        let cli = parse(&["picks", "generate-slate", "2025-03-08", "--all"]);
        match cli.command {
            Commands::GenerateSlate(args) => {
                assert_eq!(args.date, NaiveDate::from_ymd_opt(2025, 3, 8));
                assert!(args.all);
                assert!(args.leagues.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_generate_slate_repeated_league() {
        let cli = parse(&[
            "picks",
            "generate-slate",
            "--league",
            "swiss",
            "--league",
            "austria",
        ]);
        match cli.command {
            Commands::GenerateSlate(args) => {
                assert_eq!(args.date, None);
                assert_eq!(args.leagues, vec!["swiss", "austria"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_generate_slate_requires_scope() {
        assert!(Cli::try_parse_from(["picks", "generate-slate"]).is_err());
        assert!(
            Cli::try_parse_from(["picks", "generate-slate", "--all", "--league", "swiss"]).is_err()
        );
    }

    #[test]
    fn test_grade_results_requires_valid_date() {
        let cli = parse(&["picks", "grade-results", "2025-03-08", "--force"]);
        match cli.command {
            Commands::GradeResults(args) => {
                assert_eq!(args.date, NaiveDate::from_ymd_opt(2025, 3, 8).unwrap());
                assert!(args.force);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["picks", "grade-results"]).is_err());
        assert!(Cli::try_parse_from(["picks", "grade-results", "08/03/2025"]).is_err());
    }

    #[test]
    fn test_report_subcommands() {
        let cli = parse(&["picks", "report", "lie-index", "--date", "2025-03-08"]);
        assert!(matches!(
            cli.command,
            Commands::Report(ReportCommand::LieIndex(DateFilterArg { date: Some(_) }))
        ));
        let cli = parse(&["picks", "report", "top-picks"]);
        assert!(matches!(
            cli.command,
            Commands::Report(ReportCommand::TopPicks(DateFilterArg { date: None }))
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&[
            "picks", "picks", "--json", "-q", "-vv", "-c", "alt.toml", "--color", "never",
        ]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn test_ledger_migrate() {
        let cli = parse(&["picks", "ledger", "migrate"]);
        assert!(matches!(cli.command, Commands::Ledger(LedgerCommand::Migrate)));
        assert!(Cli::try_parse_from(["picks", "ledger"]).is_err());
    }

    #[test]
    fn test_config_defaults() {
        let cli = parse(&["picks", "config", "check"]);
        assert_eq!(cli.config, PathBuf::from("config.toml"));
        assert_eq!(cli.color, ColorChoice::Auto);
        assert!(matches!(cli.command, Commands::Config(ConfigCommand::Check)));
    }
}
