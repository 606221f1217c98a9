//! CLI module graph and command dispatch.

pub mod command;
pub mod config;
pub mod diagnostic;
pub mod grade;
pub mod ledger;
pub mod output;
pub mod picks;
pub mod report;
pub mod slate;

use tracing::debug;

use self::command::{Cli, Commands, ConfigCommand, LedgerCommand};

/// Load configuration, initialize logging and run the selected command.
///
/// Every error comes back as a rendered diagnostic; the caller only decides
/// the exit code.
pub async fn run(cli: Cli) -> miette::Result<()> {
    let config = diagnostic::load_config(&cli.config)?;

    let logging = match cli.verbose {
        0 => config.logging.clone(),
        1 => config.logging.with_level("debug"),
        _ => config.logging.with_level("trace"),
    };
    logging.init();
    debug!(config = %cli.config.display(), ledger = %config.ledger.display(), "Configuration loaded");

    let result = match &cli.command {
        Commands::GenerateSlate(args) => slate::execute(&config, args).await,
        Commands::GradeResults(args) => grade::execute(&config, args).await,
        Commands::Report(command) => report::execute(&config, command),
        Commands::Picks(args) => picks::execute_list(&config, args.date),
        Commands::Recommendations(args) => picks::execute_recommendations(&config, args.date),
        Commands::Ledger(LedgerCommand::Migrate) => ledger::execute_migrate(&config),
        Commands::Config(ConfigCommand::Check) => config::execute_check(&cli.config, &config),
        Commands::Config(ConfigCommand::Show) => config::execute_show(&cli.config, &config),
    };
    result.map_err(diagnostic::report)
}
