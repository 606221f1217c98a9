use std::process::ExitCode;

use clap::Parser;
use picks_ledger::adapter::inbound::cli::command::{Cli, ColorChoice};
use picks_ledger::adapter::inbound::cli::output::{self, OutputConfig};
use picks_ledger::adapter::inbound::cli::run;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            output::error(&format!("failed to start runtime: {e}"));
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            if output::is_json() {
                output::error(&report.to_string());
            } else {
                eprintln!("{report:?}");
            }
            ExitCode::FAILURE
        }
    }
}
