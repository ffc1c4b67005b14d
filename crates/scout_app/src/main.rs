mod cli;
mod platform;

use std::process::ExitCode;

use clap::Parser;
use scout_logging::scout_error;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match platform::run(cli) {
        Ok(code) => code,
        Err(err) => {
            scout_error!("{:#}", err);
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
