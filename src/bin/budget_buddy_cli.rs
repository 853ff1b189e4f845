use std::process::ExitCode;

use budget_buddy::cli::{self, Args};
use clap::Parser;
use tracing::error;

fn main() -> ExitCode {
    budget_buddy::init();
    let args = Args::parse();

    match cli::run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("exiting with error: {err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
