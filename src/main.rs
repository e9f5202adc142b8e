//! Stack - dependency-aware task list

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = stack_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
