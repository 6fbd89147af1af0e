//! HBnB console - interactive CRUD shell

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = hbnb_console::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
