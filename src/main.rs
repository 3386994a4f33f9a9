use std::process::ExitCode;

use clap::Parser;
use keyscope::cli::{Arguments, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();

    let Some(args) = args.with_command_or_help() else {
        return ExitStatus::Success.into();
    };

    match keyscope::cli::run(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitStatus::Error.into()
        }
    }
}
