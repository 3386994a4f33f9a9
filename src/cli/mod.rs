//! Command-line interface layer: argument parsing, dispatch and exit
//! status handling.

mod args;
mod exit_status;
mod run;

pub use args::{Arguments, Command, CommonArgs, UsageCommand};
pub use exit_status::ExitStatus;
pub use run::{load_and_analyze, run};
