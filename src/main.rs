//! modpath binary entry point.

use std::process::ExitCode;

use modpath::ui::output;

fn main() -> ExitCode {
    match modpath::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
