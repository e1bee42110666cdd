use std::process::ExitCode;

use browser_history::{cli, logging};

fn main() -> ExitCode {
    logging::init_logging();

    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
