// src/main.rs

use std::process::ExitCode;

use tracing::error;

use sitepipe::{cli, logging};

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("sitepipe: failed to initialise logging: {err}");
        return ExitCode::FAILURE;
    }

    match sitepipe::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
