use std::process::ExitCode;
use vls_tracker::{config, init_tracing, tracker};

fn main() -> ExitCode {
    let config = match config::load_app_config() {
        Ok(config) => config,
        Err(e) => {
            init_tracing("info");
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log_level);

    match tracker::run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "tracker run failed");
            ExitCode::FAILURE
        }
    }
}
