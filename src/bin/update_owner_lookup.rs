// update_owner_lookup.rs
//
// Weekly job: rebuild data/owner_lookup.csv from the Florida DOR county tax
// rolls for the counties The Villages spans.
use chrono::Local;
use std::process::ExitCode;
use vls_tracker::owners::{
    nal_year, update_owner_lookup, NalClient, OwnerLookupError, COUNTIES, NAL_BASE_URL,
};
use vls_tracker::store::DataDir;
use vls_tracker::{config, init_tracing};

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

    let result = DataDir::open(config.data_dir.clone())
        .map_err(OwnerLookupError::from)
        .and_then(|dir| {
            let client = NalClient::new(NAL_BASE_URL)?;
            let year = nal_year(Local::now().date_naive());
            tracing::info!(year, "updating owner lookup");
            update_owner_lookup(&client, &dir, &COUNTIES, year)
        });

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "owner lookup update failed");
            ExitCode::FAILURE
        }
    }
}
