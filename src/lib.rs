use tracing_subscriber::EnvFilter;

pub mod config;
pub mod domain;
pub mod errors;
pub mod mailer;
pub mod owners;
pub mod scraper;
pub mod store;
pub mod tracker;

#[cfg(test)]
mod tests;

/// `RUST_LOG` wins; otherwise log at `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
