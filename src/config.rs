// config.rs
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

pub const DEFAULT_FEED_URL: &str = "https://api.thevillages.com/hf/search/allhomelisting";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_key: String,
    pub sender_email: String,
    pub sender_name: String,
    pub recipient_email: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub feed_url: Url,
    pub data_dir: PathBuf,
    pub ledger_file: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_secs: u64,
    pub log_level: String,
    /// `None` when no mail keys are set; the report is then only logged.
    pub mail: Option<MailConfig>,
}

/// Load configuration from the process environment, reading `.env` first if present.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(|key| std::env::var(key))
}

fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let feed_url = Url::parse(&or_default("VLS_FEED_URL", DEFAULT_FEED_URL))
        .map_err(|e| invalid("VLS_FEED_URL", e.to_string()))?;

    let request_timeout_secs = parse_u64("VLS_REQUEST_TIMEOUT_SECS", "60")?;
    if request_timeout_secs == 0 {
        return Err(invalid("VLS_REQUEST_TIMEOUT_SECS", "must be at least 1".into()));
    }

    let max_retries = or_default("VLS_MAX_RETRIES", "3")
        .parse::<u32>()
        .map_err(|e| invalid("VLS_MAX_RETRIES", e.to_string()))?;

    let ledger_file = or_default("VLS_LEDGER_FILE", "listing_first_seen.csv");
    if ledger_file.is_empty() || ledger_file.contains(['/', '\\']) {
        return Err(invalid("VLS_LEDGER_FILE", "must be a plain file name".into()));
    }

    Ok(AppConfig {
        feed_url,
        data_dir: PathBuf::from(or_default("VLS_DATA_DIR", "data")),
        ledger_file,
        request_timeout_secs,
        max_retries,
        retry_backoff_secs: parse_u64("VLS_RETRY_BACKOFF_SECS", "2")?,
        log_level: or_default("VLS_LOG_LEVEL", "info"),
        mail: build_mail_config(&lookup)?,
    })
}

fn build_mail_config<F>(lookup: &F) -> Result<Option<MailConfig>, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    const REQUIRED: [&str; 3] = ["BREVO_API_KEY", "REPORT_EMAIL_FROM", "REPORT_EMAIL_TO"];

    let [api_key, sender_email, recipient_email] =
        REQUIRED.map(|var| lookup(var).ok().filter(|v| !v.trim().is_empty()));

    match (api_key, sender_email, recipient_email) {
        (None, None, None) => Ok(None),
        (Some(api_key), Some(sender_email), Some(recipient_email)) => Ok(Some(MailConfig {
            api_key,
            sender_email,
            sender_name: lookup("REPORT_SENDER_NAME")
                .unwrap_or_else(|_| "VLS Tracker Bot".to_string()),
            recipient_email,
        })),
        // Half-configured mail is almost certainly a deployment mistake.
        (api_key, sender_email, _) => {
            let missing = if api_key.is_none() {
                REQUIRED[0]
            } else if sender_email.is_none() {
                REQUIRED[1]
            } else {
                REQUIRED[2]
            };
            Err(ConfigError::MissingEnvVar(missing.to_string()))
        }
    }
}
