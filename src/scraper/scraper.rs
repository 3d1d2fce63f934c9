// scraper.rs
use crate::config::AppConfig;
use crate::scraper::{parse_feed, RawListing, ScraperError};
use rand::Rng;
use reqwest::blocking::Client;
use std::time::{Duration, Instant};
use url::Url;

const USER_AGENT: &str = concat!("vls_tracker/", env!("CARGO_PKG_VERSION"));
const JITTER_MAX_MILLIS: u64 = 1_000;
const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

pub struct VlsScraper {
    client: Client,
    feed_url: Url,
    max_retries: u32,
    backoff: Duration,
}

impl VlsScraper {
    pub fn new(config: &AppConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            feed_url: config.feed_url.clone(),
            max_retries: config.max_retries,
            backoff: Duration::from_secs(config.retry_backoff_secs),
        })
    }

    /// Download today's feed. Transient failures are retried up to
    /// `max_retries` extra times; everything else fails immediately.
    pub fn fetch_listings(&self) -> Result<Vec<RawListing>, ScraperError> {
        let mut attempt = 0;

        loop {
            let start = Instant::now();

            match self.try_fetch_body().and_then(|body| parse_feed(&body)) {
                Ok(listings) => {
                    tracing::info!(
                        total = listings.len(),
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "total homes received"
                    );
                    return Ok(listings);
                }
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let jitter = rand::thread_rng().gen_range(0..=JITTER_MAX_MILLIS);
                    let delay = retry_delay(self.backoff, attempt, Duration::from_millis(jitter));
                    tracing::warn!(
                        attempt,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "feed request failed, retrying"
                    );
                    std::thread::sleep(delay);
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn try_fetch_body(&self) -> Result<String, ScraperError> {
        let resp = self.client.get(self.feed_url.clone()).send()?;
        let status = resp.status();
        let text = resp.text()?;

        if !status.is_success() {
            return Err(ScraperError::Status {
                status: status.as_u16(),
                body: text.chars().take(200).collect(),
            });
        }

        Ok(text)
    }
}

/// Linear back-off plus jitter, capped at [`MAX_RETRY_DELAY`].
fn retry_delay(backoff: Duration, attempt: u32, jitter: Duration) -> Duration {
    backoff
        .saturating_mul(attempt)
        .saturating_add(jitter)
        .min(MAX_RETRY_DELAY)
}
