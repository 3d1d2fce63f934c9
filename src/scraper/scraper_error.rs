use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("feed returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("feed parse error: {0}")]
    Parse(String),
}

impl ScraperError {
    /// Connection problems, timeouts and 5xx responses are worth another attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            ScraperError::Network(e) => e.is_timeout() || e.is_connect(),
            ScraperError::Status { status, .. } => *status >= 500,
            ScraperError::Parse(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> ScraperError {
        ScraperError::Status {
            status: code,
            body: String::new(),
        }
    }

    #[test]
    fn server_errors_are_transient() {
        assert!(status(500).is_transient());
        assert!(status(503).is_transient());
    }

    #[test]
    fn client_errors_are_not_transient() {
        assert!(!status(404).is_transient());
        assert!(!status(403).is_transient());
    }

    #[test]
    fn parse_errors_are_not_transient() {
        assert!(!ScraperError::Parse("expected value".into()).is_transient());
    }
}
