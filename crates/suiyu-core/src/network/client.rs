use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::fetch as fetch_config;
use crate::error::Result;
use crate::retry::RetryStrategy;

/// Blocking HTTP client with a global per-request timeout.
#[derive(Clone)]
pub struct HttpClient {
    agent: ureq::Agent,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: config.into(),
        }
    }

    pub fn get_text(&self, url: &str) -> Result<String> {
        let mut response = self.agent.get(url).call()?;
        let text = response
            .body_mut()
            .with_config()
            .limit(fetch_config::MAX_BODY_BYTES)
            .read_to_string()?;
        debug!("GET {} returned {} bytes", url, text.len());
        Ok(text)
    }

    pub fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let text = self.get_text(url)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// `get_json` under a retry strategy; returns the last error when every
    /// attempt fails.
    pub fn get_json_with_retry<T, R>(&self, url: &str, strategy: &R) -> Result<T>
    where
        T: DeserializeOwned,
        R: RetryStrategy,
    {
        strategy.execute(|_| self.get_json(url))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::Error;

    /// Nothing listens on port 1.
    const UNREACHABLE: &str = "http://127.0.0.1:1/";

    /// Two attempts, counting the pauses between them.
    struct Counting {
        pauses: Cell<u32>,
    }

    impl RetryStrategy for Counting {
        fn max_attempts(&self) -> u32 {
            2
        }

        fn delay_for_attempt(&self, attempt: u32) -> Option<Duration> {
            assert_eq!(attempt, self.pauses.get());
            self.pauses.set(attempt + 1);
            Some(Duration::ZERO)
        }
    }

    fn client() -> HttpClient {
        HttpClient::new(Duration::from_secs(2))
    }

    #[test]
    fn test_unreachable_host_is_http_error() {
        let result = client().get_text(UNREACHABLE);
        assert!(matches!(result, Err(Error::Http(_))));
    }

    #[test]
    fn test_get_json_propagates_transport_error() {
        let result: Result<Vec<u32>> = client().get_json(UNREACHABLE);
        let err = result.unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_retry_gives_up_with_last_error() {
        let strategy = Counting {
            pauses: Cell::new(0),
        };
        let result: Result<Vec<u32>> = client().get_json_with_retry(UNREACHABLE, &strategy);
        assert!(matches!(result, Err(Error::Http(_))));
        assert_eq!(strategy.pauses.get(), 1);
    }
}
