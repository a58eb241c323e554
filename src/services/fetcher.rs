// src/services/fetcher.rs

//! Resilient HTTP retrieval.
//!
//! Wraps a `reqwest` client with bounded retry and exponential backoff for
//! transient failures: connection errors, timeouts, and 500/502/504
//! responses. Every request carries the session cookie.

use std::time::Duration;

use reqwest::{Client, StatusCode, header};

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

const RETRY_STATUSES: [StatusCode; 3] = [
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::GATEWAY_TIMEOUT,
];

/// HTTP fetcher with retry/backoff and cookie authentication.
pub struct Fetcher {
    client: Client,
    cookie: String,
    max_retries: u32,
    backoff_base: Duration,
}

impl Fetcher {
    /// Create a configured fetcher for the given session cookie.
    pub fn new(config: &HttpConfig, session_cookie: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            cookie: format!("PHPSESSID={session_cookie}"),
            max_retries: config.max_retries,
            backoff_base: Duration::from_millis(config.backoff_base_ms),
        })
    }

    /// GET a page and return its body.
    pub async fn get(&self, url: &str) -> Result<String> {
        self.send_with_retry(url, None).await
    }

    /// POST a form-encoded body and return the response body.
    pub async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String> {
        self.send_with_retry(url, Some(form)).await
    }

    async fn send_with_retry(&self, url: &str, form: Option<&[(&str, &str)]>) -> Result<String> {
        let mut last_error = String::new();

        for attempt in 1..=self.max_retries {
            if attempt > 1 {
                tokio::time::sleep(self.backoff_delay(attempt - 1)).await;
            }

            // The request builder is rebuilt per attempt; a sent builder
            // cannot be reused.
            let request = match form {
                Some(fields) => self.client.post(url).form(fields),
                None => self.client.get(url),
            }
            .header(header::COOKIE, self.cookie.as_str());

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if RETRY_STATUSES.contains(&status) {
                        last_error = format!("server returned {status}");
                        log::debug!("Attempt {attempt} for {url}: {last_error}");
                        continue;
                    }
                    return Ok(response.text().await?);
                }
                Err(e) if e.is_connect() || e.is_timeout() => {
                    last_error = e.to_string();
                    log::debug!("Attempt {attempt} for {url}: {last_error}");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::fetch(url, self.max_retries, last_error))
    }

    /// Backoff before retry `attempt` (1-based): base, then doubling.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.backoff_base * 2u32.pow(attempt - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> Fetcher {
        Fetcher::new(&HttpConfig::default(), "cookie").unwrap()
    }

    #[test]
    fn test_backoff_doubles_per_attempt() {
        let f = fetcher();
        assert_eq!(f.backoff_delay(1), Duration::from_millis(300));
        assert_eq!(f.backoff_delay(2), Duration::from_millis(600));
        assert_eq!(f.backoff_delay(3), Duration::from_millis(1200));
        assert_eq!(f.backoff_delay(4), Duration::from_millis(2400));
    }

    #[test]
    fn test_cookie_header_value() {
        let f = fetcher();
        assert_eq!(f.cookie, "PHPSESSID=cookie");
    }
}
