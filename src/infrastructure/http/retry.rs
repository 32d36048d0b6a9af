use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};

const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Bounded retry for outbound API calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::ZERO,
        }
    }
}

pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .build()
}

fn is_transient_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn is_transient_error(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect()
}

fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Sends the request built by `build`, retrying connect errors, timeouts,
/// 429 and 5xx with exponential backoff. After the last attempt the final
/// response or error is returned unchanged.
pub async fn send_with_retry<F>(policy: &RetryPolicy, mut build: F) -> Result<Response, reqwest::Error>
where
    F: FnMut() -> RequestBuilder,
{
    let mut backoff = policy.initial_backoff;
    let mut attempt: u32 = 0;

    loop {
        let result = build().send().await;

        let delay = match &result {
            Ok(response) if is_transient_status(response.status()) => {
                Some(retry_after(response).unwrap_or(backoff))
            }
            Err(e) if is_transient_error(e) => Some(backoff),
            _ => None,
        };

        let Some(delay) = delay else {
            return result;
        };
        if attempt >= policy.max_retries {
            return result;
        }

        attempt += 1;
        let delay = delay.min(MAX_BACKOFF);
        match &result {
            Ok(response) => tracing::warn!(
                attempt,
                status = %response.status(),
                delay_ms = delay.as_millis() as u64,
                "Upstream returned a transient status, retrying"
            ),
            Err(e) => tracing::warn!(
                attempt,
                error = %e,
                delay_ms = delay.as_millis() as u64,
                "Upstream request failed, retrying"
            ),
        }

        tokio::time::sleep(delay).await;
        backoff = (backoff * 2).min(MAX_BACKOFF);
    }
}
