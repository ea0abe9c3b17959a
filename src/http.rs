//! HTTP client wrapper for downloading XML feeds.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::{HTTP_TIMEOUT_SECS, MAX_RESPONSE_SIZE};
use crate::error::{ConvertError, Result};

/// User agent string identifying this converter.
const USER_AGENT: &str = concat!("xml2csv/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts for transient failures.
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with appropriate timeout and user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Download a URL's body with retry logic.
///
/// Connection/timeout errors and 5xx responses are retried with exponential
/// backoff; 4xx responses fail immediately since repeating them cannot
/// succeed. Bodies over [`MAX_RESPONSE_SIZE`] are rejected.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to download from
///
/// # Returns
/// Raw bytes of the response body
pub fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    let mut last_error: Option<String> = None;

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            // Exponential backoff: 500ms, 1000ms, 2000ms
            let delay = RETRY_BASE_DELAY_MS * (1 << (attempt - 1));
            tracing::debug!(attempt, delay_ms = delay, "Retrying after delay");
            thread::sleep(Duration::from_millis(delay));
        }

        let response = match client.get(url).send() {
            Ok(response) => response,
            Err(e) if e.is_connect() || e.is_timeout() => {
                tracing::warn!(
                    error = %e,
                    attempt = attempt + 1,
                    max_retries = MAX_RETRIES,
                    "Connection error, will retry"
                );
                last_error = Some(e.to_string());
                continue;
            }
            // Other errors (like an invalid URL) cannot be retried away.
            Err(e) => return Err(ConvertError::Http(e)),
        };

        let status = response.status();
        if status.is_server_error() {
            tracing::warn!(
                status = %status,
                attempt = attempt + 1,
                max_retries = MAX_RETRIES,
                "Server error, will retry"
            );
            last_error = Some(format!("Server error: {status}"));
            continue;
        }

        let response = response.error_for_status()?;

        // Check the declared length before buffering anything.
        if let Some(length) = response.content_length() {
            if length > MAX_RESPONSE_SIZE {
                return Err(ConvertError::ResponseTooLarge {
                    size: length,
                    limit: MAX_RESPONSE_SIZE,
                });
            }
        }

        let bytes = response.bytes()?;
        if bytes.len() as u64 > MAX_RESPONSE_SIZE {
            return Err(ConvertError::ResponseTooLarge {
                size: bytes.len() as u64,
                limit: MAX_RESPONSE_SIZE,
            });
        }
        return Ok(bytes.to_vec());
    }

    // All retries exhausted
    Err(ConvertError::RetriesExhausted {
        attempts: MAX_RETRIES,
        message: last_error.unwrap_or_else(|| "Unknown error".to_string()),
    })
}

/// Decode a response body to text.
///
/// Strips a UTF-8 byte order mark when present and decodes lossily,
/// logging a warning when bytes are not valid UTF-8.
///
/// # Arguments
/// * `bytes` - Raw response body
/// * `context` - Description used in the warning (e.g. the URL)
pub fn bytes_to_string(bytes: &[u8], context: &str) -> String {
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);

    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            tracing::warn!(context, "Response is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = create_client();
        assert!(client.is_ok());
    }

    #[test]
    fn test_bytes_to_string_plain() {
        assert_eq!(bytes_to_string(b"<root/>", "test"), "<root/>");
    }

    #[test]
    fn test_bytes_to_string_strips_bom() {
        assert_eq!(bytes_to_string(b"\xef\xbb\xbf<root/>", "test"), "<root/>");
    }

    #[test]
    fn test_bytes_to_string_lossy_on_invalid_utf8() {
        let decoded = bytes_to_string(b"<root>\xff</root>", "test");
        assert!(decoded.starts_with("<root>"));
        assert!(decoded.ends_with("</root>"));
    }
}
