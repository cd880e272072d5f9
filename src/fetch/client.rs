// src/fetch/client.rs
use crate::utils::error::FetchError;
use reqwest::{header, Url};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("dynamic-regex/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

/// Settings for retrieving the document to search.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub user_agent: String,
    pub timeout: Duration,
    pub max_document_bytes: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}

/// Only absolute http(s) URLs are fetched.
pub fn parse_document_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

/// Creates a reqwest client configured from `options`.
fn build_client(options: &FetchOptions) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(options.user_agent.as_str())
        .timeout(options.timeout)
        .build()
}

/// Downloads the raw content of the document at `url`.
///
/// The body is returned untouched; no decoding is attempted. Responses larger
/// than `options.max_document_bytes` are refused.
pub async fn fetch_document(url: &str, options: &FetchOptions) -> Result<Vec<u8>, FetchError> {
    let url = parse_document_url(url)?;
    let client = build_client(options)?; // Propagate client build error if any

    tracing::info!("Downloading document from: {}", url);
    tracing::debug!("Using User-Agent: {}", options.user_agent);

    let mut response = client
        .get(url.clone())
        .header(header::ACCEPT, "text/plain,text/*,*/*")
        .send()
        .await?; // Propagates reqwest::Error as FetchError::Network

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }
        return Err(FetchError::Http(status));
    }

    let limit = options.max_document_bytes;
    if let Some(length) = response.content_length() {
        if length > limit as u64 {
            tracing::warn!("Declared length {} exceeds limit of {} bytes", length, limit);
            return Err(FetchError::TooLarge { limit });
        }
    }

    // Content-Length may be absent or wrong, so the body is counted as it arrives
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len() + chunk.len() > limit {
            tracing::warn!("Body of {} exceeded limit of {} bytes", url, limit);
            return Err(FetchError::TooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }

    tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(parse_document_url("https://example.com/README.md").is_ok());
        assert!(parse_document_url("http://127.0.0.1:8080/version.txt").is_ok());
    }

    #[test]
    fn test_rejects_other_schemes() {
        let err = parse_document_url("file:///etc/passwd").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
        assert!(err.to_string().contains("unsupported scheme 'file'"));
    }

    #[test]
    fn test_rejects_relative_url() {
        assert!(matches!(parse_document_url("README.md"), Err(FetchError::InvalidUrl { .. })));
    }

    #[test]
    fn test_fetch_fails_fast_on_invalid_url() {
        let result = tokio_test::block_on(fetch_document("ftp://example.com/x", &FetchOptions::default()));
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }

    #[test]
    fn test_default_options() {
        let options = FetchOptions::default();
        assert_eq!(options.max_document_bytes, 10 * 1024 * 1024);
        assert!(options.user_agent.starts_with("dynamic-regex/"));
    }
}
