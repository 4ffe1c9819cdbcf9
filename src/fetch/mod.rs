//! Retrieval of the raw grades document.
//!
//! The analytics never call into this module; the host fetches a snapshot
//! once and hands the parsed records over.

mod basic;
mod client;
pub mod auth;

pub use auth::ApiKey;
pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result, bail};
use tracing::debug;

/// GETs `url` and returns the body. Non-success statuses are errors.
pub async fn fetch_bytes<C: HttpClient + ?Sized>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        bail!("HTTP error {status}: {body}");
    }

    Ok(resp.bytes().await?.to_vec())
}

fn is_remote(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Loads the document from a local file path or fetches it over HTTP,
/// attaching a bearer token when `api_key` is set.
#[tracing::instrument(skip(api_key), fields(authenticated = api_key.is_some()))]
pub async fn load_source(source: &str, api_key: Option<&str>) -> Result<Vec<u8>> {
    if !is_remote(source) {
        return std::fs::read(source).with_context(|| format!("failed to read {source}"));
    }

    let client = BasicClient::new()?;
    let bytes = match api_key {
        Some(key) => fetch_bytes(&ApiKey::bearer(client, key)?, source).await,
        None => fetch_bytes(&client, source).await,
    }
    .with_context(|| format!("failed to fetch grades from {source}"))?;

    debug!(bytes = bytes.len(), "Grades document received");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_source_reads_file() {
        let path = std::env::temp_dir().join("slimme_cijfers_load_source.json");
        std::fs::write(&path, br#"{"items":[]}"#).unwrap();

        let bytes = load_source(path.to_str().unwrap(), None).await.unwrap();
        assert_eq!(bytes, br#"{"items":[]}"#);

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_load_source_reads_http_named_file() {
        let path = std::env::temp_dir().join("http_export.json");
        std::fs::write(&path, br#"{"items":[]}"#).unwrap();

        let bytes = load_source(path.to_str().unwrap(), None).await.unwrap();
        assert_eq!(bytes, br#"{"items":[]}"#);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com/grades"));
        assert!(is_remote("HTTP://example.com/grades"));
        assert!(!is_remote("http_export.json"));
        assert!(!is_remote("data/https.json"));
    }

    #[tokio::test]
    async fn test_load_source_missing_file() {
        let result = load_source("/definitely/not/here.json", None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_bytes_rejects_bad_url() {
        let client = BasicClient::new().unwrap();
        assert!(fetch_bytes(&client, "not a url").await.is_err());
    }
}
