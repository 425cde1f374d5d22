// src/fetch/mod.rs
use anyhow::{Context, Result};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client,
};
use std::{
    collections::{BTreeMap, HashMap},
    future::Future,
};
use thiserror::Error;
use tracing::debug;
use url::Url;

pub mod urls;

/// Browser identity sent on every request; one of the sites rejects the
/// default client string.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/41.0.2227.0 Safari/537.36";

/// Any reason a document could not be retrieved. Callers treat every variant
/// as "no data" for the unit that requested it.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// Source of raw documents.
pub trait Fetcher: Send + Sync + 'static {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Plain HTTP GET with a fixed set of default headers.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(headers: &BTreeMap<String, String>) -> Result<Self> {
        let mut header_map = HeaderMap::new();
        for (key, value) in headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .with_context(|| format!("invalid header name {key:?}"))?;
            let val = HeaderValue::from_str(value)
                .with_context(|| format!("invalid header value {value:?}"))?;
            header_map.insert(name, val);
        }
        let client = Client::builder()
            .default_headers(header_map)
            .build()
            .context("building HTTP client")?;
        Ok(Self { client })
    }

    pub fn with_user_agent(user_agent: &str) -> Result<Self> {
        let mut headers = BTreeMap::new();
        headers.insert("User-Agent".to_string(), user_agent.to_string());
        Self::new(&headers)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String, FetchError>> + Send {
        let request = self.client.get(url.clone());
        let url = url.to_string();
        async move {
            debug!(%url, "GET");
            let resp = request
                .send()
                .await
                .map_err(|source| FetchError::Transport {
                    url: url.clone(),
                    source,
                })?;
            let status = resp.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url,
                    status: status.as_u16(),
                });
            }
            resp.text()
                .await
                .map_err(|source| FetchError::Transport { url, source })
        }
    }
}

/// Serves documents from memory; any URL it does not hold answers 404.
/// Used to replay a fixed snapshot of the sites.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &Url, body: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), body.into());
        self
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String, FetchError>> + Send {
        let page = self.pages.get(url.as_str()).cloned();
        let url = url.to_string();
        async move { page.ok_or(FetchError::Status { url, status: 404 }) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_fetcher_answers_404_for_unknown_pages() {
        let known = Url::parse("https://example.test/a").unwrap();
        let fetcher = StaticFetcher::new().with_page(&known, "<html></html>");

        assert_eq!(fetcher.fetch(&known).await.unwrap(), "<html></html>");

        let missing = Url::parse("https://example.test/b").unwrap();
        match fetcher.fetch(&missing).await {
            Err(FetchError::Status { status, .. }) => assert_eq!(status, 404),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn http_fetcher_rejects_bad_header_names() {
        let mut headers = BTreeMap::new();
        headers.insert("Bad Header".to_string(), "x".to_string());
        assert!(HttpFetcher::new(&headers).is_err());
        assert!(HttpFetcher::with_user_agent(BROWSER_USER_AGENT).is_ok());
    }
}
