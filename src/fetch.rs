use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};

const DEFAULT_TIMEOUT_SECS: u64 = 20;
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

#[derive(Clone, Debug)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(timeout) = std::env::var("EKINO_TIMEOUT_SECS").ok().and_then(|v| parse_timeout(&v)) {
            cfg.timeout = timeout;
        }
        if let Ok(ua) = std::env::var("EKINO_USER_AGENT") {
            if !ua.trim().is_empty() {
                cfg.user_agent = ua;
            }
        }
        cfg
    }
}

/// Whole seconds; zero or garbage leaves the default in place.
fn parse_timeout(raw: &str) -> Option<Duration> {
    raw.trim().parse::<u64>().ok().filter(|s| *s > 0).map(Duration::from_secs)
}

/// A fetched page: the URL it was finally served from (after redirects) and its body.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub url: String,
    pub html: String,
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<Page, FetchError>;
}

#[derive(Clone)]
pub struct HttpFetcher {
    http: HttpClient,
}

impl HttpFetcher {
    pub fn new(cfg: FetchConfig) -> Result<Self, FetchError> {
        let http = HttpClient::builder()
            .timeout(cfg.timeout)
            .user_agent(cfg.user_agent)
            .build()
            .map_err(FetchError::from_reqwest)?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<Page, FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status, url: url.to_string() });
        }

        let final_url = response.url().to_string();
        let html = response.text().await.map_err(FetchError::from_reqwest)?;
        Ok(Page { url: final_url, html })
    }
}

#[derive(Debug)]
pub enum FetchError {
    Http(reqwest::Error),
    Timeout,
    Status { status: StatusCode, url: String },
}

impl FetchError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Http(err)
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Timeout => true,
            FetchError::Http(_) => true,
            FetchError::Status { status, .. } => status.is_server_error(),
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Http(err) => write!(f, "http error: {err}"),
            FetchError::Timeout => write!(f, "request timed out"),
            FetchError::Status { status, url } => write!(f, "GET {url} returned {status}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Http(err) => Some(err),
            _ => None,
        }
    }
}
