use crate::config::FetchSettings;
use crate::error::{Error, Result};
use crate::page::{FetchedPage, PageSource};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Response};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};
use url::Url;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    timeout_duration: Duration,
    user_agent: String,
}

impl PageFetcher {
    pub fn new() -> Result<Self> {
        Self::from_settings(&FetchSettings::default())
    }

    pub fn from_settings(settings: &FetchSettings) -> Result<Self> {
        let timeout_duration = settings.timeout_duration();
        let client = Client::builder()
            .timeout(timeout_duration)
            .redirect(reqwest::redirect::Policy::limited(settings.max_redirects))
            .gzip(true)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout_duration,
            user_agent: settings.user_agent.clone(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_duration = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        self.timeout_duration
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Single GET, no retry. Any transport failure, timeout or non-2xx status
    /// is reported as [`Error::Fetch`].
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        debug!("Fetching page from: {}", url);

        let parsed = validate_page_url(url)?;

        let response = timeout(self.timeout_duration, self.fetch_response(&parsed))
            .await
            .map_err(|_| {
                Error::Fetch(format!(
                    "Request to {} timed out after {}s",
                    url,
                    self.timeout_duration.as_secs_f32()
                ))
            })??;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP {} for {}", status.as_u16(), url);
            return Err(Error::Fetch(format!(
                "HTTP {} {} for url: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error"),
                url
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = timeout(self.timeout_duration, response.bytes())
            .await
            .map_err(|_| Error::Fetch(format!("Reading body of {} timed out", url)))?
            .map_err(|e| Error::Fetch(format!("Failed to read response body: {}", e)))?;

        debug!("Downloaded {} bytes from {}", body.len(), url);

        Ok(FetchedPage {
            url: parsed,
            status: status.as_u16(),
            content_type,
            body: body.to_vec(),
        })
    }

    async fn fetch_response(&self, url: &Url) -> Result<Response> {
        self.client
            .get(url.clone())
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, ACCEPT_HTML)
            .send()
            .await
            .map_err(|e| {
                warn!("Request to {} failed: {}", url, e);
                Error::Fetch(e.to_string())
            })
    }
}

#[async_trait]
impl PageSource for PageFetcher {
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage> {
        self.fetch(url).await
    }
}

/// Parse `url` as an absolute http(s) URL. Anything else cannot be fetched.
pub fn validate_page_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url.trim())
        .map_err(|e| Error::Fetch(format!("Invalid URL '{}': {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(Error::Fetch(format!("Unsupported URL scheme: {}", scheme))),
    }
}
