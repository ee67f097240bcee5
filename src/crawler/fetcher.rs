use crate::places::{RequestError, USER_AGENT};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

pub trait PageFetcher {
    /// Fetch a page. `Ok(None)` when the response is not HTML.
    fn fetch_html(&self, url: &str) -> Result<Option<String>, RequestError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, RequestError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| RequestError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch_html(&self, url: &str) -> Result<Option<String>, RequestError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| RequestError::Network(e.to_string()))?;

        let is_html = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("text/html"))
            .unwrap_or(false);

        if !is_html {
            return Ok(None);
        }

        // Error pages are scanned too; contact footers survive a 404.
        let text = resp
            .text()
            .map_err(|e| RequestError::Network(e.to_string()))?;

        Ok(Some(text))
    }
}
