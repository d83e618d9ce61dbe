use reqwest::{header, Client};
use std::time::Duration;

use crate::config::PipelineConfig;
use crate::error::{FetchError, Result};
use crate::fetch::parser::parse_page;
use crate::models::PageContent;

pub struct PageFetcher {
    client: Client,
    timeout_secs: u64,
}

impl PageFetcher {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent)?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: config.request_timeout_secs,
        })
    }

    pub async fn fetch(&self, url: &str) -> Result<PageContent> {
        tracing::info!("Fetching content from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::classify(e, url, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::classify(e, url, self.timeout_secs))?;
        tracing::debug!("Fetched {} bytes from {}", html.len(), url);

        Ok(parse_page(url, &html))
    }
}
