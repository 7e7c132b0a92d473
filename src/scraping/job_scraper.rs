// src/scraping/job_scraper.rs
use super::JobBoard;
use crate::core::config_manager::JobBoardConfig;
use crate::error::{OutreachError, OutreachResult};
use crate::types::job::UNKNOWN_JOB_TITLE;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info};

const TITLE_SELECTORS: [&str; 2] = ["h1", "title"];
const DESCRIPTION_SELECTORS: [&str; 3] = ["div.job-description", "div#job-description", "body"];

pub struct JobSiteClient {
    client: Client,
    config: JobBoardConfig,
}

impl JobSiteClient {
    pub fn new(config: JobBoardConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    async fn fetch_html(&self, url: &str) -> OutreachResult<String> {
        info!("Fetching page: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| OutreachError::Network(format!("Failed to fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(OutreachError::Network(format!(
                "HTTP error {} for {}",
                response.status(),
                url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| OutreachError::Network(format!("Failed to read response body: {}", e)))
    }

    /// Every anchor whose href contains `pattern`, in document order.
    /// Relative hrefs get `base_url` prepended.
    pub fn parse_listing(html: &str, base_url: &str, pattern: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let Ok(selector) = Selector::parse("a[href]") else {
            return Vec::new();
        };

        document
            .select(&selector)
            .filter_map(|anchor| anchor.value().attr("href"))
            .filter(|href| href.contains(pattern))
            .map(|href| {
                if href.starts_with("http://") || href.starts_with("https://") {
                    href.to_string()
                } else {
                    format!("{}{}", base_url.trim_end_matches('/'), href)
                }
            })
            .collect()
    }

    /// Title and description blob for one job page
    pub fn parse_job_page(html: &str) -> String {
        let document = Html::parse_document(html);

        let title = Self::find_text_by_selectors(&document, &TITLE_SELECTORS)
            .unwrap_or_else(|| UNKNOWN_JOB_TITLE.to_string());
        let description =
            Self::find_text_by_selectors(&document, &DESCRIPTION_SELECTORS).unwrap_or_default();

        format!("Job Title: {}\n\nJob Description: {}", title, description)
    }

    /// Text of the first element matched by the first selector that matches anything.
    /// An element that exists but is empty still wins over later selectors.
    fn find_text_by_selectors(document: &Html, selectors: &[&str]) -> Option<String> {
        for selector_str in selectors {
            if let Ok(selector) = Selector::parse(selector_str) {
                if let Some(element) = document.select(&selector).next() {
                    return Some(element.text().collect::<String>().trim().to_string());
                }
            }
        }
        None
    }
}

#[async_trait]
impl JobBoard for JobSiteClient {
    async fn list_available_jobs(&self) -> OutreachResult<Vec<String>> {
        let html = self.fetch_html(&self.config.listing_url).await?;
        let urls = Self::parse_listing(&html, &self.config.base_url, &self.config.path_pattern);

        info!("Found {} job links on {}", urls.len(), self.config.listing_url);
        Ok(urls)
    }

    async fn fetch_job_page(&self, url: &str) -> OutreachResult<String> {
        let html = self.fetch_html(url).await?;
        let text = Self::parse_job_page(&html);

        debug!("Extracted {} characters from {}", text.len(), url);
        Ok(text)
    }
}
