// src/scraping/mod.rs
use async_trait::async_trait;

use crate::error::OutreachResult;

pub mod job_scraper;

pub use job_scraper::JobSiteClient;

/// Source of job postings: a listing of detail URLs and the raw text of one posting
#[async_trait]
pub trait JobBoard: Send + Sync {
    async fn list_available_jobs(&self) -> OutreachResult<Vec<String>>;

    /// Returns `"Job Title: ...\n\nJob Description: ..."`
    async fn fetch_job_page(&self, url: &str) -> OutreachResult<String>;
}
