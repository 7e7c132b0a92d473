//! Job-application outreach: scrape a posting, extract it with a hosted model, draft a
//! cold email and a LinkedIn message from the resume-derived portfolio, send over SMTP.

use anyhow::Result;
use std::sync::Arc;

pub mod cli;
pub mod core;
pub mod error;
pub mod llm;
pub mod mailer;
pub mod orchestrator;
pub mod pipeline;
pub mod resume;
pub mod scraping;
pub mod session;
pub mod types;
pub mod utils;
pub mod web;

pub use crate::core::{ConfigManager, Database, PortfolioStore};
pub use error::{OutreachError, OutreachResult};
pub use orchestrator::Orchestrator;
pub use web::start_web_server;

/// Wire the production collaborators from configuration
pub fn build_orchestrator(config: &ConfigManager, database: &Database) -> Result<Orchestrator> {
    let board = scraping::JobSiteClient::new(config.job_board.clone())?;
    let model = llm::ChatClient::new(&config.llm)?;
    let mailer = mailer::SmtpMailer::new(config.smtp.clone());

    Ok(Orchestrator::new(
        Arc::new(board),
        Arc::new(model),
        PortfolioStore::new(database.pool().clone()),
        Arc::new(mailer),
    ))
}
