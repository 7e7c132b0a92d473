// src/error.rs
//! Domain error type shared by the scraping, model, storage and delivery layers

use std::fmt;
use thiserror::Error;

/// Which model output failed to parse. The user-facing message is fixed per target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTarget {
    Jobs,
    SkillsAndProjects,
}

impl fmt::Display for ParseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseTarget::Jobs => write!(f, "Context too big. Unable to parse jobs."),
            ParseTarget::SkillsAndProjects => {
                write!(f, "Context too big. Unable to parse skills and projects.")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum OutreachError {
    /// `detail` carries the real cause for logs; it never reaches the message.
    #[error("{target}")]
    Parse { target: ParseTarget, detail: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Resume extraction failed: {0}")]
    Extraction(String),

    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("{0}")]
    Validation(String),
}

pub type OutreachResult<T> = Result<T, OutreachError>;

impl OutreachError {
    pub fn parse(target: ParseTarget, detail: impl Into<String>) -> Self {
        OutreachError::Parse {
            target,
            detail: detail.into(),
        }
    }

    /// Stable code used in API error envelopes
    pub fn code(&self) -> &'static str {
        match self {
            OutreachError::Parse { .. } => "PARSE_ERROR",
            OutreachError::Network(_) => "NETWORK_ERROR",
            OutreachError::Model(_) => "MODEL_ERROR",
            OutreachError::Storage(_) => "STORAGE_ERROR",
            OutreachError::Extraction(_) => "EXTRACTION_ERROR",
            OutreachError::Delivery(_) => "DELIVERY_ERROR",
            OutreachError::Validation(_) => "VALIDATION_ERROR",
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            OutreachError::Parse { .. } => vec![
                "Try a job page with less content".to_string(),
                "Try again, the model output may differ".to_string(),
            ],
            OutreachError::Network(_) => vec![
                "Verify the job URL is accessible".to_string(),
                "The page may be behind authentication or no longer available".to_string(),
            ],
            OutreachError::Model(_) => vec![
                "The language model service is temporarily unavailable".to_string(),
                "Check that GROQ_API_KEY is set and valid".to_string(),
            ],
            OutreachError::Storage(_) => vec![
                "Try again in a few moments".to_string(),
                "Check the portfolio database path is writable".to_string(),
            ],
            OutreachError::Extraction(_) => vec![
                "Ensure the resume PDF has selectable text".to_string(),
                "Check the file is not corrupted".to_string(),
            ],
            OutreachError::Delivery(_) => vec![
                "Check your email credentials".to_string(),
                "Check your network connection".to_string(),
            ],
            OutreachError::Validation(_) => vec![],
        }
    }
}
