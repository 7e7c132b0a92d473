// src/resume.rs
//! Resume text extraction

use crate::error::{OutreachError, OutreachResult};
use tracing::info;

pub struct ResumeExtractor;

impl ResumeExtractor {
    /// Text of every page of an in-memory PDF
    pub fn extract_pdf_text(bytes: &[u8]) -> OutreachResult<String> {
        if bytes.is_empty() {
            return Err(OutreachError::Extraction("empty PDF upload".to_string()));
        }

        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| OutreachError::Extraction(format!("Failed to read PDF: {}", e)))?;

        info!("Extracted {} characters from resume PDF", text.len());
        Ok(text)
    }
}
