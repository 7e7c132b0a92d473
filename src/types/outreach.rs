// src/types/outreach.rs
use super::job::JobPosting;
use serde::{Deserialize, Serialize};

/// Generated messages for one job, kept only for the current session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutreachDraft {
    pub email_subject: String,
    pub email_body: String,
    pub linkedin_body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedOutreach {
    pub job: JobPosting,
    pub draft: OutreachDraft,
}
