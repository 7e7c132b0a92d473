// src/web/types.rs

use rocket::form::FromForm;
use rocket::fs::TempFile;
use rocket::serde::{Deserialize, Serialize};
use tracing::error;

use crate::core::Database;
use crate::error::OutreachError;
use crate::orchestrator::Orchestrator;
use crate::session::SessionRegistry;
use crate::types::GeneratedOutreach;

/// Shared server state managed by rocket
pub struct AppState {
    pub orchestrator: Orchestrator,
    pub sessions: SessionRegistry,
    pub database: Database,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator, database: Database, sessions: SessionRegistry) -> Self {
        Self {
            orchestrator,
            sessions,
            database,
        }
    }
}

#[derive(FromForm)]
pub struct ResumeUploadForm<'f> {
    pub resume_file: TempFile<'f>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct GenerateRequest {
    pub url: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SendRequest {
    #[serde(default)]
    pub sender_email: String,
    #[serde(default)]
    pub sender_password: String,
    #[serde(default)]
    pub recipient_email: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct GenerateData {
    pub session_id: String,
    pub outreach: Vec<GeneratedOutreach>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SendData {
    pub sent: bool,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthData {
    pub status: String,
    pub database: bool,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Data,
    Error,
}

// Request body with an optional session id next to the payload fields
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardRequest<T> {
    #[serde(flatten)]
    pub data: T,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl<T> StandardRequest<T> {
    pub fn session_id(&self) -> Option<String> {
        self.session_id
            .as_ref()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T, session_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
            session_id,
        }
    }

    pub fn failure(message: String, data: T, session_id: Option<String>) -> Self {
        Self {
            success: false,
            ..Self::success(message, data, session_id)
        }
    }
}

impl StandardErrorResponse {
    pub fn new(
        error: String,
        error_code: String,
        suggestions: Vec<String>,
        session_id: Option<String>,
    ) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
            session_id,
        }
    }

    /// Log the full error and build the envelope from its user-facing message
    pub fn from_error(err: &OutreachError, session_id: Option<String>) -> Self {
        match err {
            OutreachError::Parse { detail, .. } => error!("{} ({})", err, detail),
            _ => error!("{}", err),
        }

        Self::new(
            err.to_string(),
            err.code().to_string(),
            err.suggestions(),
            session_id,
        )
    }
}
