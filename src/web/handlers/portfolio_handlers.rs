// src/web/handlers/portfolio_handlers.rs
//! Resume upload and portfolio view

use rocket::form::Form;
use rocket::serde::json::Json;
use rocket::State;
use tokio::io::AsyncReadExt;
use tracing::{error, info};

use crate::types::{PortfolioSnapshot, ReplaceReport};
use crate::utils::validate_file_extension;
use crate::web::types::{AppState, DataResponse, ResumeUploadForm, StandardErrorResponse};

const MAX_RESUME_SIZE: u64 = 10 * 1024 * 1024;

pub async fn upload_resume_handler(
    upload: Form<ResumeUploadForm<'_>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<ReplaceReport>>, Json<StandardErrorResponse>> {
    let content_type = upload.resume_file.content_type();
    let file_size = upload.resume_file.len();

    let original_filename = upload
        .resume_file
        .raw_name()
        .map(|n| n.dangerous_unsafe_unsanitized_raw().as_str().to_string())
        .unwrap_or_else(|| "resume.pdf".to_string());

    let is_pdf = content_type.map_or(false, |ct| ct.is_pdf())
        || validate_file_extension(&original_filename, &["pdf"]).is_ok();

    if !is_pdf {
        let received_type = content_type
            .map(|ct| ct.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        return Err(Json(StandardErrorResponse::new(
            format!("Only PDF resumes are supported. Received: {}", received_type),
            "INVALID_FORMAT".to_string(),
            vec!["Upload a PDF file (.pdf)".to_string()],
            None,
        )));
    }

    if file_size > MAX_RESUME_SIZE {
        return Err(Json(StandardErrorResponse::new(
            "File size exceeds 10MB limit".to_string(),
            "FILE_TOO_LARGE".to_string(),
            vec!["Use a smaller file size (max 10MB)".to_string()],
            None,
        )));
    }

    let mut bytes = Vec::with_capacity(file_size as usize);
    let read_result = match upload.resume_file.open().await {
        Ok(reader) => {
            tokio::pin!(reader);
            reader.read_to_end(&mut bytes).await.map(|_| ())
        }
        Err(e) => Err(e),
    };

    if let Err(e) = read_result {
        error!("Failed to read uploaded resume: {}", e);
        return Err(Json(StandardErrorResponse::new(
            "Failed to process uploaded file".to_string(),
            "FILE_READ_ERROR".to_string(),
            vec!["Try uploading the file again".to_string()],
            None,
        )));
    }

    info!("Processing resume upload: {} ({} bytes)", original_filename, bytes.len());

    match state.orchestrator.upload_resume(&bytes).await {
        Ok(report) => {
            let message = format!(
                "Resume processed: {} skills and {} projects stored",
                report.skills_accepted, report.projects_accepted
            );
            Ok(Json(DataResponse::success(message, report, None)))
        }
        Err(e) => Err(Json(StandardErrorResponse::from_error(&e, None))),
    }
}

pub async fn get_portfolio_handler(
    state: &State<AppState>,
) -> Result<Json<DataResponse<PortfolioSnapshot>>, Json<StandardErrorResponse>> {
    match state.orchestrator.portfolio().await {
        Ok(snapshot) => {
            let message = if snapshot.is_empty() {
                "No resume uploaded yet".to_string()
            } else {
                format!(
                    "{} skills and {} projects",
                    snapshot.skills.len(),
                    snapshot.projects.len()
                )
            };
            Ok(Json(DataResponse::success(message, snapshot, None)))
        }
        Err(e) => Err(Json(StandardErrorResponse::from_error(&e, None))),
    }
}
