// src/web/handlers/outreach_handlers.rs

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

use crate::mailer::SenderCredentials;
use crate::session::SessionRegistry;
use crate::web::types::{
    AppState, DataResponse, GenerateData, GenerateRequest, SendData, SendRequest,
    StandardErrorResponse, StandardRequest,
};

pub async fn list_jobs_handler(
    state: &State<AppState>,
) -> Result<Json<DataResponse<Vec<String>>>, Json<StandardErrorResponse>> {
    match state.orchestrator.list_available_jobs().await {
        Ok(urls) => Ok(Json(DataResponse::success(
            format!("Found {} job postings", urls.len()),
            urls,
            None,
        ))),
        Err(e) => Err(Json(StandardErrorResponse::from_error(&e, None))),
    }
}

pub async fn generate_handler(
    request: Json<StandardRequest<GenerateRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<GenerateData>>, Json<StandardErrorResponse>> {
    let session_id = request
        .session_id()
        .unwrap_or_else(SessionRegistry::new_session_id);

    info!("Generating outreach for {} (session {})", request.data.url, session_id);

    let mut session = state.sessions.get(&session_id).await;
    match state
        .orchestrator
        .generate(&mut session, &request.data.url)
        .await
    {
        Ok(outreach) => {
            state.sessions.put(&session_id, session).await;
            let message = format!("Generated outreach for {} job(s)", outreach.len());
            Ok(Json(DataResponse::success(
                message,
                GenerateData {
                    session_id: session_id.clone(),
                    outreach,
                },
                Some(session_id),
            )))
        }
        Err(e) => Err(Json(StandardErrorResponse::from_error(&e, Some(session_id)))),
    }
}

pub async fn send_handler(
    request: Json<StandardRequest<SendRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<SendData>>, Json<StandardErrorResponse>> {
    let session_id = request.session_id();
    let session = match &session_id {
        Some(id) => state.sessions.get(id).await,
        None => Default::default(),
    };

    let credentials = SenderCredentials {
        email: request.data.sender_email.clone(),
        password: request.data.sender_password.clone(),
    };

    match state
        .orchestrator
        .send(&session, &credentials, &request.data.recipient_email)
        .await
    {
        Ok(true) => Ok(Json(DataResponse::success(
            "Email sent successfully!".to_string(),
            SendData { sent: true },
            session_id,
        ))),
        Ok(false) => Ok(Json(DataResponse::failure(
            "Failed to send email. Please check your credentials and try again.".to_string(),
            SendData { sent: false },
            session_id,
        ))),
        Err(e) => Err(Json(StandardErrorResponse::from_error(&e, session_id))),
    }
}
