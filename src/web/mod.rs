// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::{Context, Result};
use rocket::data::{Limits, ToByteUnit};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::figment::Figment;
use rocket::form::Form;
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::info;

use crate::core::{ConfigManager, Database};
use crate::session::SessionRegistry;
use crate::types::{PortfolioSnapshot, ReplaceReport};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/resume", data = "<upload>")]
pub async fn upload_resume(
    upload: Form<ResumeUploadForm<'_>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<ReplaceReport>>, Json<StandardErrorResponse>> {
    handlers::upload_resume_handler(upload, state).await
}

#[get("/jobs")]
pub async fn list_jobs(
    state: &State<AppState>,
) -> Result<Json<DataResponse<Vec<String>>>, Json<StandardErrorResponse>> {
    handlers::list_jobs_handler(state).await
}

#[post("/generate", data = "<request>")]
pub async fn generate(
    request: Json<StandardRequest<GenerateRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<GenerateData>>, Json<StandardErrorResponse>> {
    handlers::generate_handler(request, state).await
}

#[post("/send", data = "<request>")]
pub async fn send(
    request: Json<StandardRequest<SendRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<SendData>>, Json<StandardErrorResponse>> {
    handlers::send_handler(request, state).await
}

#[get("/portfolio")]
pub async fn get_portfolio(
    state: &State<AppState>,
) -> Result<Json<DataResponse<PortfolioSnapshot>>, Json<StandardErrorResponse>> {
    handlers::get_portfolio_handler(state).await
}

#[get("/health")]
pub async fn health(state: &State<AppState>) -> Json<DataResponse<HealthData>> {
    handlers::health_handler(state).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(413)]
pub fn payload_too_large() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "File size exceeds 10MB limit".to_string(),
        "FILE_TOO_LARGE".to_string(),
        vec!["Use a smaller file size (max 10MB)".to_string()],
        None,
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body could not be read".to_string(),
        "BAD_REQUEST".to_string(),
        vec!["Verify all required fields are present".to_string()],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec!["Try again in a few moments".to_string()],
        None,
    ))
}

pub fn build_rocket(state: AppState, figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(Cors)
        .manage(state)
        .register("/api", catchers![bad_request, payload_too_large, unprocessable, internal_error])
        .mount(
            "/api",
            routes![
                upload_resume,
                list_jobs,
                generate,
                send,
                get_portfolio,
                health,
                options,
            ],
        )
}

pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    let database = Database::new(&config.database_path).await?;
    let orchestrator = crate::build_orchestrator(&config, &database)?;

    let limits = Limits::default()
        .limit("file", 10.mebibytes())
        .limit("data-form", 10.mebibytes());

    let figment = rocket::Config::figment()
        .merge(("port", config.port))
        .merge(("address", "0.0.0.0"))
        .merge(("limits", limits));

    info!("Starting coldreach API server on port {}", config.port);
    info!("Database: {}", config.database_path.display());
    info!("Job board: {}", config.job_board.listing_url);

    let sessions = SessionRegistry::new(&config.session);
    let _rocket = build_rocket(AppState::new(orchestrator, database, sessions), figment)
        .launch()
        .await
        .context("Web server terminated with an error")?;

    Ok(())
}
