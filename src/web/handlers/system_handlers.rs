// src/web/handlers/system_handlers.rs
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

use crate::web::types::{AppState, DataResponse, HealthData};

pub async fn health_handler(state: &State<AppState>) -> Json<DataResponse<HealthData>> {
    let database = match state.database.health_check().await {
        Ok(()) => true,
        Err(e) => {
            error!("{:#}", e);
            false
        }
    };

    info!("Health check (database ok: {})", database);

    let status = if database { "OK" } else { "DEGRADED" };
    let data = HealthData {
        status: status.to_string(),
        database,
    };

    if database {
        Json(DataResponse::success(status.to_string(), data, None))
    } else {
        Json(DataResponse::failure(status.to_string(), data, None))
    }
}
