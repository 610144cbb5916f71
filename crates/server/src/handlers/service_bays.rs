use axum::extract::State;
use axum::Json;

use models::service_bay;
use service::service_bay_service;

use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/service-bay", tag = "service-bay",
    responses((status = 200, description = "OK", body = [crate::openapi::ServiceBayDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<service_bay::Model>>, ApiError> {
    Ok(Json(service_bay_service::list_service_bays(&state.db).await?))
}
