use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use common::pagination::PageQuery;
use models::vehicle;
use service::vehicle_service::{self, VehicleInput};

use crate::errors::ApiError;
use crate::extract::{EntityId, JsonBody};
use crate::state::ServerState;

#[utoipa::path(
    post, path = "/vehicle", tag = "vehicle",
    request_body = crate::openapi::VehicleInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::VehicleDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Unknown customer", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<VehicleInput>,
) -> Result<(StatusCode, Json<vehicle::Model>), ApiError> {
    let created = vehicle_service::create_vehicle(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/vehicle", tag = "vehicle",
    params(
        ("page" = Option<u32>, Query, description = "1-based page; omit both for all rows"),
        ("per_page" = Option<u32>, Query, description = "Rows per page, 1..=100")
    ),
    responses((status = 200, description = "OK", body = [crate::openapi::VehicleDoc]))
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<Vec<vehicle::Model>>, ApiError> {
    Ok(Json(vehicle_service::list_vehicles(&state.db, q.pagination()).await?))
}

#[utoipa::path(
    get, path = "/vehicle/{id}", tag = "vehicle",
    params(("id" = i32, Path, description = "Vehicle id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::VehicleDoc),
        (status = 400, description = "Invalid id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    EntityId(id): EntityId,
) -> Result<Json<vehicle::Model>, ApiError> {
    Ok(Json(vehicle_service::get_vehicle(&state.db, id).await?))
}

#[utoipa::path(
    patch, path = "/vehicle/{id}", tag = "vehicle",
    params(("id" = i32, Path, description = "Vehicle id")),
    request_body = crate::openapi::VehicleInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::VehicleDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Unknown customer", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    EntityId(id): EntityId,
    JsonBody(input): JsonBody<VehicleInput>,
) -> Result<Json<vehicle::Model>, ApiError> {
    Ok(Json(vehicle_service::update_vehicle(&state.db, id, input).await?))
}

#[utoipa::path(
    delete, path = "/vehicle/{id}", tag = "vehicle",
    params(("id" = i32, Path, description = "Vehicle id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    EntityId(id): EntityId,
) -> Result<StatusCode, ApiError> {
    vehicle_service::delete_vehicle(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
