use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::info;

use common::pagination::PageQuery;
use models::reservation;
use service::reservation::{ReservationInput, ReservationOutcome};

use crate::errors::ApiError;
use crate::extract::{EntityId, JsonBody};
use crate::metrics;
use crate::state::ServerState;

pub const CONFLICT_MESSAGE: &str = "Conflict with existing reservations";

/// Body of a `409` admission rejection.
#[derive(Debug, Serialize)]
pub struct ConflictBody {
    pub error: &'static str,
    pub reservations: Vec<reservation::Model>,
}

fn respond(outcome: ReservationOutcome, success: StatusCode) -> Response {
    metrics::record_outcome(&outcome);
    match outcome {
        ReservationOutcome::Saved(model) => (success, Json(model)).into_response(),
        ReservationOutcome::Conflicted(reservations) => {
            (StatusCode::CONFLICT, Json(ConflictBody { error: CONFLICT_MESSAGE, reservations })).into_response()
        }
    }
}

#[utoipa::path(
    post, path = "/reservation", tag = "reservation",
    request_body = crate::openapi::ReservationInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ReservationDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Overlaps existing reservations", body = crate::openapi::ConflictDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<ReservationInput>,
) -> Result<Response, ApiError> {
    let outcome = state.reservations.create(input).await?;
    Ok(respond(outcome, StatusCode::CREATED))
}

#[utoipa::path(
    get, path = "/reservation", tag = "reservation",
    params(
        ("page" = Option<u32>, Query, description = "1-based page; omit both for all rows"),
        ("per_page" = Option<u32>, Query, description = "Rows per page, 1..=100")
    ),
    responses((status = 200, description = "OK", body = [crate::openapi::ReservationDoc]))
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<Vec<reservation::Model>>, ApiError> {
    let rows = state.reservations.list(q.pagination()).await?;
    info!(event = "reservation_list", count = rows.len());
    Ok(Json(rows))
}

#[utoipa::path(
    get, path = "/reservation/by-service-bay/{id}", tag = "reservation",
    params(("id" = i32, Path, description = "Service bay id")),
    responses(
        (status = 200, description = "OK", body = [crate::openapi::ReservationDoc]),
        (status = 400, description = "Invalid id", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list_by_service_bay(
    State(state): State<ServerState>,
    EntityId(bay_id): EntityId,
) -> Result<Json<Vec<reservation::Model>>, ApiError> {
    Ok(Json(state.reservations.list_by_service_bay(bay_id).await?))
}

#[utoipa::path(
    get, path = "/reservation/{id}", tag = "reservation",
    params(("id" = i32, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ReservationDoc),
        (status = 400, description = "Invalid id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    EntityId(id): EntityId,
) -> Result<Json<reservation::Model>, ApiError> {
    Ok(Json(state.reservations.get(id).await?))
}

#[utoipa::path(
    patch, path = "/reservation/{id}", tag = "reservation",
    params(("id" = i32, Path, description = "Reservation id")),
    request_body = crate::openapi::ReservationInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ReservationDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Overlaps existing reservations", body = crate::openapi::ConflictDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    EntityId(id): EntityId,
    JsonBody(input): JsonBody<ReservationInput>,
) -> Result<Response, ApiError> {
    let outcome = state.reservations.update(id, input).await?;
    Ok(respond(outcome, StatusCode::OK))
}

#[utoipa::path(
    delete, path = "/reservation/{id}", tag = "reservation",
    params(("id" = i32, Path, description = "Reservation id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    EntityId(id): EntityId,
) -> Result<StatusCode, ApiError> {
    state.reservations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
