use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use common::pagination::PageQuery;
use models::customer;
use service::customer_service::{self, CustomerDetail, CustomerInput};

use crate::errors::ApiError;
use crate::extract::{EntityId, JsonBody};
use crate::state::ServerState;

#[utoipa::path(
    post, path = "/customer", tag = "customer",
    request_body = crate::openapi::CustomerInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CustomerDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Email already registered", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<CustomerInput>,
) -> Result<(StatusCode, Json<customer::Model>), ApiError> {
    let created = customer_service::create_customer(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/customer", tag = "customer",
    params(
        ("page" = Option<u32>, Query, description = "1-based page; omit both for all rows"),
        ("per_page" = Option<u32>, Query, description = "Rows per page, 1..=100")
    ),
    responses((status = 200, description = "OK", body = [crate::openapi::CustomerDoc]))
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<Vec<customer::Model>>, ApiError> {
    Ok(Json(customer_service::list_customers(&state.db, q.pagination()).await?))
}

/// Customer plus its vehicles and reservations.
#[utoipa::path(
    get, path = "/customer/{id}", tag = "customer",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CustomerDetailDoc),
        (status = 400, description = "Invalid id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    EntityId(id): EntityId,
) -> Result<Json<CustomerDetail>, ApiError> {
    Ok(Json(customer_service::get_customer_detail(&state.db, id).await?))
}

#[utoipa::path(
    patch, path = "/customer/{id}", tag = "customer",
    params(("id" = i32, Path, description = "Customer id")),
    request_body = crate::openapi::CustomerInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CustomerDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Email already registered", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    EntityId(id): EntityId,
    JsonBody(input): JsonBody<CustomerInput>,
) -> Result<Json<customer::Model>, ApiError> {
    Ok(Json(customer_service::update_customer(&state.db, id, input).await?))
}

#[utoipa::path(
    delete, path = "/customer/{id}", tag = "customer",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 204, description = "Deleted along with vehicles and reservations"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    EntityId(id): EntityId,
) -> Result<StatusCode, ApiError> {
    customer_service::delete_customer(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
