use axum::{
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::handlers::{customers, reservations, service_bays, vehicles};
use crate::metrics;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics::metrics));

    let customer_routes = Router::new()
        .route("/customer", get(customers::list).post(customers::create))
        .route(
            "/customer/:id",
            get(customers::get).patch(customers::update).delete(customers::delete),
        );

    let vehicle_routes = Router::new()
        .route("/vehicle", get(vehicles::list).post(vehicles::create))
        .route(
            "/vehicle/:id",
            get(vehicles::get).patch(vehicles::update).delete(vehicles::delete),
        );

    let reservation_routes = Router::new()
        .route("/reservation", get(reservations::list).post(reservations::create))
        .route("/reservation/by-service-bay/:id", get(reservations::list_by_service_bay))
        .route(
            "/reservation/:id",
            get(reservations::get).patch(reservations::update).delete(reservations::delete),
        )
        .route("/service-bay", get(service_bays::list));

    // Compose
    ops.merge(customer_routes)
        .merge(vehicle_routes)
        .merge(reservation_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
