#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use configs::ReservationsConfig;
use models::reservation;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use serde_json::Value;
use tower::ServiceExt;

use server::routes::build_router;
use server::state::ServerState;
use service::reservation::repository::mock::InMemoryReservationRepository;
use tower_http::cors::CorsLayer;

pub fn at(h: u32, m: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 14, h, m, 0).unwrap()
}

pub fn stored(id: i32, from: (u32, u32), to: (u32, u32)) -> reservation::Model {
    reservation::Model {
        id,
        service_bay_id: 1,
        customer_id: 1,
        vehicle_id: 1,
        start_time: at(from.0, from.1),
        end_time: at(to.0, to.1),
    }
}

/// r1=[08:00,08:30) r2=[09:00,10:00) r3=[10:15,11:00) on bay 1
pub fn morning() -> Vec<reservation::Model> {
    vec![stored(1, (8, 0), (8, 30)), stored(2, (9, 0), (10, 0)), stored(3, (10, 15), (11, 0))]
}

pub fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

/// Router whose reservations live in memory and whose other entities read from `db`.
pub fn app(rows: Vec<reservation::Model>, db: DatabaseConnection) -> (Router, Arc<InMemoryReservationRepository>) {
    let repo = Arc::new(InMemoryReservationRepository::with_rows(rows));
    let state = ServerState::with_reservation_repo(db, repo.clone(), &ReservationsConfig::default());
    (build_router(state, CorsLayer::very_permissive()), repo)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}
