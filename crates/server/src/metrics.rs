use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

use service::reservation::ReservationOutcome;

// Prometheus metrics (default registry)
pub static RESERVATION_ADMISSIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "autoshop_reservation_admissions_total",
        "Reservation admission decisions by outcome",
        &["outcome"]
    )
    .expect("register reservation_admissions_total")
});

pub static RESERVATION_CONFLICTS: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "autoshop_reservation_conflicts_total",
        "Existing reservations reported as conflicting"
    )
    .expect("register reservation_conflicts_total")
});

pub fn record_outcome(outcome: &ReservationOutcome) {
    match outcome {
        ReservationOutcome::Saved(_) => RESERVATION_ADMISSIONS.with_label_values(&["admitted"]).inc(),
        ReservationOutcome::Conflicted(conflicts) => {
            RESERVATION_ADMISSIONS.with_label_values(&["rejected"]).inc();
            RESERVATION_CONFLICTS.inc_by(conflicts.len() as u64);
        }
    }
}

pub fn encode_metrics() -> (StatusCode, String) {
    // touch the statics so both series are exported before the first booking
    Lazy::force(&RESERVATION_ADMISSIONS);
    Lazy::force(&RESERVATION_CONFLICTS);

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

pub async fn metrics() -> (StatusCode, String) {
    encode_metrics()
}
