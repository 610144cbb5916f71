use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use configs::ReservationsConfig;
use models::reservation;
use service::reservation::repository::mock::InMemoryReservationRepository;
use service::reservation::{AdmissionChecker, Candidate, ReservationInput, ReservationService, TimeSlot};

fn day_of_rows(count: i32) -> Vec<reservation::Model> {
    let base = Utc.with_ymd_and_hms(2024, 6, 14, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| reservation::Model {
            id: i + 1,
            service_bay_id: 1,
            customer_id: 1,
            vehicle_id: 1,
            start_time: base + Duration::minutes(i as i64 * 10),
            end_time: base + Duration::minutes(i as i64 * 10 + 9),
        })
        .collect()
}

fn bench_check(c: &mut Criterion) {
    let rows = day_of_rows(144);
    let base = Utc.with_ymd_and_hms(2024, 6, 14, 12, 0, 0).unwrap();
    let candidate = Candidate {
        id: None,
        service_bay_id: 1,
        slot: TimeSlot::new(base, base + Duration::minutes(45)),
    };
    let checker = AdmissionChecker::new();

    c.bench_function("admission_check_144_rows", |b| {
        b.iter(|| checker.check(black_box(&candidate), black_box(rows.clone())));
    });
}

fn bench_create(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let repo = Arc::new(InMemoryReservationRepository::with_rows(day_of_rows(144)));
    let svc = ReservationService::new(repo, &ReservationsConfig::default());
    let start = Utc.with_ymd_and_hms(2024, 6, 14, 12, 0, 0).unwrap();
    let input = ReservationInput {
        id: None,
        service_bay_id: 1,
        customer_id: 1,
        vehicle_id: 1,
        start_time: start,
        end_time: start + Duration::minutes(45),
    };

    // every iteration conflicts, so the repository does not grow
    c.bench_function("reservation_create_conflicting", |b| {
        b.iter(|| {
            let _ = rt.block_on(svc.create(input.clone())).unwrap();
        });
    });
}

criterion_group!(benches, bench_check, bench_create);
criterion_main!(benches);
