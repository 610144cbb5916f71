#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};

// migrations run once per test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Live database for integration-style tests, or `None` when `SKIP_DB_TESTS`
/// is set or `DATABASE_URL` is missing.
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(None);
    }
    let Ok(url) = std::env::var("DATABASE_URL") else { return Ok(None) };
    let cfg = DatabaseConfig { url, max_connections: 5, min_connections: 1, ..Default::default() };

    let db = connect_with_config(&cfg).await?;
    MIGRATED
        .get_or_try_init(|| async { migration::Migrator::up(&db, None).await })
        .await?;
    Ok(Some(db))
}

mod live {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};
    use configs::ReservationsConfig;

    use super::get_db;
    use crate::customer_service::{self, CustomerInput};
    use crate::reservation::{ReservationInput, ReservationOutcome, ReservationService, SeaOrmReservationRepository};
    use crate::vehicle_service::{self, VehicleInput};

    #[tokio::test]
    async fn reservation_round_trip_against_postgres() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let db = Arc::new(db);
        models::seed::seed_service_bays(&db).await?;

        let stamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let customer = customer_service::create_customer(&db, CustomerInput {
            id: None,
            first_name: "Svc".into(),
            last_name: "Test".into(),
            email: format!("svc_{stamp}@example.com"),
            phone_number: None,
            street: None,
            city: None,
            state: None,
            postal_code: None,
            country: None,
            notes: None,
        })
        .await?;
        let vehicle = vehicle_service::create_vehicle(&db, VehicleInput {
            id: None,
            customer_id: customer.id,
            vin: None,
            make: "Volvo".into(),
            model: "V70".into(),
            year: 2004,
            mileage: 1,
            last_service_date: None,
            next_service_due: None,
            notes: None,
        })
        .await?;

        let bays = crate::service_bay_service::list_service_bays(&db).await?;
        let bay = bays.first().map(|b| b.id).unwrap_or(1);
        // far-future day so reruns do not collide with earlier rows
        let start = Utc.with_ymd_and_hms(2300, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(stamp.rem_euclid(1_000_000));
        let input = ReservationInput {
            id: None,
            service_bay_id: bay,
            customer_id: customer.id,
            vehicle_id: vehicle.id,
            start_time: start,
            end_time: start + Duration::minutes(30),
        };

        let svc = ReservationService::new(
            Arc::new(SeaOrmReservationRepository::new(db.clone())),
            &ReservationsConfig::default(),
        );
        let saved = match svc.create(input.clone()).await? {
            ReservationOutcome::Saved(r) => r,
            other => panic!("expected saved, got {other:?}"),
        };
        match svc.create(input).await? {
            ReservationOutcome::Conflicted(c) => assert!(c.iter().any(|r| r.id == saved.id)),
            other => panic!("expected conflict, got {other:?}"),
        }

        customer_service::delete_customer(&db, customer.id).await?;
        assert!(svc.get(saved.id).await.is_err());
        Ok(())
    }
}
