use std::sync::Arc;

use configs::ReservationsConfig;
use sea_orm::DatabaseConnection;
use service::reservation::{ReservationRepository, ReservationService, SeaOrmReservationRepository};

/// Shared handler state.
#[derive(Clone)]
pub struct ServerState {
    pub db: Arc<DatabaseConnection>,
    pub reservations: Arc<ReservationService>,
}

impl ServerState {
    /// Reservations backed by the same database connection.
    pub fn new(db: DatabaseConnection, cfg: &ReservationsConfig) -> Self {
        let db = Arc::new(db);
        let repo = Arc::new(SeaOrmReservationRepository::new(db.clone()));
        Self::from_parts(db, repo, cfg)
    }

    pub fn with_reservation_repo(
        db: DatabaseConnection,
        repo: Arc<dyn ReservationRepository>,
        cfg: &ReservationsConfig,
    ) -> Self {
        Self::from_parts(Arc::new(db), repo, cfg)
    }

    fn from_parts(
        db: Arc<DatabaseConnection>,
        repo: Arc<dyn ReservationRepository>,
        cfg: &ReservationsConfig,
    ) -> Self {
        Self { db, reservations: Arc::new(ReservationService::new(repo, cfg)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn state_clones_share_one_connection() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let state = ServerState::new(db, &ReservationsConfig::default());
        let copy = state.clone();
        assert!(Arc::ptr_eq(&state.db, &copy.db));
        assert!(Arc::ptr_eq(&state.reservations, &copy.reservations));
    }
}
