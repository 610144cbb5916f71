use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use common::pagination::Pagination;
use configs::ReservationsConfig;
use models::reservation;

use super::admission::{Admission, AdmissionChecker, Booking};
use super::domain::{ReservationInput, ReservationOutcome};
use super::locks::{BayGuard, BayLocks};
use super::repository::ReservationRepository;
use crate::errors::ServiceError;

/// Reservation business service, independent of the web framework.
pub struct ReservationService {
    repo: Arc<dyn ReservationRepository>,
    checker: AdmissionChecker,
    locks: Option<BayLocks>,
}

impl ReservationService {
    pub fn new(repo: Arc<dyn ReservationRepository>, cfg: &ReservationsConfig) -> Self {
        let checker = if cfg.refilter_snapshot { AdmissionChecker::refiltering() } else { AdmissionChecker::new() };
        let locks = cfg.serialize_per_bay.then(BayLocks::new);
        Self { repo, checker, locks }
    }

    async fn lock_bay(&self, service_bay_id: i32) -> Option<BayGuard> {
        match &self.locks {
            Some(locks) => Some(locks.acquire(service_bay_id).await),
            None => None,
        }
    }

    /// Validate, check for overlaps on the bay and insert when admitted.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::reservation::{ReservationService, ReservationOutcome, ReservationInput};
    /// use service::reservation::repository::mock::InMemoryReservationRepository;
    /// let svc = ReservationService::new(Arc::new(InMemoryReservationRepository::default()), &Default::default());
    /// let input: ReservationInput = serde_json::from_str(r#"{
    ///     "serviceBayId": 1, "customerId": 1, "vehicleId": 1,
    ///     "startTime": "2024-06-14 08:00", "endTime": "2024-06-14 09:00"
    /// }"#).unwrap();
    /// let first = tokio_test::block_on(svc.create(input.clone())).unwrap();
    /// assert!(matches!(first, ReservationOutcome::Saved(_)));
    /// let second = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert!(matches!(second, ReservationOutcome::Conflicted(ref c) if c.len() == 1));
    /// ```
    #[instrument(skip(self, input), fields(service_bay_id = input.service_bay_id))]
    pub async fn create(&self, input: ReservationInput) -> Result<ReservationOutcome, ServiceError> {
        input.validate()?;
        let candidate = input.candidate(None);

        let _guard = self.lock_bay(candidate.service_bay_id).await;
        let snapshot = self
            .repo
            .find_in_window(candidate.service_bay_id, candidate.slot().day_window(), None)
            .await?;
        debug!(event = "admission_snapshot", rows = snapshot.len());

        match self.checker.check(&candidate, snapshot) {
            Admission::Admit => {
                let saved = self.repo.insert(&input).await?;
                info!(event = "reservation_created", reservation_id = saved.id, "reservation admitted");
                Ok(ReservationOutcome::Saved(saved))
            }
            Admission::Reject(conflicts) => {
                warn!(event = "reservation_conflict", conflicts = conflicts.len(), "reservation rejected");
                Ok(ReservationOutcome::Conflicted(conflicts))
            }
        }
    }

    /// Same as [`create`](Self::create) but against an existing row, which is
    /// left out of its own conflict check.
    #[instrument(skip(self, input), fields(reservation_id = id, service_bay_id = input.service_bay_id))]
    pub async fn update(&self, id: i32, input: ReservationInput) -> Result<ReservationOutcome, ServiceError> {
        reservation::validate_reference("id", id)?;
        if let Some(body_id) = input.id {
            if body_id != id {
                return Err(ServiceError::Validation(format!("body id {body_id} does not match path id {id}")));
            }
        }
        input.validate()?;
        let candidate = input.candidate(Some(id));

        let _guard = self.lock_bay(candidate.service_bay_id).await;
        if self.repo.get(id).await?.is_none() {
            return Err(ServiceError::not_found("reservation"));
        }
        let snapshot = self
            .repo
            .find_in_window(candidate.service_bay_id, candidate.slot().day_window(), Some(id))
            .await?;

        match self.checker.check(&candidate, snapshot) {
            Admission::Admit => {
                let saved = self.repo.update(id, &input).await?;
                info!(event = "reservation_updated", reservation_id = saved.id, "reservation admitted");
                Ok(ReservationOutcome::Saved(saved))
            }
            Admission::Reject(conflicts) => {
                warn!(event = "reservation_conflict", conflicts = conflicts.len(), "reservation update rejected");
                Ok(ReservationOutcome::Conflicted(conflicts))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<reservation::Model, ServiceError> {
        reservation::validate_reference("id", id)?;
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("reservation"))
    }

    #[instrument(skip(self))]
    pub async fn list(&self, page: Option<Pagination>) -> Result<Vec<reservation::Model>, ServiceError> {
        self.repo.list(page).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_service_bay(&self, service_bay_id: i32) -> Result<Vec<reservation::Model>, ServiceError> {
        reservation::validate_reference("serviceBayId", service_bay_id)?;
        self.repo.list_by_service_bay(service_bay_id).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        reservation::validate_reference("id", id)?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("reservation"));
        }
        info!(event = "reservation_deleted", reservation_id = id);
        Ok(())
    }
}
