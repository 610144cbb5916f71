use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use common::pagination::Pagination;
use models::reservation;

use super::admission::DayWindow;
use super::domain::ReservationInput;
use crate::errors::ServiceError;

/// Persistence seam for reservations.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn list(&self, page: Option<Pagination>) -> Result<Vec<reservation::Model>, ServiceError>;
    async fn list_by_service_bay(&self, service_bay_id: i32) -> Result<Vec<reservation::Model>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<reservation::Model>, ServiceError>;

    /// Rows on `service_bay_id` that lie inside `window`, minus `exclude_id`.
    async fn find_in_window(
        &self,
        service_bay_id: i32,
        window: DayWindow,
        exclude_id: Option<i32>,
    ) -> Result<Vec<reservation::Model>, ServiceError>;

    async fn insert(&self, input: &ReservationInput) -> Result<reservation::Model, ServiceError>;
    async fn update(&self, id: i32, input: &ReservationInput) -> Result<reservation::Model, ServiceError>;
    /// `false` when no row had that id.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

pub struct SeaOrmReservationRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmReservationRepository {
    /// Accepts an owned connection or one already shared with other layers.
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self { Self { db: db.into() } }
}

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn list(&self, page: Option<Pagination>) -> Result<Vec<reservation::Model>, ServiceError> {
        let query = reservation::Entity::find()
            .order_by_asc(reservation::Column::StartTime)
            .order_by_asc(reservation::Column::Id);
        let rows = match page {
            Some(p) => {
                let (idx, per_page) = p.normalize();
                query.paginate(self.db.as_ref(), per_page).fetch_page(idx).await?
            }
            None => query.all(self.db.as_ref()).await?,
        };
        Ok(rows)
    }

    async fn list_by_service_bay(&self, service_bay_id: i32) -> Result<Vec<reservation::Model>, ServiceError> {
        Ok(reservation::Entity::find()
            .filter(reservation::Column::ServiceBayId.eq(service_bay_id))
            .order_by_asc(reservation::Column::StartTime)
            .order_by_asc(reservation::Column::Id)
            .all(self.db.as_ref())
            .await?)
    }

    async fn get(&self, id: i32) -> Result<Option<reservation::Model>, ServiceError> {
        Ok(reservation::Entity::find_by_id(id).one(self.db.as_ref()).await?)
    }

    async fn find_in_window(
        &self,
        service_bay_id: i32,
        window: DayWindow,
        exclude_id: Option<i32>,
    ) -> Result<Vec<reservation::Model>, ServiceError> {
        let mut query = reservation::Entity::find()
            .filter(reservation::Column::ServiceBayId.eq(service_bay_id))
            .filter(reservation::Column::StartTime.gte(window.from))
            .filter(reservation::Column::EndTime.lt(window.until));
        if let Some(id) = exclude_id {
            query = query.filter(reservation::Column::Id.ne(id));
        }
        Ok(query
            .order_by_asc(reservation::Column::StartTime)
            .order_by_asc(reservation::Column::Id)
            .all(self.db.as_ref())
            .await?)
    }

    async fn insert(&self, input: &ReservationInput) -> Result<reservation::Model, ServiceError> {
        let am = reservation::ActiveModel {
            service_bay_id: Set(input.service_bay_id),
            customer_id: Set(input.customer_id),
            vehicle_id: Set(input.vehicle_id),
            start_time: Set(input.start_time),
            end_time: Set(input.end_time),
            ..Default::default()
        };
        Ok(am.insert(self.db.as_ref()).await?)
    }

    async fn update(&self, id: i32, input: &ReservationInput) -> Result<reservation::Model, ServiceError> {
        let am = reservation::ActiveModel {
            id: sea_orm::Unchanged(id),
            service_bay_id: Set(input.service_bay_id),
            customer_id: Set(input.customer_id),
            vehicle_id: Set(input.vehicle_id),
            start_time: Set(input.start_time),
            end_time: Set(input.end_time),
        };
        Ok(am.update(self.db.as_ref()).await?)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = reservation::Entity::delete_by_id(id).exec(self.db.as_ref()).await?;
        Ok(res.rows_affected > 0)
    }
}

/// In-memory repository for tests and benchmarks.
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::reservation::admission::TimeSlot;

    #[derive(Default)]
    pub struct InMemoryReservationRepository {
        rows: Mutex<Vec<reservation::Model>>,
        next_id: AtomicUsize,
        inserts: AtomicUsize,
        updates: AtomicUsize,
        // when set, writes fail as a foreign-key violation with this message
        reject_writes: Mutex<Option<String>>,
    }

    impl InMemoryReservationRepository {
        pub fn with_rows(rows: Vec<reservation::Model>) -> Self {
            let max = rows.iter().map(|r| r.id).max().unwrap_or(0);
            let repo = Self { rows: Mutex::new(rows), ..Default::default() };
            repo.next_id.store(max.max(0) as usize, Ordering::SeqCst);
            repo
        }

        pub fn rows(&self) -> Vec<reservation::Model> {
            self.rows.lock().unwrap().clone()
        }

        pub fn insert_count(&self) -> usize { self.inserts.load(Ordering::SeqCst) }
        pub fn update_count(&self) -> usize { self.updates.load(Ordering::SeqCst) }

        pub fn reject_writes(&self, message: &str) {
            *self.reject_writes.lock().unwrap() = Some(message.to_string());
        }

        fn check_writable(&self) -> Result<(), ServiceError> {
            match self.reject_writes.lock().unwrap().clone() {
                Some(msg) => Err(ServiceError::Constraint(msg)),
                None => Ok(()),
            }
        }

        fn sorted(mut rows: Vec<reservation::Model>) -> Vec<reservation::Model> {
            rows.sort_by_key(|r| (r.start_time, r.id));
            rows
        }
    }

    #[async_trait]
    impl ReservationRepository for InMemoryReservationRepository {
        async fn list(&self, page: Option<Pagination>) -> Result<Vec<reservation::Model>, ServiceError> {
            let rows = Self::sorted(self.rows());
            Ok(match page {
                Some(p) => {
                    let (idx, per_page) = p.normalize();
                    rows.into_iter().skip((idx * per_page) as usize).take(per_page as usize).collect()
                }
                None => rows,
            })
        }

        async fn list_by_service_bay(&self, service_bay_id: i32) -> Result<Vec<reservation::Model>, ServiceError> {
            let rows = self.rows().into_iter().filter(|r| r.service_bay_id == service_bay_id).collect();
            Ok(Self::sorted(rows))
        }

        async fn get(&self, id: i32) -> Result<Option<reservation::Model>, ServiceError> {
            Ok(self.rows().into_iter().find(|r| r.id == id))
        }

        async fn find_in_window(
            &self,
            service_bay_id: i32,
            window: DayWindow,
            exclude_id: Option<i32>,
        ) -> Result<Vec<reservation::Model>, ServiceError> {
            let rows: Vec<_> = self
                .rows()
                .into_iter()
                .filter(|r| r.service_bay_id == service_bay_id)
                .filter(|r| window.contains(&TimeSlot::new(r.start_time, r.end_time)))
                .filter(|r| Some(r.id) != exclude_id)
                .collect();
            // widen the gap between read and write so unserialized callers can interleave
            tokio::task::yield_now().await;
            Ok(Self::sorted(rows))
        }

        async fn insert(&self, input: &ReservationInput) -> Result<reservation::Model, ServiceError> {
            self.check_writable()?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i32 + 1;
            let row = reservation::Model {
                id,
                service_bay_id: input.service_bay_id,
                customer_id: input.customer_id,
                vehicle_id: input.vehicle_id,
                start_time: input.start_time,
                end_time: input.end_time,
            };
            self.rows.lock().unwrap().push(row.clone());
            self.inserts.fetch_add(1, Ordering::SeqCst);
            Ok(row)
        }

        async fn update(&self, id: i32, input: &ReservationInput) -> Result<reservation::Model, ServiceError> {
            self.check_writable()?;
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| ServiceError::not_found("reservation"))?;
            row.service_bay_id = input.service_bay_id;
            row.customer_id = input.customer_id;
            row.vehicle_id = input.vehicle_id;
            row.start_time = input.start_time;
            row.end_time = input.end_time;
            self.updates.fetch_add(1, Ordering::SeqCst);
            Ok(row.clone())
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| r.id != id);
            Ok(rows.len() < before)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::InMemoryReservationRepository;
    use super::*;
    use crate::reservation::admission::TimeSlot;
    use chrono::{TimeZone, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn row(id: i32, bay: i32, day: u32, from: u32, to: u32) -> reservation::Model {
        reservation::Model {
            id,
            service_bay_id: bay,
            customer_id: 1,
            vehicle_id: 1,
            start_time: Utc.with_ymd_and_hms(2024, 6, day, from, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 6, day, to, 0, 0).unwrap(),
        }
    }

    fn window(day: u32) -> DayWindow {
        TimeSlot::new(
            Utc.with_ymd_and_hms(2024, 6, day, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 6, day, 10, 0, 0).unwrap(),
        )
        .day_window()
    }

    #[tokio::test]
    async fn in_memory_window_scopes_by_bay_day_and_self() {
        let repo = InMemoryReservationRepository::with_rows(vec![
            row(1, 1, 14, 8, 9),
            row(2, 2, 14, 8, 9),
            row(3, 1, 15, 8, 9),
            row(4, 1, 14, 11, 12),
        ]);
        let found = repo.find_in_window(1, window(14), None).await.unwrap();
        assert_eq!(found.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 4]);

        let found = repo.find_in_window(1, window(14), Some(4)).await.unwrap();
        assert_eq!(found.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);
    }

    #[tokio::test]
    async fn in_memory_pages_in_start_order() {
        let repo = InMemoryReservationRepository::with_rows(vec![
            row(1, 1, 14, 12, 13),
            row(2, 1, 14, 8, 9),
            row(3, 1, 14, 10, 11),
        ]);
        let page = repo.list(Some(Pagination { page: 1, per_page: 2 })).await.unwrap();
        assert_eq!(page.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 3]);
        let page = repo.list(Some(Pagination { page: 2, per_page: 2 })).await.unwrap();
        assert_eq!(page.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);
    }

    #[tokio::test]
    async fn in_memory_ids_continue_after_seeded_rows() {
        let repo = InMemoryReservationRepository::with_rows(vec![row(7, 1, 14, 8, 9)]);
        let input = ReservationInput {
            id: None,
            service_bay_id: 1,
            customer_id: 1,
            vehicle_id: 1,
            start_time: Utc.with_ymd_and_hms(2024, 6, 14, 10, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 6, 14, 11, 0, 0).unwrap(),
        };
        assert_eq!(repo.insert(&input).await.unwrap().id, 8);
        assert!(repo.delete(7).await.unwrap());
        assert!(!repo.delete(7).await.unwrap());
    }

    #[tokio::test]
    async fn seaorm_window_query_returns_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, 1, 14, 8, 9)]])
            .into_connection();
        let repo = SeaOrmReservationRepository::new(db);
        let found = repo.find_in_window(1, window(14), Some(5)).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }

    #[tokio::test]
    async fn seaorm_delete_reports_missing_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult { last_insert_id: 0, rows_affected: 1 },
                MockExecResult { last_insert_id: 0, rows_affected: 0 },
            ])
            .into_connection();
        let repo = SeaOrmReservationRepository::new(db);
        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
    }
}
