use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, PaginatorTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use common::pagination::Pagination;
use models::{customer, reservation, vehicle};
use crate::errors::ServiceError;

/// Create/replace body for a customer.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    #[serde(default)]
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
}

impl CustomerInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(id) = self.id {
            models::validate_id("id", id)?;
        }
        customer::validate_name("firstName", &self.first_name)?;
        customer::validate_name("lastName", &self.last_name)?;
        customer::validate_email(&self.email)?;
        Ok(())
    }

    fn apply(self, am: &mut customer::ActiveModel) {
        am.first_name = Set(self.first_name);
        am.last_name = Set(self.last_name);
        am.email = Set(self.email.trim().to_string());
        am.phone_number = Set(self.phone_number);
        am.street = Set(self.street);
        am.city = Set(self.city);
        am.state = Set(self.state);
        am.postal_code = Set(self.postal_code);
        am.country = Set(self.country);
        am.notes = Set(self.notes);
    }
}

/// A customer together with everything that hangs off it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub customer: customer::Model,
    pub vehicles: Vec<vehicle::Model>,
    pub reservations: Vec<reservation::Model>,
}

/// Create a customer. A duplicate email surfaces as [`ServiceError::Constraint`].
#[instrument(skip(db, input), fields(email = %input.email))]
pub async fn create_customer(db: &DatabaseConnection, input: CustomerInput) -> Result<customer::Model, ServiceError> {
    input.validate()?;
    let mut am = customer::ActiveModel { ..Default::default() };
    input.apply(&mut am);
    let created = am.insert(db).await?;
    info!(event = "customer_created", customer_id = created.id);
    Ok(created)
}

/// List customers by id; unpaged when `page` is `None`.
pub async fn list_customers(db: &DatabaseConnection, page: Option<Pagination>) -> Result<Vec<customer::Model>, ServiceError> {
    let query = customer::Entity::find().order_by_asc(customer::Column::Id);
    let rows = match page {
        Some(p) => {
            let (page_idx, per_page) = p.normalize();
            query.paginate(db, per_page).fetch_page(page_idx).await?
        }
        None => query.all(db).await?,
    };
    Ok(rows)
}

/// Get a customer with its vehicles and reservations.
#[instrument(skip(db))]
pub async fn get_customer_detail(db: &DatabaseConnection, id: i32) -> Result<CustomerDetail, ServiceError> {
    models::validate_id("id", id)?;
    let customer = customer::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("customer"))?;
    let vehicles = customer
        .find_related(vehicle::Entity)
        .order_by_asc(vehicle::Column::Id)
        .all(db)
        .await?;
    let reservations = customer
        .find_related(reservation::Entity)
        .order_by_asc(reservation::Column::StartTime)
        .all(db)
        .await?;
    Ok(CustomerDetail { customer, vehicles, reservations })
}

/// Replace a customer's fields.
#[instrument(skip(db, input))]
pub async fn update_customer(db: &DatabaseConnection, id: i32, input: CustomerInput) -> Result<customer::Model, ServiceError> {
    models::validate_id("id", id)?;
    if input.id.is_some_and(|body_id| body_id != id) {
        return Err(ServiceError::Validation("body id does not match path id".into()));
    }
    input.validate()?;
    let mut am: customer::ActiveModel = customer::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("customer"))?
        .into();
    input.apply(&mut am);
    let updated = am.update(db).await?;
    info!(event = "customer_updated", customer_id = id);
    Ok(updated)
}

/// Delete a customer; vehicles and reservations go with it.
#[instrument(skip(db))]
pub async fn delete_customer(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    models::validate_id("id", id)?;
    let res = customer::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("customer"));
    }
    info!(event = "customer_deleted", customer_id = id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn input() -> CustomerInput {
        serde_json::from_value(serde_json::json!({
            "firstName": "John",
            "lastName": "Doe",
            "email": "johnd@example.com",
            "city": "Gothenburg"
        }))
        .unwrap()
    }

    fn model(id: i32) -> customer::Model {
        customer::Model {
            id,
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "johnd@example.com".into(),
            phone_number: None,
            street: None,
            city: Some("Gothenburg".into()),
            state: None,
            postal_code: None,
            country: None,
            notes: None,
        }
    }

    #[test]
    fn validation_catches_bad_email_and_blank_names() {
        assert!(input().validate().is_ok());
        let mut bad = input();
        bad.email = "john".into();
        assert!(bad.validate().is_err());
        let mut bad = input();
        bad.first_name = " ".into();
        assert!(bad.validate().is_err());
    }

    #[tokio::test]
    async fn create_returns_inserted_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1)]])
            .into_connection();
        let created = create_customer(&db, input()).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.city.as_deref(), Some("Gothenburg"));
    }

    #[tokio::test]
    async fn create_rejects_invalid_input_without_touching_db() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let mut bad = input();
        bad.email = "nope".into();
        assert!(create_customer(&db, bad).await.is_err());
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn detail_includes_vehicles_and_reservations() {
        let v = vehicle::Model {
            id: 2,
            customer_id: 1,
            vin: None,
            make: "Volvo".into(),
            model: "V70".into(),
            year: 2004,
            mileage: 250_000,
            last_service_date: None,
            next_service_due: None,
            notes: None,
        };
        let r = reservation::Model {
            id: 3,
            service_bay_id: 1,
            customer_id: 1,
            vehicle_id: 2,
            start_time: Utc.with_ymd_and_hms(2024, 6, 14, 8, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 6, 14, 9, 0, 0).unwrap(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1)]])
            .append_query_results([vec![v.clone()]])
            .append_query_results([vec![r.clone()]])
            .into_connection();
        let detail = get_customer_detail(&db, 1).await.unwrap();
        assert_eq!(detail.vehicles, vec![v]);
        assert_eq!(detail.reservations, vec![r]);

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["firstName"], "John");
        assert_eq!(json["vehicles"][0]["make"], "Volvo");
        assert_eq!(json["reservations"][0]["vehicleId"], 2);
    }

    #[tokio::test]
    async fn unknown_customer_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<customer::Model>::new()])
            .into_connection();
        assert!(matches!(get_customer_detail(&db, 9).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let mut changed = model(1);
        changed.city = None;
        changed.last_name = "Smith".into();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1)]])
            .append_query_results([vec![changed.clone()]])
            .into_connection();
        let mut body = input();
        body.last_name = "Smith".into();
        body.city = None;
        assert_eq!(update_customer(&db, 1, body).await.unwrap(), changed);
    }

    #[tokio::test]
    async fn update_rejects_mismatched_body_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let mut body = input();
        body.id = Some(2);
        assert!(matches!(update_customer(&db, 1, body).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn delete_missing_customer_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult { last_insert_id: 0, rows_affected: 1 },
                MockExecResult { last_insert_id: 0, rows_affected: 0 },
            ])
            .into_connection();
        assert!(delete_customer(&db, 1).await.is_ok());
        assert!(matches!(delete_customer(&db, 1).await, Err(ServiceError::NotFound(_))));
    }
}
