use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use serde::Deserialize;
use tracing::{info, instrument};

use common::pagination::Pagination;
use models::{datetime, vehicle};
use crate::errors::ServiceError;

/// Create/replace body for a vehicle. An unknown `customerId` is reported by
/// the database as a foreign-key violation.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInput {
    #[serde(default)]
    pub id: Option<i32>,
    pub customer_id: i32,
    pub vin: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: i32,
    #[serde(default, deserialize_with = "datetime::flexible::option::deserialize")]
    pub last_service_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "datetime::flexible::option::deserialize")]
    pub next_service_due: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl VehicleInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(id) = self.id {
            models::validate_id("id", id)?;
        }
        models::validate_id("customerId", self.customer_id)?;
        vehicle::validate_make_model(&self.make, &self.model)?;
        vehicle::validate_mileage(self.mileage)?;
        Ok(())
    }

    fn apply(self, am: &mut vehicle::ActiveModel) {
        am.customer_id = Set(self.customer_id);
        am.vin = Set(self.vin);
        am.make = Set(self.make);
        am.model = Set(self.model);
        am.year = Set(self.year);
        am.mileage = Set(self.mileage);
        am.last_service_date = Set(self.last_service_date);
        am.next_service_due = Set(self.next_service_due);
        am.notes = Set(self.notes);
    }
}

#[instrument(skip(db, input), fields(customer_id = input.customer_id))]
pub async fn create_vehicle(db: &DatabaseConnection, input: VehicleInput) -> Result<vehicle::Model, ServiceError> {
    input.validate()?;
    let mut am = vehicle::ActiveModel { ..Default::default() };
    input.apply(&mut am);
    let created = am.insert(db).await?;
    info!(event = "vehicle_created", vehicle_id = created.id);
    Ok(created)
}

pub async fn list_vehicles(db: &DatabaseConnection, page: Option<Pagination>) -> Result<Vec<vehicle::Model>, ServiceError> {
    let query = vehicle::Entity::find().order_by_asc(vehicle::Column::Id);
    let rows = match page {
        Some(p) => {
            let (page_idx, per_page) = p.normalize();
            query.paginate(db, per_page).fetch_page(page_idx).await?
        }
        None => query.all(db).await?,
    };
    Ok(rows)
}

pub async fn get_vehicle(db: &DatabaseConnection, id: i32) -> Result<vehicle::Model, ServiceError> {
    models::validate_id("id", id)?;
    vehicle::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("vehicle"))
}

#[instrument(skip(db, input))]
pub async fn update_vehicle(db: &DatabaseConnection, id: i32, input: VehicleInput) -> Result<vehicle::Model, ServiceError> {
    models::validate_id("id", id)?;
    if input.id.is_some_and(|body_id| body_id != id) {
        return Err(ServiceError::Validation("body id does not match path id".into()));
    }
    input.validate()?;
    let mut am: vehicle::ActiveModel = get_vehicle(db, id).await?.into();
    input.apply(&mut am);
    let updated = am.update(db).await?;
    info!(event = "vehicle_updated", vehicle_id = id);
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_vehicle(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    models::validate_id("id", id)?;
    let res = vehicle::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("vehicle"));
    }
    info!(event = "vehicle_deleted", vehicle_id = id);
    Ok(())
}
