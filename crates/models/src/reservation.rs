use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{customer, datetime, errors, service_bay, vehicle};

/// A persisted booking of one service bay over `[start_time, end_time)`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservation")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub service_bay_id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub start_time: DateTimeUtc,
    pub end_time: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    ServiceBay,
    Customer,
    Vehicle,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ServiceBay => Entity::belongs_to(service_bay::Entity)
                .from(Column::ServiceBayId)
                .to(service_bay::Column::Id)
                .into(),
            Relation::Customer => Entity::belongs_to(customer::Entity)
                .from(Column::CustomerId)
                .to(customer::Column::Id)
                .into(),
            Relation::Vehicle => Entity::belongs_to(vehicle::Entity)
                .from(Column::VehicleId)
                .to(vehicle::Column::Id)
                .into(),
        }
    }
}

impl Related<service_bay::Entity> for Entity {
    fn to() -> RelationDef { Relation::ServiceBay.def() }
}

impl Related<customer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Customer.def() }
}

impl Related<vehicle::Entity> for Entity {
    fn to() -> RelationDef { Relation::Vehicle.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// `end` must fall in a later minute than `start`; seconds are ignored.
pub fn validate_window(start: &DateTime<Utc>, end: &DateTime<Utc>) -> Result<(), errors::ModelError> {
    if datetime::minute_of(end) <= datetime::minute_of(start) {
        return Err(errors::ModelError::Validation("endTime must be after startTime".into()));
    }
    Ok(())
}

pub fn validate_reference(field: &str, id: i32) -> Result<(), errors::ModelError> {
    if id <= 0 {
        return Err(errors::ModelError::Validation(format!("{field} must be a positive integer")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 14, h, m, s).unwrap()
    }

    #[test]
    fn window_must_advance_by_a_minute() {
        assert!(validate_window(&at(8, 0, 0), &at(8, 1, 0)).is_ok());
        assert!(validate_window(&at(8, 0, 0), &at(8, 0, 59)).is_err());
        assert!(validate_window(&at(9, 0, 0), &at(8, 0, 0)).is_err());
        assert!(validate_window(&at(8, 0, 0), &at(8, 0, 0)).is_err());
    }

    #[test]
    fn seconds_do_not_count_toward_the_minute() {
        // 08:00:59 -> 08:01:00 is one second but crosses a minute boundary
        assert!(validate_window(&at(8, 0, 59), &at(8, 1, 0)).is_ok());
    }

    #[test]
    fn references_must_be_positive() {
        assert!(validate_reference("customerId", 1).is_ok());
        assert!(validate_reference("customerId", 0).is_err());
        assert!(validate_reference("vehicleId", -4).is_err());
    }

    #[test]
    fn serializes_camel_case() {
        let m = Model { id: 1, service_bay_id: 2, customer_id: 3, vehicle_id: 4, start_time: at(8, 0, 0), end_time: at(8, 30, 0) };
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["serviceBayId"], 2);
        assert_eq!(json["startTime"], "2024-06-14T08:00:00Z");
    }
}
