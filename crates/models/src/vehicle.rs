use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{customer, errors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicle")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub customer_id: i32,
    pub vin: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: i32,
    pub last_service_date: Option<DateTimeUtc>,
    pub next_service_due: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Customer,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Customer => Entity::belongs_to(customer::Entity)
                .from(Column::CustomerId)
                .to(customer::Column::Id)
                .into(),
        }
    }
}

impl Related<customer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Customer.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_make_model(make: &str, model: &str) -> Result<(), errors::ModelError> {
    if make.trim().is_empty() {
        return Err(errors::ModelError::Validation("make required".into()));
    }
    if model.trim().is_empty() {
        return Err(errors::ModelError::Validation("model required".into()));
    }
    Ok(())
}

pub fn validate_mileage(mileage: i32) -> Result<(), errors::ModelError> {
    if mileage < 0 {
        return Err(errors::ModelError::Validation("mileage must be >= 0".into()));
    }
    Ok(())
}
