use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::reservation;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_bay")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Reservation,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Reservation => Entity::has_many(reservation::Entity).into() }
    }
}

impl Related<reservation::Entity> for Entity {
    fn to() -> RelationDef { Relation::Reservation.def() }
}

impl ActiveModelBehavior for ActiveModel {}
