//! Default rows inserted on first start.

use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use tracing::info;

use crate::{errors, service_bay};

pub const DEFAULT_SERVICE_BAYS: [&str; 3] = ["Service Bay 1", "Service Bay 2", "Service Bay 3"];

/// Insert the default service bays when the table is empty.
/// Returns the number of rows inserted.
pub async fn seed_service_bays(db: &DatabaseConnection) -> Result<u64, errors::ModelError> {
    let existing = service_bay::Entity::find()
        .count(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    if existing > 0 {
        return Ok(0);
    }
    let rows = DEFAULT_SERVICE_BAYS.iter().map(|name| service_bay::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    });
    service_bay::Entity::insert_many(rows)
        .exec_without_returning(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    info!(event = "seed_service_bays", count = DEFAULT_SERVICE_BAYS.len(), "seeded default service bays");
    Ok(DEFAULT_SERVICE_BAYS.len() as u64)
}
