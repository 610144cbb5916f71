use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use models::service_bay;
use crate::errors::ServiceError;

/// All service bays, by id.
pub async fn list_service_bays(db: &DatabaseConnection) -> Result<Vec<service_bay::Model>, ServiceError> {
    Ok(service_bay::Entity::find()
        .order_by_asc(service_bay::Column::Id)
        .all(db)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn lists_seeded_bays() {
        let bays: Vec<service_bay::Model> = models::seed::DEFAULT_SERVICE_BAYS
            .iter()
            .enumerate()
            .map(|(i, name)| service_bay::Model { id: i as i32 + 1, name: name.to_string() })
            .collect();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([bays.clone()])
            .into_connection();
        let listed = list_service_bays(&db).await.unwrap();
        assert_eq!(listed, bays);
        assert_eq!(listed[0].name, "Service Bay 1");
    }
}
