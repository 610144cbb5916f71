//! Create `service_bay` table.
//!
//! A bay hosts at most one reservation at any instant.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceBay::Table)
                    .if_not_exists()
                    .col(pk_auto(ServiceBay::Id))
                    .col(string_len(ServiceBay::Name, 128).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceBay::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceBay { Table, Id, Name }
