use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Vehicle: index on customer_id
        manager
            .create_index(
                Index::create()
                    .name("idx_vehicle_customer")
                    .table(Vehicle::Table)
                    .col(Vehicle::CustomerId)
                    .to_owned(),
            )
            .await?;

        // Reservation: day-window lookups filter on bay then start time
        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_bay_start")
                    .table(Reservation::Table)
                    .col(Reservation::ServiceBayId)
                    .col(Reservation::StartTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_customer")
                    .table(Reservation::Table)
                    .col(Reservation::CustomerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_vehicle_customer").table(Vehicle::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reservation_bay_start").table(Reservation::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reservation_customer").table(Reservation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Vehicle { Table, CustomerId }

#[derive(DeriveIden)]
enum Reservation { Table, ServiceBayId, StartTime, CustomerId }
