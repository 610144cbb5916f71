//! Create `reservation` table.
//!
//! Overlap between rows of the same bay is not enforced here; the service
//! layer decides admission before writing.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservation::Table)
                    .if_not_exists()
                    .col(pk_auto(Reservation::Id))
                    .col(integer(Reservation::ServiceBayId))
                    .col(integer(Reservation::CustomerId))
                    .col(integer(Reservation::VehicleId))
                    .col(timestamp_with_time_zone(Reservation::StartTime))
                    .col(timestamp_with_time_zone(Reservation::EndTime))
                    .check(Expr::col(Reservation::EndTime).gt(Expr::col(Reservation::StartTime)))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_service_bay")
                            .from(Reservation::Table, Reservation::ServiceBayId)
                            .to(ServiceBay::Table, ServiceBay::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_customer")
                            .from(Reservation::Table, Reservation::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_vehicle")
                            .from(Reservation::Table, Reservation::VehicleId)
                            .to(Vehicle::Table, Vehicle::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Reservation::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Reservation {
    Table,
    Id,
    ServiceBayId,
    CustomerId,
    VehicleId,
    StartTime,
    EndTime,
}

#[derive(DeriveIden)]
enum ServiceBay { Table, Id }

#[derive(DeriveIden)]
enum Customer { Table, Id }

#[derive(DeriveIden)]
enum Vehicle { Table, Id }
