use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicle::Table)
                    .if_not_exists()
                    .col(pk_auto(Vehicle::Id))
                    .col(integer(Vehicle::CustomerId))
                    .col(string_null(Vehicle::Vin))
                    .col(string(Vehicle::Make))
                    .col(string(Vehicle::Model))
                    .col(integer(Vehicle::Year))
                    .col(integer(Vehicle::Mileage))
                    .col(timestamp_with_time_zone_null(Vehicle::LastServiceDate))
                    .col(timestamp_with_time_zone_null(Vehicle::NextServiceDue))
                    .col(text_null(Vehicle::Notes))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicle_customer")
                            .from(Vehicle::Table, Vehicle::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Vehicle::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Vehicle {
    Table,
    Id,
    CustomerId,
    Vin,
    Make,
    Model,
    Year,
    Mileage,
    LastServiceDate,
    NextServiceDue,
    Notes,
}

#[derive(DeriveIden)]
enum Customer { Table, Id }
