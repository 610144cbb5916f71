use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customer::Table)
                    .if_not_exists()
                    .col(pk_auto(Customer::Id))
                    .col(string(Customer::FirstName))
                    .col(string(Customer::LastName))
                    .col(string_uniq(Customer::Email))
                    .col(string_null(Customer::PhoneNumber))
                    .col(string_null(Customer::Street))
                    .col(string_null(Customer::City))
                    .col(string_null(Customer::State))
                    .col(string_null(Customer::PostalCode))
                    .col(string_null(Customer::Country))
                    .col(text_null(Customer::Notes))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Customer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Customer {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    Street,
    City,
    State,
    PostalCode,
    Country,
    Notes,
}
