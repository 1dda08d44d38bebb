use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Employee: gender filter
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_gender")
                    .table(Employee::Table)
                    .col(Employee::Gender)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Employee: company lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_company_id")
                    .table(Employee::Table)
                    .col(Employee::CompanyId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_employee_company_id").table(Employee::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_employee_gender").table(Employee::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Employee { Table, Gender, CompanyId }
