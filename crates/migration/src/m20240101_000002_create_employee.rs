//! Create `employee` table.
//!
//! `company_id` is nullable: employees outlive the company they belong to.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(pk_auto(Employee::Id))
                    .col(string_len(Employee::Name, 128).not_null())
                    .col(integer(Employee::Age).not_null())
                    .col(string_len(Employee::Gender, 16).not_null())
                    .col(double(Employee::Salary).not_null())
                    .col(integer_null(Employee::CompanyId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_company")
                            .from(Employee::Table, Employee::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Employee::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Employee { Table, Id, Name, Age, Gender, Salary, CompanyId }

#[derive(DeriveIden)]
enum Company { Table, Id }
