#![cfg(test)]
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use models::employee::{self, Gender};
use sea_orm::DatabaseConnection;

/// Fresh, migrated in-memory database for one test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// The five employees every scenario starts from, in insertion order.
pub async fn seed_employees(db: &DatabaseConnection) -> Result<(), anyhow::Error> {
    let rows = [
        ("John Smith", 32, Gender::Male, 5000.0),
        ("Jane Johnson", 28, Gender::Female, 6000.0),
        ("David Williams", 35, Gender::Male, 5500.0),
        ("Emily Brown", 23, Gender::Female, 4500.0),
        ("Michael Jones", 40, Gender::Male, 7000.0),
    ];
    for (name, age, gender, salary) in rows {
        employee::create(db, name, age, gender, salary, None).await?;
    }
    Ok(())
}
