use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, ModelTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use crate::db::{connect_with_config, test_connection, DatabaseConfig};
use crate::employee::Gender;
use crate::{company, employee};

/// Fresh in-memory database with all migrations applied.
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::test]
async fn connection_is_usable() -> Result<()> {
    let db = setup_test_db().await?;
    test_connection(&db).await?;
    Ok(())
}

#[tokio::test]
async fn employee_insert_and_read_back() -> Result<()> {
    let db = setup_test_db().await?;

    let created = employee::create(&db, "John Smith", 32, Gender::Male, 5000.0, None).await?;
    assert!(created.id > 0);

    let found = employee::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found, Some(created.clone()));

    let females = employee::Entity::find()
        .filter(employee::Column::Gender.eq(Gender::Female))
        .all(&db)
        .await?;
    assert!(females.is_empty());
    Ok(())
}

#[tokio::test]
async fn employee_create_rejects_invalid_fields() -> Result<()> {
    let db = setup_test_db().await?;
    assert!(employee::create(&db, "", 30, Gender::Male, 1.0, None).await.is_err());
    assert!(employee::create(&db, "Ok", -3, Gender::Male, 1.0, None).await.is_err());
    assert!(employee::create(&db, "Ok", 30, Gender::Male, -1.0, None).await.is_err());
    assert!(employee::Entity::find().all(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn company_relations_load_employees() -> Result<()> {
    let db = setup_test_db().await?;

    let acme = company::create(&db, "Acme").await?;
    let other = company::create(&db, "Other").await?;
    employee::create(&db, "Jane Johnson", 28, Gender::Female, 6000.0, Some(acme.id)).await?;
    employee::create(&db, "David Williams", 35, Gender::Male, 5500.0, Some(acme.id)).await?;
    employee::create(&db, "Loner", 50, Gender::Male, 1000.0, None).await?;

    let related = acme.find_related(employee::Entity).all(&db).await?;
    assert_eq!(related.len(), 2);

    let companies = company::Entity::find().order_by_asc(company::Column::Id).all(&db).await?;
    let grouped = companies
        .load_many(employee::Entity::find().order_by_asc(employee::Column::Id), &db)
        .await?;
    assert_eq!(grouped.len(), 2);
    let names: Vec<_> = grouped[0].iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Jane Johnson", "David Williams"]);
    assert!(grouped[1].is_empty());
    assert_eq!(companies[1].id, other.id);
    Ok(())
}

#[tokio::test]
async fn rolled_back_transaction_leaves_no_rows() -> Result<()> {
    let db = setup_test_db().await?;

    let txn = db.begin().await?;
    let c = company::create(&txn, "Ephemeral").await?;
    employee::create(&txn, "Temp", 20, Gender::Female, 10.0, Some(c.id)).await?;
    txn.rollback().await?;

    assert!(company::Entity::find().all(&db).await?.is_empty());
    assert!(employee::Entity::find().all(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn migrations_roll_down_and_up_again() -> Result<()> {
    let db = setup_test_db().await?;
    migration::Migrator::down(&db, None).await?;
    migration::Migrator::up(&db, None).await?;
    company::create(&db, "After Redo").await?;
    assert_eq!(company::Entity::find().all(&db).await?.len(), 1);
    Ok(())
}
