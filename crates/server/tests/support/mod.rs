#![allow(dead_code)]

use axum::Router;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use server::{routes, AppState};
use service::employee::{Employee, Gender, NewEmployee};
use tower_http::cors::CorsLayer;

/// State over a fresh, migrated in-memory database.
pub async fn test_state() -> anyhow::Result<AppState> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(AppState::new(db))
}

pub fn app(state: AppState) -> Router {
    routes::build_router(state, CorsLayer::very_permissive())
}

/// John Smith, Jane Johnson, David Williams, Emily Brown, Michael Jones.
pub async fn seed(state: &AppState) -> anyhow::Result<Vec<Employee>> {
    let rows = [
        ("John Smith", 32, Gender::Male, 5000.0),
        ("Jane Johnson", 28, Gender::Female, 6000.0),
        ("David Williams", 35, Gender::Male, 5500.0),
        ("Emily Brown", 23, Gender::Female, 4500.0),
        ("Michael Jones", 40, Gender::Male, 7000.0),
    ];
    let mut created = Vec::with_capacity(rows.len());
    for (name, age, gender, salary) in rows {
        let input = NewEmployee { name: name.to_string(), age, gender, salary, company_id: None };
        created.push(state.employees.create(input).await?);
    }
    Ok(created)
}

pub fn names(body: &serde_json::Value) -> Vec<String> {
    body.as_array()
        .map(|list| list.iter().filter_map(|e| e["name"].as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}
