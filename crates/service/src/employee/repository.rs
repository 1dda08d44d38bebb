use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    Unchanged,
};

use models::{company, employee};

use super::domain::{Employee, Gender, NewEmployee};
use crate::errors::ServiceError;
use crate::pagination::PageRequest;

/// Persistence boundary for employees. Results come back in store order
/// (ascending id).
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Employee>, ServiceError>;
    /// One page of employees, optionally restricted to a gender.
    async fn find_page(&self, gender: Option<Gender>, page: PageRequest) -> Result<Vec<Employee>, ServiceError>;
    async fn find_by_gender(&self, gender: Gender) -> Result<Vec<Employee>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, ServiceError>;
    async fn insert(&self, input: &NewEmployee) -> Result<Employee, ServiceError>;
    /// Overwrite every mutable column of an existing row.
    async fn save(&self, employee: &Employee) -> Result<Employee, ServiceError>;
    /// Returns true if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
    async fn company_exists(&self, company_id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmEmployeeRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn find_all(&self) -> Result<Vec<Employee>, ServiceError> {
        let rows = employee::Entity::find()
            .order_by_asc(employee::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn find_page(&self, gender: Option<Gender>, page: PageRequest) -> Result<Vec<Employee>, ServiceError> {
        let mut finder = employee::Entity::find();
        if let Some(g) = gender { finder = finder.filter(employee::Column::Gender.eq(g)); }
        let rows = finder
            .order_by_asc(employee::Column::Id)
            .offset(page.offset())
            .limit(page.page_size)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn find_by_gender(&self, gender: Gender) -> Result<Vec<Employee>, ServiceError> {
        let rows = employee::Entity::find()
            .filter(employee::Column::Gender.eq(gender))
            .order_by_asc(employee::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, ServiceError> {
        let found = employee::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(Employee::from))
    }

    async fn insert(&self, input: &NewEmployee) -> Result<Employee, ServiceError> {
        let created = employee::create(
            &self.db,
            &input.name,
            input.age,
            input.gender,
            input.salary,
            input.company_id,
        )
        .await?;
        Ok(created.into())
    }

    async fn save(&self, e: &Employee) -> Result<Employee, ServiceError> {
        let am = employee::ActiveModel {
            id: Unchanged(e.id),
            name: Set(e.name.clone()),
            age: Set(e.age),
            gender: Set(e.gender),
            salary: Set(e.salary),
            company_id: Set(e.company_id),
        };
        let updated = employee::Entity::update(am).exec(&self.db).await?;
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = employee::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(employee::Entity::find().count(&self.db).await?)
    }

    async fn company_exists(&self, company_id: i32) -> Result<bool, ServiceError> {
        let found = company::Entity::find_by_id(company_id).one(&self.db).await?;
        Ok(found.is_some())
    }
}
