use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
    Unchanged,
};

use models::{company, employee};

use super::domain::{Company, CompanyEmployee};
use crate::employee::Employee;
use crate::errors::ServiceError;
use crate::pagination::PageRequest;

/// Persistence boundary for companies and their employee links.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Company>, ServiceError>;
    async fn find_page(&self, page: PageRequest) -> Result<Vec<Company>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Company>, ServiceError>;
    /// Employees linked to `company_id`; empty for an unknown company.
    async fn find_employees(&self, company_id: i32) -> Result<Vec<Employee>, ServiceError>;
    async fn insert(&self, name: &str, employees: &[CompanyEmployee]) -> Result<Company, ServiceError>;
    /// Rename the company and, when `employees` is given, replace its list.
    async fn save(&self, id: i32, name: &str, employees: Option<&[CompanyEmployee]>) -> Result<Company, ServiceError>;
    /// Detach the company's employees and delete it. Returns true if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCompanyRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCompanyRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn with_employees(&self, companies: Vec<company::Model>) -> Result<Vec<Company>, ServiceError> {
        let employees = companies
            .load_many(employee::Entity::find().order_by_asc(employee::Column::Id), &self.db)
            .await?;
        Ok(companies
            .into_iter()
            .zip(employees)
            .map(|(c, es)| Company::from_parts(c, es))
            .collect())
    }
}

async fn employees_of<C: ConnectionTrait>(db: &C, company_id: i32) -> Result<Vec<employee::Model>, ServiceError> {
    let rows = employee::Entity::find()
        .filter(employee::Column::CompanyId.eq(company_id))
        .order_by_asc(employee::Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

/// Make `entries` the complete employee list of `company_id`.
/// Listed ids are overwritten and linked, entries without id are inserted,
/// and previously linked employees that are not listed get detached.
async fn replace_employees<C: ConnectionTrait>(
    db: &C,
    company_id: i32,
    entries: &[CompanyEmployee],
) -> Result<Vec<employee::Model>, ServiceError> {
    let mut kept = Vec::with_capacity(entries.len());
    for entry in entries {
        let model = match entry.id {
            Some(id) => {
                let mut am: employee::ActiveModel = employee::Entity::find_by_id(id)
                    .one(db)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound(format!("employee {id} not found")))?
                    .into();
                am.name = Set(entry.name.clone());
                am.age = Set(entry.age);
                am.gender = Set(entry.gender);
                am.salary = Set(entry.salary);
                am.company_id = Set(Some(company_id));
                am.update(db).await?
            }
            None => {
                employee::create(db, &entry.name, entry.age, entry.gender, entry.salary, Some(company_id)).await?
            }
        };
        kept.push(model);
    }

    let kept_ids: Vec<i32> = kept.iter().map(|e| e.id).collect();
    let mut detach = employee::Entity::update_many()
        .col_expr(employee::Column::CompanyId, Expr::value(Option::<i32>::None))
        .filter(employee::Column::CompanyId.eq(company_id));
    if !kept_ids.is_empty() {
        detach = detach.filter(employee::Column::Id.is_not_in(kept_ids));
    }
    detach.exec(db).await?;

    kept.sort_by_key(|e| e.id);
    Ok(kept)
}

#[async_trait]
impl CompanyRepository for SeaOrmCompanyRepository {
    async fn find_all(&self) -> Result<Vec<Company>, ServiceError> {
        let companies = company::Entity::find()
            .order_by_asc(company::Column::Id)
            .all(&self.db)
            .await?;
        self.with_employees(companies).await
    }

    async fn find_page(&self, page: PageRequest) -> Result<Vec<Company>, ServiceError> {
        let companies = company::Entity::find()
            .order_by_asc(company::Column::Id)
            .offset(page.offset())
            .limit(page.page_size)
            .all(&self.db)
            .await?;
        self.with_employees(companies).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Company>, ServiceError> {
        let Some(found) = company::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let employees = employees_of(&self.db, found.id).await?;
        Ok(Some(Company::from_parts(found, employees)))
    }

    async fn find_employees(&self, company_id: i32) -> Result<Vec<Employee>, ServiceError> {
        let rows = employees_of(&self.db, company_id).await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn insert(&self, name: &str, employees: &[CompanyEmployee]) -> Result<Company, ServiceError> {
        let txn = self.db.begin().await?;
        let created = company::create(&txn, name).await?;
        let linked = replace_employees(&txn, created.id, employees).await?;
        txn.commit().await?;
        Ok(Company::from_parts(created, linked))
    }

    async fn save(&self, id: i32, name: &str, employees: Option<&[CompanyEmployee]>) -> Result<Company, ServiceError> {
        let txn = self.db.begin().await?;
        let am = company::ActiveModel { id: Unchanged(id), name: Set(name.to_string()) };
        let updated = company::Entity::update(am).exec(&txn).await?;
        let linked = match employees {
            Some(entries) => replace_employees(&txn, id, entries).await?,
            None => employees_of(&txn, id).await?,
        };
        txn.commit().await?;
        Ok(Company::from_parts(updated, linked))
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        employee::Entity::update_many()
            .col_expr(employee::Column::CompanyId, Expr::value(Option::<i32>::None))
            .filter(employee::Column::CompanyId.eq(id))
            .exec(&txn)
            .await?;
        let res = company::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(company::Entity::find().count(&self.db).await?)
    }
}
