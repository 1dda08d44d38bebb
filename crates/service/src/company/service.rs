use std::collections::HashSet;
use std::sync::Arc;

use common::metrics::record_operation;
use tracing::{info, instrument};

use super::domain::{Company, CompanyEmployee, CompanyPatch, NewCompany};
use super::repository::CompanyRepository;
use crate::employee::Employee;
use crate::errors::ServiceError;
use crate::pagination::PageRequest;

const ENTITY: &str = "company";

/// Company business rules. Lookups return `Option`/`Vec`; writes against a
/// missing company fail with `NotFound`.
pub struct CompanyService<R: CompanyRepository> {
    repo: Arc<R>,
}

impl<R: CompanyRepository> CompanyService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn find_all(&self) -> Result<Vec<Company>, ServiceError> {
        record_operation(ENTITY, "find_all");
        self.repo.find_all().await
    }

    /// `page_index` is 1-based.
    pub async fn find_page(&self, page_index: i64, page_size: i64) -> Result<Vec<Company>, ServiceError> {
        let page = PageRequest::from_one_based(page_index, page_size)?;
        self.page(page).await
    }

    pub async fn page(&self, page: PageRequest) -> Result<Vec<Company>, ServiceError> {
        record_operation(ENTITY, "find_page");
        self.repo.find_page(page).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Company>, ServiceError> {
        record_operation(ENTITY, "find_by_id");
        self.repo.find_by_id(id).await
    }

    /// Employees of a company. An unknown company yields an empty list,
    /// never an error.
    pub async fn get_employees_by_company_id(&self, id: i32) -> Result<Vec<Employee>, ServiceError> {
        record_operation(ENTITY, "employees");
        self.repo.find_employees(id).await
    }

    #[instrument(skip(self, input), fields(name = %input.name, employees = input.employees.len()))]
    pub async fn create(&self, input: NewCompany) -> Result<Company, ServiceError> {
        models::company::validate_name(&input.name)?;
        validate_employees(&input.employees)?;
        if let Some(id) = input.employees.iter().find_map(|e| e.id) {
            return Err(ServiceError::Validation(format!(
                "employee {id}: a new company only takes new employees; link existing ones with an update"
            )));
        }
        let created = self.repo.insert(&input.name, &input.employees).await?;
        record_operation(ENTITY, "create");
        info!(id = created.id, "company_created");
        Ok(created)
    }

    /// Resolve `name` and `employees` against the stored company and persist
    /// the result; absent fields keep their stored value.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i32, patch: CompanyPatch) -> Result<Company, ServiceError> {
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY))?;
        let name = patch.name.unwrap_or(current.name);
        models::company::validate_name(&name)?;
        if let Some(entries) = &patch.employees {
            validate_employees(entries)?;
        }
        let updated = self.repo.save(id, &name, patch.employees.as_deref()).await?;
        record_operation(ENTITY, "update");
        info!(id, employees = updated.employees.len(), "company_updated");
        Ok(updated)
    }

    /// Delete the company; its employees are kept and detached.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found(ENTITY));
        }
        record_operation(ENTITY, "delete");
        info!(id, "company_deleted");
        Ok(())
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        self.repo.count().await
    }
}

fn validate_employees(entries: &[CompanyEmployee]) -> Result<(), ServiceError> {
    let mut seen = HashSet::new();
    for entry in entries {
        models::employee::validate(&entry.name, entry.age, entry.salary)?;
        if let Some(id) = entry.id {
            if !seen.insert(id) {
                return Err(ServiceError::Validation(format!("employee {id} listed twice")));
            }
        }
    }
    Ok(())
}
