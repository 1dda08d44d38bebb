use std::sync::Arc;

use common::metrics::record_operation;
use tracing::{debug, info, instrument};

use super::domain::{Employee, EmployeePatch, Gender, NewEmployee};
use super::repository::EmployeeRepository;
use crate::errors::ServiceError;
use crate::pagination::PageRequest;

const ENTITY: &str = "employee";

/// Employee business rules: pagination, partial-update merging, validation.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: Arc<R>,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn find_all(&self) -> Result<Vec<Employee>, ServiceError> {
        record_operation(ENTITY, "find_all");
        self.repo.find_all().await
    }

    /// `page_index` is 1-based.
    pub async fn find_page(&self, page_index: i64, page_size: i64) -> Result<Vec<Employee>, ServiceError> {
        let page = PageRequest::from_one_based(page_index, page_size)?;
        self.page(None, page).await
    }

    pub async fn find_by_gender(&self, gender: Gender) -> Result<Vec<Employee>, ServiceError> {
        record_operation(ENTITY, "find_by_gender");
        self.repo.find_by_gender(gender).await
    }

    /// Gender filter first, then pagination over the filtered set.
    pub async fn find_by_gender_page(
        &self,
        gender: Gender,
        page_index: i64,
        page_size: i64,
    ) -> Result<Vec<Employee>, ServiceError> {
        let page = PageRequest::from_one_based(page_index, page_size)?;
        self.page(Some(gender), page).await
    }

    /// Page with an already-normalized request.
    pub async fn page(&self, gender: Option<Gender>, page: PageRequest) -> Result<Vec<Employee>, ServiceError> {
        record_operation(ENTITY, "find_page");
        debug!(?gender, page_index = page.page_index, page_size = page.page_size, "employee page");
        self.repo.find_page(gender, page).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, ServiceError> {
        record_operation(ENTITY, "find_by_id");
        self.repo.find_by_id(id).await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewEmployee) -> Result<Employee, ServiceError> {
        models::employee::validate(&input.name, input.age, input.salary)?;
        if let Some(company_id) = input.company_id {
            self.ensure_company(company_id).await?;
        }
        let created = self.repo.insert(&input).await?;
        record_operation(ENTITY, "create");
        info!(id = created.id, "employee_created");
        Ok(created)
    }

    /// Merge `patch` over the stored record and persist it.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i32, patch: EmployeePatch) -> Result<Employee, ServiceError> {
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY))?;
        if patch.is_empty() {
            debug!("empty patch; nothing to persist");
            return Ok(current);
        }
        let previous_company = current.company_id;
        let merged = patch.apply(current);
        models::employee::validate(&merged.name, merged.age, merged.salary)?;
        if let Some(company_id) = merged.company_id.filter(|c| Some(*c) != previous_company) {
            self.ensure_company(company_id).await?;
        }
        let updated = self.repo.save(&merged).await?;
        record_operation(ENTITY, "update");
        info!(id = updated.id, "employee_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found(ENTITY));
        }
        record_operation(ENTITY, "delete");
        info!(id, "employee_deleted");
        Ok(())
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        self.repo.count().await
    }

    async fn ensure_company(&self, company_id: i32) -> Result<(), ServiceError> {
        if self.repo.company_exists(company_id).await? {
            Ok(())
        } else {
            Err(ServiceError::Validation(format!("company {company_id} does not exist")))
        }
    }
}
