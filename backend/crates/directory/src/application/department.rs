//! Department Use Cases

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{CompanyId, DepartmentId};
use kernel::pagination::{Page, PageRequest};

use crate::application::config::{DeletePolicy, DirectoryConfig};
use crate::application::validation;
use crate::domain::entity::department::Department;
use crate::domain::repository::{CompanyRepository, DepartmentRepository};
use crate::error::{DirectoryError, DirectoryResult};

/// Department create / update input
pub struct DepartmentInput {
    pub name: String,
    pub company_id: String,
}

/// Department use cases
pub struct DepartmentService<C, D>
where
    C: CompanyRepository,
    D: DepartmentRepository,
{
    companies: Arc<C>,
    departments: Arc<D>,
    config: Arc<DirectoryConfig>,
}

impl<C, D> DepartmentService<C, D>
where
    C: CompanyRepository,
    D: DepartmentRepository,
{
    pub fn new(companies: Arc<C>, departments: Arc<D>, config: Arc<DirectoryConfig>) -> Self {
        Self {
            companies,
            departments,
            config,
        }
    }

    /// Field checks, then the company must exist
    async fn validate(&self, input: DepartmentInput) -> DirectoryResult<(String, CompanyId)> {
        let name = validation::required_text("name", &input.name)?;
        let company_id = validation::required_ref("company_id", "Company", &input.company_id)?;

        if self.companies.find_by_id(&company_id).await?.is_none() {
            return Err(DirectoryError::Referential(validation::missing(
                "Company", company_id,
            )));
        }

        Ok((name, company_id))
    }

    pub async fn create(&self, input: DepartmentInput) -> DirectoryResult<Department> {
        let (name, company_id) = self.validate(input).await?;

        let department = Department {
            id: DepartmentId::new(),
            company_id,
            name,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.departments.create(&department).await?;

        tracing::info!(
            department_id = %department.id,
            company_id = %department.company_id,
            "Department created"
        );

        Ok(department)
    }

    pub async fn get(&self, id: &DepartmentId) -> DirectoryResult<Department> {
        self.departments
            .find_by_id(id)
            .await?
            .ok_or(DirectoryError::not_found("Department"))
    }

    pub async fn update(
        &self,
        id: &DepartmentId,
        input: DepartmentInput,
    ) -> DirectoryResult<Department> {
        let mut department = self.get(id).await?;
        let (name, company_id) = self.validate(input).await?;

        // Positions and employees carry the company id too
        if company_id != department.company_id
            && self.config.delete_policy == DeletePolicy::Restrict
            && self.departments.has_dependents(id).await?
        {
            return Err(DirectoryError::Conflict(format!(
                "Department {id} cannot move to another company while it has positions or employees"
            )));
        }

        department.name = name;
        department.company_id = company_id;
        department.updated_at = Some(Utc::now());

        if !self.departments.update(&department).await? {
            return Err(DirectoryError::not_found("Department"));
        }

        tracing::info!(department_id = %department.id, "Department updated");

        Ok(department)
    }

    pub async fn delete(&self, id: &DepartmentId) -> DirectoryResult<()> {
        if self.config.delete_policy == DeletePolicy::Restrict
            && self.departments.find_by_id(id).await?.is_some()
            && self.departments.has_dependents(id).await?
        {
            return Err(DirectoryError::Conflict(format!(
                "Department {id} still has positions or employees"
            )));
        }

        let rows_deleted = self.departments.delete(id).await?;
        tracing::info!(
            department_id = %id,
            rows_deleted,
            policy = %self.config.delete_policy,
            "Department deleted"
        );
        Ok(())
    }

    /// Departments of a company. An unknown company yields an empty page.
    pub async fn list_by_company(
        &self,
        company_id: &CompanyId,
        page: PageRequest,
    ) -> DirectoryResult<Page<Department>> {
        let departments = self.departments.list_by_company(company_id, page).await?;
        let total = self.departments.count_by_company(company_id).await?;
        Ok(Page::new(departments, page, total))
    }
}
