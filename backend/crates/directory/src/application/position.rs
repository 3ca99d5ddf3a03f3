//! Position Use Cases

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{CompanyId, DepartmentId, PositionId};
use kernel::pagination::{Page, PageRequest};

use crate::application::config::{DeletePolicy, DirectoryConfig};
use crate::application::validation;
use crate::domain::entity::position::Position;
use crate::domain::repository::{
    CompanyRepository, DepartmentRepository, PositionFilter, PositionRepository,
};
use crate::error::{DirectoryError, DirectoryResult};

/// Position create / update input
pub struct PositionInput {
    pub name: String,
    pub company_id: String,
    pub department_id: String,
}

/// Raw search parameters; blank values count as absent
pub struct PositionSearch {
    pub company_id: Option<String>,
    pub department_id: Option<String>,
}

struct ValidPosition {
    name: String,
    company_id: CompanyId,
    department_id: DepartmentId,
}

/// Position use cases
pub struct PositionService<C, D, P>
where
    C: CompanyRepository,
    D: DepartmentRepository,
    P: PositionRepository,
{
    companies: Arc<C>,
    departments: Arc<D>,
    positions: Arc<P>,
    config: Arc<DirectoryConfig>,
}

impl<C, D, P> PositionService<C, D, P>
where
    C: CompanyRepository,
    D: DepartmentRepository,
    P: PositionRepository,
{
    pub fn new(
        companies: Arc<C>,
        departments: Arc<D>,
        positions: Arc<P>,
        config: Arc<DirectoryConfig>,
    ) -> Self {
        Self {
            companies,
            departments,
            positions,
            config,
        }
    }

    /// Field checks, then the company must exist and own the department
    async fn validate(&self, input: PositionInput) -> DirectoryResult<ValidPosition> {
        let name = validation::required_text("name", &input.name)?;
        let company_id = validation::required_ref("company_id", "Company", &input.company_id)?;
        let department_id =
            validation::required_ref("department_id", "Department", &input.department_id)?;

        if self.companies.find_by_id(&company_id).await?.is_none() {
            return Err(DirectoryError::Referential(validation::missing(
                "Company", company_id,
            )));
        }

        let department = self
            .departments
            .find_by_id(&department_id)
            .await?
            .ok_or_else(|| {
                DirectoryError::Referential(validation::missing("Department", department_id))
            })?;

        if department.company_id != company_id {
            return Err(DirectoryError::Referential(format!(
                "Department {department_id} does not belong to company {company_id}"
            )));
        }

        Ok(ValidPosition {
            name,
            company_id,
            department_id,
        })
    }

    pub async fn create(&self, input: PositionInput) -> DirectoryResult<Position> {
        let valid = self.validate(input).await?;

        let position = Position {
            id: PositionId::new(),
            company_id: valid.company_id,
            department_id: valid.department_id,
            name: valid.name,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.positions.create(&position).await?;

        tracing::info!(
            position_id = %position.id,
            company_id = %position.company_id,
            department_id = %position.department_id,
            "Position created"
        );

        Ok(position)
    }

    pub async fn get(&self, id: &PositionId) -> DirectoryResult<Position> {
        self.positions
            .find_by_id(id)
            .await?
            .ok_or(DirectoryError::not_found("Position"))
    }

    pub async fn update(&self, id: &PositionId, input: PositionInput) -> DirectoryResult<Position> {
        let mut position = self.get(id).await?;
        let valid = self.validate(input).await?;

        // Employees holding the position must stay in its company and department
        let moved = valid.company_id != position.company_id
            || valid.department_id != position.department_id;
        if moved
            && self.config.delete_policy == DeletePolicy::Restrict
            && self.positions.has_dependents(id).await?
        {
            return Err(DirectoryError::Conflict(format!(
                "Position {id} cannot move while it is held by employees"
            )));
        }

        position.name = valid.name;
        position.company_id = valid.company_id;
        position.department_id = valid.department_id;
        position.updated_at = Some(Utc::now());

        if !self.positions.update(&position).await? {
            return Err(DirectoryError::not_found("Position"));
        }

        tracing::info!(position_id = %position.id, "Position updated");

        Ok(position)
    }

    pub async fn delete(&self, id: &PositionId) -> DirectoryResult<()> {
        if self.config.delete_policy == DeletePolicy::Restrict
            && self.positions.find_by_id(id).await?.is_some()
            && self.positions.has_dependents(id).await?
        {
            return Err(DirectoryError::Conflict(format!(
                "Position {id} is still held by employees"
            )));
        }

        let rows_deleted = self.positions.delete(id).await?;
        tracing::info!(
            position_id = %id,
            rows_deleted,
            policy = %self.config.delete_policy,
            "Position deleted"
        );
        Ok(())
    }

    /// Positions by company and/or department (at least one required)
    pub async fn search(
        &self,
        search: PositionSearch,
        page: PageRequest,
    ) -> DirectoryResult<Page<Position>> {
        let company = validation::optional_text(search.company_id.as_deref());
        let department = validation::optional_text(search.department_id.as_deref());

        if company.is_none() && department.is_none() {
            return Err(DirectoryError::validation(
                "company_id",
                "company_id or department_id is required",
            ));
        }

        // A filter value that is not an id matches nothing
        let (Ok(company_id), Ok(department_id)) = (
            company.map(|raw| raw.parse::<CompanyId>()).transpose(),
            department.map(|raw| raw.parse::<DepartmentId>()).transpose(),
        ) else {
            return Ok(Page::new(Vec::new(), page, 0));
        };

        let filter = PositionFilter {
            company_id,
            department_id,
        };
        let positions = self.positions.search(&filter, page).await?;
        let total = self.positions.count(&filter).await?;
        Ok(Page::new(positions, page, total))
    }
}
