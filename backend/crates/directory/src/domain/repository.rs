//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Listing methods come in pairs (`list_*` / `count_*`) executed as separate
//! statements, so a concurrent write can make the count disagree with the page.

use kernel::id::{CompanyId, DepartmentId, EmployeeId, PositionId};
use kernel::pagination::PageRequest;

use crate::domain::entity::{
    company::Company, department::Department, employee::Employee, position::Position,
};
use crate::error::DirectoryResult;

/// Company repository trait
#[trait_variant::make(CompanyRepository: Send)]
pub trait LocalCompanyRepository {
    async fn create(&self, company: &Company) -> DirectoryResult<()>;

    async fn find_by_id(&self, id: &CompanyId) -> DirectoryResult<Option<Company>>;

    /// Overwrite mutable fields. Returns `false` if no row matched.
    async fn update(&self, company: &Company) -> DirectoryResult<bool>;

    /// Returns the number of rows removed
    async fn delete(&self, id: &CompanyId) -> DirectoryResult<u64>;

    /// Any department, position or employee still pointing at this company
    async fn has_dependents(&self, id: &CompanyId) -> DirectoryResult<bool>;
}

/// Department repository trait
#[trait_variant::make(DepartmentRepository: Send)]
pub trait LocalDepartmentRepository {
    async fn create(&self, department: &Department) -> DirectoryResult<()>;

    async fn find_by_id(&self, id: &DepartmentId) -> DirectoryResult<Option<Department>>;

    async fn update(&self, department: &Department) -> DirectoryResult<bool>;

    async fn delete(&self, id: &DepartmentId) -> DirectoryResult<u64>;

    /// Departments of a company ordered by `(created_at, id)`
    async fn list_by_company(
        &self,
        company_id: &CompanyId,
        page: PageRequest,
    ) -> DirectoryResult<Vec<Department>>;

    async fn count_by_company(&self, company_id: &CompanyId) -> DirectoryResult<i64>;

    /// Any position or employee still pointing at this department
    async fn has_dependents(&self, id: &DepartmentId) -> DirectoryResult<bool>;
}

/// Position search criteria; at least one field is set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionFilter {
    pub company_id: Option<CompanyId>,
    pub department_id: Option<DepartmentId>,
}

/// Position repository trait
#[trait_variant::make(PositionRepository: Send)]
pub trait LocalPositionRepository {
    async fn create(&self, position: &Position) -> DirectoryResult<()>;

    async fn find_by_id(&self, id: &PositionId) -> DirectoryResult<Option<Position>>;

    async fn update(&self, position: &Position) -> DirectoryResult<bool>;

    async fn delete(&self, id: &PositionId) -> DirectoryResult<u64>;

    /// Positions matching every set field of the filter, ordered by `(created_at, id)`
    async fn search(
        &self,
        filter: &PositionFilter,
        page: PageRequest,
    ) -> DirectoryResult<Vec<Position>>;

    async fn count(&self, filter: &PositionFilter) -> DirectoryResult<i64>;

    /// Any employee still holding this position
    async fn has_dependents(&self, id: &PositionId) -> DirectoryResult<bool>;
}

/// Employee repository trait
#[trait_variant::make(EmployeeRepository: Send)]
pub trait LocalEmployeeRepository {
    async fn create(&self, employee: &Employee) -> DirectoryResult<()>;

    async fn find_by_id(&self, id: &EmployeeId) -> DirectoryResult<Option<Employee>>;

    async fn update(&self, employee: &Employee) -> DirectoryResult<bool>;

    async fn delete(&self, id: &EmployeeId) -> DirectoryResult<u64>;

    /// Employees of a company ordered by `(created_at, id)`
    async fn list_by_company(
        &self,
        company_id: &CompanyId,
        page: PageRequest,
    ) -> DirectoryResult<Vec<Employee>>;

    async fn count_by_company(&self, company_id: &CompanyId) -> DirectoryResult<i64>;
}
