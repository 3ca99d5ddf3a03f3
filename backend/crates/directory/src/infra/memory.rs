//! In-memory repository for tests

use std::sync::{Arc, Mutex};

use kernel::id::{CompanyId, DepartmentId, EmployeeId, PositionId};
use kernel::pagination::PageRequest;

use crate::domain::entity::{
    company::Company, department::Department, employee::Employee, position::Position,
};
use crate::domain::repository::{
    CompanyRepository, DepartmentRepository, EmployeeRepository, PositionFilter,
    PositionRepository,
};
use crate::error::DirectoryResult;

#[derive(Clone, Default)]
pub struct MemoryDirectoryRepository {
    companies: Arc<Mutex<Vec<Company>>>,
    departments: Arc<Mutex<Vec<Department>>>,
    positions: Arc<Mutex<Vec<Position>>>,
    employees: Arc<Mutex<Vec<Employee>>>,
}

impl MemoryDirectoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn company_count(&self) -> usize {
        self.companies.lock().unwrap().len()
    }

    pub fn department_count(&self) -> usize {
        self.departments.lock().unwrap().len()
    }

    pub fn position_count(&self) -> usize {
        self.positions.lock().unwrap().len()
    }

    pub fn employee_count(&self) -> usize {
        self.employees.lock().unwrap().len()
    }
}

/// `(created_at, id)` order, then the requested window
fn page_of<T: Clone>(
    rows: &[T],
    key: impl Fn(&T) -> (chrono::DateTime<chrono::Utc>, uuid::Uuid),
    page: PageRequest,
) -> Vec<T> {
    let mut rows = rows.to_vec();
    rows.sort_by_key(key);
    rows.into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect()
}

fn replace<T: Clone>(rows: &mut [T], row: &T, same: impl Fn(&T) -> bool) -> bool {
    match rows.iter_mut().find(|stored| same(stored)) {
        Some(stored) => {
            *stored = row.clone();
            true
        }
        None => false,
    }
}

fn remove<T>(rows: &mut Vec<T>, same: impl Fn(&T) -> bool) -> u64 {
    let before = rows.len();
    rows.retain(|row| !same(row));
    (before - rows.len()) as u64
}

impl CompanyRepository for MemoryDirectoryRepository {
    async fn create(&self, company: &Company) -> DirectoryResult<()> {
        self.companies.lock().unwrap().push(company.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CompanyId) -> DirectoryResult<Option<Company>> {
        let companies = self.companies.lock().unwrap();
        Ok(companies.iter().find(|c| c.id == *id).cloned())
    }

    async fn update(&self, company: &Company) -> DirectoryResult<bool> {
        let mut companies = self.companies.lock().unwrap();
        Ok(replace(&mut companies, company, |c| c.id == company.id))
    }

    async fn delete(&self, id: &CompanyId) -> DirectoryResult<u64> {
        Ok(remove(&mut self.companies.lock().unwrap(), |c| c.id == *id))
    }

    async fn has_dependents(&self, id: &CompanyId) -> DirectoryResult<bool> {
        Ok(self.departments.lock().unwrap().iter().any(|d| d.company_id == *id)
            || self.positions.lock().unwrap().iter().any(|p| p.company_id == *id)
            || self.employees.lock().unwrap().iter().any(|e| e.company_id == *id))
    }
}

impl DepartmentRepository for MemoryDirectoryRepository {
    async fn create(&self, department: &Department) -> DirectoryResult<()> {
        self.departments.lock().unwrap().push(department.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &DepartmentId) -> DirectoryResult<Option<Department>> {
        let departments = self.departments.lock().unwrap();
        Ok(departments.iter().find(|d| d.id == *id).cloned())
    }

    async fn update(&self, department: &Department) -> DirectoryResult<bool> {
        let mut departments = self.departments.lock().unwrap();
        Ok(replace(&mut departments, department, |d| d.id == department.id))
    }

    async fn delete(&self, id: &DepartmentId) -> DirectoryResult<u64> {
        Ok(remove(&mut self.departments.lock().unwrap(), |d| d.id == *id))
    }

    async fn list_by_company(
        &self,
        company_id: &CompanyId,
        page: PageRequest,
    ) -> DirectoryResult<Vec<Department>> {
        let departments: Vec<Department> = self
            .departments
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.company_id == *company_id)
            .cloned()
            .collect();
        Ok(page_of(&departments, |d| (d.created_at, d.id.into_uuid()), page))
    }

    async fn count_by_company(&self, company_id: &CompanyId) -> DirectoryResult<i64> {
        let departments = self.departments.lock().unwrap();
        Ok(departments.iter().filter(|d| d.company_id == *company_id).count() as i64)
    }

    async fn has_dependents(&self, id: &DepartmentId) -> DirectoryResult<bool> {
        Ok(self.positions.lock().unwrap().iter().any(|p| p.department_id == *id)
            || self
                .employees
                .lock()
                .unwrap()
                .iter()
                .any(|e| e.department_id == Some(*id)))
    }
}

fn matches(filter: &PositionFilter, position: &Position) -> bool {
    filter.company_id.is_none_or(|id| position.company_id == id)
        && filter.department_id.is_none_or(|id| position.department_id == id)
}

impl PositionRepository for MemoryDirectoryRepository {
    async fn create(&self, position: &Position) -> DirectoryResult<()> {
        self.positions.lock().unwrap().push(position.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PositionId) -> DirectoryResult<Option<Position>> {
        let positions = self.positions.lock().unwrap();
        Ok(positions.iter().find(|p| p.id == *id).cloned())
    }

    async fn update(&self, position: &Position) -> DirectoryResult<bool> {
        let mut positions = self.positions.lock().unwrap();
        Ok(replace(&mut positions, position, |p| p.id == position.id))
    }

    async fn delete(&self, id: &PositionId) -> DirectoryResult<u64> {
        Ok(remove(&mut self.positions.lock().unwrap(), |p| p.id == *id))
    }

    async fn search(
        &self,
        filter: &PositionFilter,
        page: PageRequest,
    ) -> DirectoryResult<Vec<Position>> {
        let positions: Vec<Position> = self
            .positions
            .lock()
            .unwrap()
            .iter()
            .filter(|p| matches(filter, p))
            .cloned()
            .collect();
        Ok(page_of(&positions, |p| (p.created_at, p.id.into_uuid()), page))
    }

    async fn count(&self, filter: &PositionFilter) -> DirectoryResult<i64> {
        let positions = self.positions.lock().unwrap();
        Ok(positions.iter().filter(|p| matches(filter, p)).count() as i64)
    }

    async fn has_dependents(&self, id: &PositionId) -> DirectoryResult<bool> {
        let employees = self.employees.lock().unwrap();
        Ok(employees.iter().any(|e| e.position_id == Some(*id)))
    }
}

impl EmployeeRepository for MemoryDirectoryRepository {
    async fn create(&self, employee: &Employee) -> DirectoryResult<()> {
        self.employees.lock().unwrap().push(employee.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &EmployeeId) -> DirectoryResult<Option<Employee>> {
        let employees = self.employees.lock().unwrap();
        Ok(employees.iter().find(|e| e.id == *id).cloned())
    }

    async fn update(&self, employee: &Employee) -> DirectoryResult<bool> {
        let mut employees = self.employees.lock().unwrap();
        Ok(replace(&mut employees, employee, |e| e.id == employee.id))
    }

    async fn delete(&self, id: &EmployeeId) -> DirectoryResult<u64> {
        Ok(remove(&mut self.employees.lock().unwrap(), |e| e.id == *id))
    }

    async fn list_by_company(
        &self,
        company_id: &CompanyId,
        page: PageRequest,
    ) -> DirectoryResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .employees
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.company_id == *company_id)
            .cloned()
            .collect();
        Ok(page_of(&employees, |e| (e.created_at, e.id.into_uuid()), page))
    }

    async fn count_by_company(&self, company_id: &CompanyId) -> DirectoryResult<i64> {
        let employees = self.employees.lock().unwrap();
        Ok(employees.iter().filter(|e| e.company_id == *company_id).count() as i64)
    }
}
