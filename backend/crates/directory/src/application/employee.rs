//! Employee Use Cases

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use kernel::email::Email;
use kernel::id::{CompanyId, DepartmentId, EmployeeId, PositionId};
use kernel::pagination::{Page, PageRequest};

use crate::application::validation;
use crate::domain::entity::employee::Employee;
use crate::domain::repository::{
    CompanyRepository, DepartmentRepository, EmployeeRepository, PositionRepository,
};
use crate::error::{DirectoryError, DirectoryResult};

/// Employee create / update input (all fields replaced)
pub struct EmployeeInput {
    pub name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub id_type: String,
    pub id_number: String,
    pub admission_date: Option<String>,
    pub salary: Option<f64>,
    pub company_id: String,
    pub department_id: Option<String>,
    pub position_id: Option<String>,
    pub picture_url: Option<String>,
}

struct ValidEmployee {
    name: String,
    last_name: String,
    phone_number: String,
    email: Email,
    id_type: String,
    id_number: String,
    admission_date: NaiveDate,
    salary: f64,
    company_id: CompanyId,
    department_id: Option<DepartmentId>,
    position_id: Option<PositionId>,
    picture_url: Option<String>,
}

impl EmployeeInput {
    fn validate_fields(self) -> DirectoryResult<ValidEmployee> {
        Ok(ValidEmployee {
            name: validation::required_text("name", &self.name)?,
            last_name: validation::required_text("last_name", &self.last_name)?,
            phone_number: validation::required_text("phone_number", &self.phone_number)?,
            email: validation::email("email", &self.email)?,
            id_type: validation::required_text("id_type", &self.id_type)?,
            id_number: validation::required_text("id_number", &self.id_number)?,
            admission_date: validation::date("admission_date", self.admission_date.as_deref())?,
            salary: validation::salary("salary", self.salary)?,
            company_id: validation::required_ref("company_id", "Company", &self.company_id)?,
            department_id: validation::optional_ref("Department", self.department_id.as_deref())?,
            position_id: validation::optional_ref("Position", self.position_id.as_deref())?,
            picture_url: validation::optional_text(self.picture_url.as_deref()),
        })
    }
}

/// Employee use cases
pub struct EmployeeService<C, D, P, E>
where
    C: CompanyRepository,
    D: DepartmentRepository,
    P: PositionRepository,
    E: EmployeeRepository,
{
    companies: Arc<C>,
    departments: Arc<D>,
    positions: Arc<P>,
    employees: Arc<E>,
}

impl<C, D, P, E> EmployeeService<C, D, P, E>
where
    C: CompanyRepository,
    D: DepartmentRepository,
    P: PositionRepository,
    E: EmployeeRepository,
{
    pub fn new(companies: Arc<C>, departments: Arc<D>, positions: Arc<P>, employees: Arc<E>) -> Self {
        Self {
            companies,
            departments,
            positions,
            employees,
        }
    }

    /// Field checks, then every referenced parent must exist inside the
    /// employee's company, and a given position must sit in the given department
    async fn validate(&self, input: EmployeeInput) -> DirectoryResult<ValidEmployee> {
        let valid = input.validate_fields()?;
        let company_id = valid.company_id;

        if self.companies.find_by_id(&company_id).await?.is_none() {
            return Err(DirectoryError::Referential(validation::missing(
                "Company", company_id,
            )));
        }

        if let Some(department_id) = valid.department_id {
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
        }

        if let Some(position_id) = valid.position_id {
            let position = self
                .positions
                .find_by_id(&position_id)
                .await?
                .ok_or_else(|| {
                    DirectoryError::Referential(validation::missing("Position", position_id))
                })?;
            if position.company_id != company_id {
                return Err(DirectoryError::Referential(format!(
                    "Position {position_id} does not belong to company {company_id}"
                )));
            }
            if let Some(department_id) = valid.department_id {
                if position.department_id != department_id {
                    return Err(DirectoryError::Referential(format!(
                        "Position {position_id} does not belong to department {department_id}"
                    )));
                }
            }
        }

        Ok(valid)
    }

    pub async fn create(&self, input: EmployeeInput) -> DirectoryResult<Employee> {
        let valid = self.validate(input).await?;

        let employee = Employee {
            id: EmployeeId::new(),
            company_id: valid.company_id,
            department_id: valid.department_id,
            position_id: valid.position_id,
            name: valid.name,
            last_name: valid.last_name,
            phone_number: valid.phone_number,
            email: valid.email,
            id_type: valid.id_type,
            id_number: valid.id_number,
            admission_date: valid.admission_date,
            salary: valid.salary,
            picture_url: valid.picture_url,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.employees.create(&employee).await?;

        tracing::info!(
            employee_id = %employee.id,
            company_id = %employee.company_id,
            "Employee created"
        );

        Ok(employee)
    }

    pub async fn get(&self, id: &EmployeeId) -> DirectoryResult<Employee> {
        self.employees
            .find_by_id(id)
            .await?
            .ok_or(DirectoryError::not_found("Employee"))
    }

    pub async fn update(&self, id: &EmployeeId, input: EmployeeInput) -> DirectoryResult<Employee> {
        let mut employee = self.get(id).await?;
        let valid = self.validate(input).await?;

        employee.company_id = valid.company_id;
        employee.department_id = valid.department_id;
        employee.position_id = valid.position_id;
        employee.name = valid.name;
        employee.last_name = valid.last_name;
        employee.phone_number = valid.phone_number;
        employee.email = valid.email;
        employee.id_type = valid.id_type;
        employee.id_number = valid.id_number;
        employee.admission_date = valid.admission_date;
        employee.salary = valid.salary;
        employee.picture_url = valid.picture_url;
        employee.updated_at = Some(Utc::now());

        if !self.employees.update(&employee).await? {
            return Err(DirectoryError::not_found("Employee"));
        }

        tracing::info!(employee_id = %employee.id, "Employee updated");

        Ok(employee)
    }

    pub async fn delete(&self, id: &EmployeeId) -> DirectoryResult<()> {
        let rows_deleted = self.employees.delete(id).await?;
        tracing::info!(employee_id = %id, rows_deleted, "Employee deleted");
        Ok(())
    }

    /// Employees of a company (`company_id` required)
    pub async fn list_by_company(
        &self,
        company_id: Option<&str>,
        page: PageRequest,
    ) -> DirectoryResult<Page<Employee>> {
        let raw = validation::optional_text(company_id)
            .ok_or_else(|| DirectoryError::validation("company_id", "is required"))?;

        let Ok(company_id) = raw.parse::<CompanyId>() else {
            return Ok(Page::new(Vec::new(), page, 0));
        };

        let employees = self.employees.list_by_company(&company_id, page).await?;
        let total = self.employees.count_by_company(&company_id).await?;
        Ok(Page::new(employees, page, total))
    }
}
