//! API DTOs (Data Transfer Objects)
//!
//! Request bodies default missing strings to empty so that validation can
//! name the field. Responses use snake_case field names.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::pagination::{PageQuery, PageRequest};
use serde::{Deserialize, Serialize};

use crate::application::{
    CompanyInput, DepartmentInput, EmployeeInput, PositionInput, PositionSearch,
};
use crate::domain::entity::{
    company::Company, department::Department, employee::Employee, position::Position,
};

// ============================================================================
// Companies
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CompanyRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl From<CompanyRequest> for CompanyInput {
    fn from(req: CompanyRequest) -> Self {
        Self {
            name: req.name,
            address: req.address,
            phone: req.phone,
            email: req.email,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyResponse {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id.to_string(),
            owner_id: company.owner_id.to_string(),
            name: company.name,
            address: company.address,
            phone: company.phone,
            email: company.email.into_inner(),
            created_at: company.created_at,
            updated_at: company.updated_at,
        }
    }
}

// ============================================================================
// Departments
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company_id: String,
}

impl From<DepartmentRequest> for DepartmentInput {
    fn from(req: DepartmentRequest) -> Self {
        Self {
            name: req.name,
            company_id: req.company_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentResponse {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Department> for DepartmentResponse {
    fn from(department: Department) -> Self {
        Self {
            id: department.id.to_string(),
            company_id: department.company_id.to_string(),
            name: department.name,
            created_at: department.created_at,
            updated_at: department.updated_at,
        }
    }
}

// ============================================================================
// Positions
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct PositionRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company_id: String,
    #[serde(default)]
    pub department_id: String,
}

impl From<PositionRequest> for PositionInput {
    fn from(req: PositionRequest) -> Self {
        Self {
            name: req.name,
            company_id: req.company_id,
            department_id: req.department_id,
        }
    }
}

/// `GET /positions?company_id&department_id&page&size`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PositionSearchQuery {
    pub company_id: Option<String>,
    pub department_id: Option<String>,
    pub page: Option<String>,
    pub size: Option<String>,
}

impl PositionSearchQuery {
    pub fn into_parts(self) -> (PositionSearch, PageRequest) {
        let page = PageQuery {
            page: self.page,
            size: self.size,
        }
        .resolve();
        let search = PositionSearch {
            company_id: self.company_id,
            department_id: self.department_id,
        };
        (search, page)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PositionResponse {
    pub id: String,
    pub company_id: String,
    pub department_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Position> for PositionResponse {
    fn from(position: Position) -> Self {
        Self {
            id: position.id.to_string(),
            company_id: position.company_id.to_string(),
            department_id: position.department_id.to_string(),
            name: position.name,
            created_at: position.created_at,
            updated_at: position.updated_at,
        }
    }
}

// ============================================================================
// Employees
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub id_type: String,
    #[serde(default)]
    pub id_number: String,
    pub admission_date: Option<String>,
    pub salary: Option<f64>,
    #[serde(default)]
    pub company_id: String,
    pub department_id: Option<String>,
    pub position_id: Option<String>,
    pub picture_url: Option<String>,
}

impl From<EmployeeRequest> for EmployeeInput {
    fn from(req: EmployeeRequest) -> Self {
        Self {
            name: req.name,
            last_name: req.last_name,
            phone_number: req.phone_number,
            email: req.email,
            id_type: req.id_type,
            id_number: req.id_number,
            admission_date: req.admission_date,
            salary: req.salary,
            company_id: req.company_id,
            department_id: req.department_id,
            position_id: req.position_id,
            picture_url: req.picture_url,
        }
    }
}

/// `GET /employees?company_id&page&size`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeListQuery {
    pub company_id: Option<String>,
    pub page: Option<String>,
    pub size: Option<String>,
}

impl EmployeeListQuery {
    pub fn page(&self) -> PageRequest {
        PageQuery {
            page: self.page.clone(),
            size: self.size.clone(),
        }
        .resolve()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeResponse {
    pub id: String,
    pub company_id: String,
    pub department_id: Option<String>,
    pub position_id: Option<String>,
    pub name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub id_type: String,
    pub id_number: String,
    pub admission_date: NaiveDate,
    pub salary: f64,
    pub picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id.to_string(),
            company_id: employee.company_id.to_string(),
            department_id: employee.department_id.map(|id| id.to_string()),
            position_id: employee.position_id.map(|id| id.to_string()),
            name: employee.name,
            last_name: employee.last_name,
            phone_number: employee.phone_number,
            email: employee.email.into_inner(),
            id_type: employee.id_type,
            id_number: employee.id_number,
            admission_date: employee.admission_date,
            salary: employee.salary,
            picture_url: employee.picture_url,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}
