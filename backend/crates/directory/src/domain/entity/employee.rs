//! Employee Entity

use chrono::{DateTime, NaiveDate, Utc};
use kernel::email::Email;
use kernel::id::{CompanyId, DepartmentId, EmployeeId, PositionId};

/// Employee entity
///
/// Department and position are optional, but when present they belong to
/// `company_id`, and the position sits in the given department.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: EmployeeId,
    pub company_id: CompanyId,
    pub department_id: Option<DepartmentId>,
    pub position_id: Option<PositionId>,
    pub name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: Email,
    /// Government id document type (passport, national id, ...)
    pub id_type: String,
    pub id_number: String,
    pub admission_date: NaiveDate,
    /// Finite and non-negative
    pub salary: f64,
    pub picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
