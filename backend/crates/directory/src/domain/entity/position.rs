//! Position Entity

use chrono::{DateTime, Utc};
use kernel::id::{CompanyId, DepartmentId, PositionId};

/// A role inside one department. `department_id` always belongs to `company_id`
/// at the time of the last write.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub id: PositionId,
    pub company_id: CompanyId,
    pub department_id: DepartmentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
