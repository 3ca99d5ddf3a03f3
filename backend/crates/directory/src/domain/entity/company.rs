//! Company Entity

use chrono::{DateTime, Utc};
use kernel::email::Email;
use kernel::id::{CompanyId, UserId};

/// Top of the hierarchy. `owner_id` is the user who created it and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub id: CompanyId,
    pub owner_id: UserId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: Email,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
