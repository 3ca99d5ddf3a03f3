//! Application Layer
//!
//! Use cases for the company → department → position → employee hierarchy.

pub mod company;
pub mod config;
pub mod department;
pub mod employee;
pub mod position;
pub mod validation;

// Re-exports
pub use company::{CompanyInput, CompanyService};
pub use config::{DeletePolicy, DirectoryConfig};
pub use department::{DepartmentInput, DepartmentService};
pub use employee::{EmployeeInput, EmployeeService};
pub use position::{PositionInput, PositionSearch, PositionService};
