//! Domain Layer
//!
//! Contains entities and repository traits.

pub mod entity;
pub mod repository;

// Re-exports
pub use entity::{
    company::Company, department::Department, employee::Employee, position::Position,
};
pub use repository::{
    CompanyRepository, DepartmentRepository, EmployeeRepository, PositionFilter,
    PositionRepository,
};
