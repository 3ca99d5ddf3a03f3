//! Directory Backend Module
//!
//! Companies, departments, positions and employees, each scoped to the level
//! above it.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, repository traits
//! - `application/` - Use cases, field and referential validation, delete policy
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Consistency Model
//! - Parent references are checked by the services before any write; the
//!   tables carry no foreign keys
//! - Deletes never cascade. [`DeletePolicy`] decides whether a parent with
//!   dependents can be deleted at all
//! - Listings run the page query and the count query separately

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::{DeletePolicy, DirectoryConfig};
pub use error::{DirectoryError, DirectoryResult};
pub use infra::postgres::PgDirectoryRepository;
pub use presentation::router::directory_router;
