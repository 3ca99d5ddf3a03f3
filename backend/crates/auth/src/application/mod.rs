//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod login;
pub mod users;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use users::{CreateUserInput, UpdateUserInput, UserService};
