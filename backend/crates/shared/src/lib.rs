//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary shared by the `auth` and `directory`
//! domains:
//! - Unified error type and result alias
//! - Typed entity identifiers (users, companies, departments, positions, employees)
//! - The email value object
//! - Page-based listing arithmetic and the page envelope
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod email;
pub mod id;
pub mod pagination;
