//! Infrastructure Layer
//!
//! Database implementations.

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgDirectoryRepository;
