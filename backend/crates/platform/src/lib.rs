//! Platform Crate - Technical Infrastructure
//!
//! Stateless security primitives shared by the HTTP-facing crates:
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Signed session tokens (HS256 JWT)

pub mod password;
pub mod token;
