//! Application Configuration
//!
//! Configuration for the Directory application layer.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// What deleting a company, department or position does to rows that still
/// reference it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Refuse with a conflict while dependents exist
    #[default]
    Restrict,
    /// Delete the row only. Dependents keep the dangling id and fail the
    /// referential check on their next update.
    Detach,
}

impl DeletePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeletePolicy::Restrict => "restrict",
            DeletePolicy::Detach => "detach",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown delete policy {0:?} (expected \"restrict\" or \"detach\")")]
pub struct UnknownDeletePolicy(pub String);

impl FromStr for DeletePolicy {
    type Err = UnknownDeletePolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "restrict" => Ok(DeletePolicy::Restrict),
            "detach" => Ok(DeletePolicy::Detach),
            _ => Err(UnknownDeletePolicy(s.to_string())),
        }
    }
}

impl fmt::Display for DeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directory application configuration
#[derive(Debug, Clone, Default)]
pub struct DirectoryConfig {
    pub delete_policy: DeletePolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_restrict() {
        assert_eq!(DirectoryConfig::default().delete_policy, DeletePolicy::Restrict);
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("restrict".parse(), Ok(DeletePolicy::Restrict));
        assert_eq!(" Detach ".parse(), Ok(DeletePolicy::Detach));
        assert!("cascade".parse::<DeletePolicy>().is_err());
    }
}
