//! Field validation shared by the directory services
//!
//! Every check here runs before the first storage call of a write.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use kernel::email::Email;
use kernel::id::Id;

use crate::error::{DirectoryError, DirectoryResult};

/// Trimmed, non-empty text
pub fn required_text(field: &'static str, raw: &str) -> DirectoryResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DirectoryError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// `None` for absent or blank input
pub fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn email(field: &'static str, raw: &str) -> DirectoryResult<Email> {
    Email::new(raw).map_err(|e| DirectoryError::validation(field, e))
}

/// A required parent id.
///
/// A blank value is a validation error; a value that is not a UUID can never
/// name an existing row, so it is reported as a missing parent.
pub fn required_ref<T>(field: &'static str, entity: &str, raw: &str) -> DirectoryResult<Id<T>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DirectoryError::validation(field, "must not be empty"));
    }
    parse_ref(entity, trimmed)
}

/// An optional parent id; blank counts as absent
pub fn optional_ref<T>(entity: &str, raw: Option<&str>) -> DirectoryResult<Option<Id<T>>> {
    optional_text(raw)
        .map(|value| parse_ref(entity, &value))
        .transpose()
}

fn parse_ref<T>(entity: &str, raw: &str) -> DirectoryResult<Id<T>> {
    Id::from_str(raw).map_err(|_| DirectoryError::Referential(missing(entity, raw)))
}

/// Message for a parent that does not exist
pub fn missing(entity: &str, id: impl std::fmt::Display) -> String {
    format!("{entity} {id} does not exist")
}

/// `YYYY-MM-DD`, or an RFC 3339 timestamp whose date part is used
pub fn date(field: &'static str, raw: Option<&str>) -> DirectoryResult<NaiveDate> {
    let raw = optional_text(raw).ok_or_else(|| DirectoryError::validation(field, "is required"))?;

    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(&raw).map(|dt| dt.date_naive()))
        .map_err(|_| DirectoryError::validation(field, "must be a date (YYYY-MM-DD)"))
}

/// Finite, non-negative amount
pub fn salary(field: &'static str, raw: Option<f64>) -> DirectoryResult<f64> {
    match raw {
        None => Err(DirectoryError::validation(field, "is required")),
        Some(value) if !value.is_finite() => {
            Err(DirectoryError::validation(field, "must be a finite number"))
        }
        Some(value) if value < 0.0 => {
            Err(DirectoryError::validation(field, "must not be negative"))
        }
        Some(value) => Ok(value),
    }
}
