//! Per-field validators.
//!
//! Every writable field has one validator here, and every assignment to that
//! field (construction and partial update alike) goes through it.

use crate::constants::{
    MAX_CAMPER_AGE, MAX_SIGNUP_HOUR, MIN_CAMPER_AGE, MIN_NAME_LENGTH, MIN_SIGNUP_HOUR,
};
use crate::error::{DomainError, DomainResult};

/// Camper name: non-empty text.
pub fn validate_name(name: impl Into<String>) -> DomainResult<String> {
    let name = name.into();
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(DomainError::validation("name", "must not be empty"));
    }
    Ok(name)
}

/// Camper age: integer in `[MIN_CAMPER_AGE, MAX_CAMPER_AGE]`.
pub fn validate_age(age: i64) -> DomainResult<i32> {
    in_range("age", age, MIN_CAMPER_AGE, MAX_CAMPER_AGE)
}

/// Signup time: hour of day in `[MIN_SIGNUP_HOUR, MAX_SIGNUP_HOUR]`.
pub fn validate_time(time: i64) -> DomainResult<i32> {
    in_range("time", time, MIN_SIGNUP_HOUR, MAX_SIGNUP_HOUR)
}

/// Foreign key shape check. Existence is checked by [`validate_reference`]
/// once the referenced row has been looked up.
pub fn validate_id(field: &str, id: i64) -> DomainResult<i32> {
    i32::try_from(id)
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| DomainError::validation(field, format!("no record with id {}", id)))
}

/// Foreign key existence: the lookup result must hold a row.
///
/// A missing row is always an error, never a value.
pub fn validate_reference<T>(field: &str, id: i32, found: Option<T>) -> DomainResult<T> {
    found.ok_or_else(|| DomainError::validation(field, format!("no record with id {}", id)))
}

/// A field sent as `null` in a partial update. No camper field accepts it.
pub fn validate_present<T>(field: &str, value: Option<T>) -> DomainResult<T> {
    value.ok_or_else(|| DomainError::validation(field, "must not be null"))
}

fn in_range(field: &str, value: i64, min: i64, max: i64) -> DomainResult<i32> {
    if !(min..=max).contains(&value) {
        return Err(DomainError::validation(
            field,
            format!("must be between {} and {}", min, max),
        ));
    }
    // Bounds are well inside i32.
    Ok(value as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_rejects_empty() {
        let err = validate_name("").unwrap_err();
        assert_eq!(err.field(), Some("name"));
        assert_eq!(validate_name("Lee").unwrap(), "Lee");
    }

    #[test]
    fn test_age_bounds_are_inclusive() {
        assert_eq!(validate_age(8).unwrap(), 8);
        assert_eq!(validate_age(18).unwrap(), 18);
        assert!(validate_age(7).is_err());
        assert!(validate_age(19).is_err());
        assert!(validate_age(i64::MAX).is_err());
    }

    #[test]
    fn test_time_bounds_are_inclusive() {
        assert_eq!(validate_time(0).unwrap(), 0);
        assert_eq!(validate_time(23).unwrap(), 23);
        assert_eq!(validate_time(24).unwrap_err().field(), Some("time"));
        assert!(validate_time(-1).is_err());
    }

    #[test]
    fn test_id_must_fit_a_row_id() {
        assert_eq!(validate_id("camper_id", 3).unwrap(), 3);
        assert!(validate_id("camper_id", 0).is_err());
        assert!(validate_id("camper_id", i64::from(i32::MAX) + 1).is_err());
    }

    #[test]
    fn test_null_is_never_present() {
        let err = validate_present::<String>("name", None).unwrap_err();
        assert_eq!(err, DomainError::validation("name", "must not be null"));
        assert_eq!(validate_present("age", Some(9)).unwrap(), 9);
    }

    #[test]
    fn test_missing_reference_is_an_error() {
        let err = validate_reference::<()>("activity_id", 42, None).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("activity_id", "no record with id 42")
        );
        assert_eq!(validate_reference("activity_id", 42, Some(7)).unwrap(), 7);
    }
}
