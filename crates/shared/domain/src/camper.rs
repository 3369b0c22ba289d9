//! Camper domain entity and related types.

use crate::error::DomainResult;
use crate::validation::{validate_age, validate_name, validate_present};

/// A person who may sign up for activities.
///
/// Fields are private so that every assignment goes through validation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Camper {
    /// Unique camper identifier
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    id: i32,
    /// Camper name (non-empty)
    #[cfg_attr(feature = "openapi", schema(example = "Lee"))]
    name: String,
    /// Camper age (8 to 18)
    #[cfg_attr(feature = "openapi", schema(example = 10))]
    age: i32,
}

impl Camper {
    /// Rebuild a camper from a stored row.
    ///
    /// Rows were validated on their way in, so no checks run here.
    pub fn from_parts(id: i32, name: String, age: i32) -> Self {
        Self { id, name, age }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    /// Assign a new name (validated)
    pub fn set_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        self.name = validate_name(name)?;
        Ok(())
    }

    /// Assign a new age (validated)
    pub fn set_age(&mut self, age: i64) -> DomainResult<()> {
        self.age = validate_age(age)?;
        Ok(())
    }

    /// Apply a partial update, returning the updated camper.
    ///
    /// `self` is left untouched when any field is rejected.
    pub fn with_changes(&self, changes: CamperChanges) -> DomainResult<Self> {
        let mut updated = self.clone();
        if let Some(name) = changes.name {
            updated.set_name(validate_present("name", name)?)?;
        }
        if let Some(age) = changes.age {
            updated.set_age(validate_present("age", age)?)?;
        }
        Ok(updated)
    }
}

/// Validated camper that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCamper {
    name: String,
    age: i32,
}

impl NewCamper {
    pub fn new(name: impl Into<String>, age: i64) -> DomainResult<Self> {
        Ok(Self {
            name: validate_name(name)?,
            age: validate_age(age)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }
}

/// Fields a camper may change after creation.
///
/// Anything not listed here cannot be updated. The outer `Option` says
/// whether the field was sent at all; `Some(None)` means it was sent as null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CamperChanges {
    pub name: Option<Option<String>>,
    pub age: Option<Option<i64>>,
}

impl CamperChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_camper_validates_every_field() {
        assert!(NewCamper::new("Lee", 10).is_ok());
        assert_eq!(NewCamper::new("", 10).unwrap_err().field(), Some("name"));
        assert_eq!(NewCamper::new("Lee", 5).unwrap_err().field(), Some("age"));
    }

    #[test]
    fn test_rejected_update_leaves_camper_unchanged() {
        let camper = Camper::from_parts(1, "Lee".to_string(), 10);
        let changes = CamperChanges {
            name: Some(Some("Sam".to_string())),
            age: Some(Some(5)),
        };

        assert!(camper.with_changes(changes).is_err());
        assert_eq!(camper.name(), "Lee");
        assert_eq!(camper.age(), 10);
    }

    #[test]
    fn test_partial_update_only_touches_given_fields() {
        let camper = Camper::from_parts(1, "Lee".to_string(), 10);
        let updated = camper
            .with_changes(CamperChanges {
                name: None,
                age: Some(Some(12)),
            })
            .unwrap();

        assert_eq!(updated.name(), "Lee");
        assert_eq!(updated.age(), 12);
        assert_eq!(updated.id(), 1);
    }

    #[test]
    fn test_null_field_is_rejected_not_skipped() {
        let camper = Camper::from_parts(1, "Lee".to_string(), 10);

        let err = camper
            .with_changes(CamperChanges {
                name: Some(None),
                age: None,
            })
            .unwrap_err();
        assert_eq!(err.field(), Some("name"));

        let err = camper
            .with_changes(CamperChanges {
                name: None,
                age: Some(None),
            })
            .unwrap_err();
        assert_eq!(err.field(), Some("age"));
    }

    #[test]
    fn test_setter_rejects_invalid_assignment() {
        let mut camper = Camper::from_parts(1, "Lee".to_string(), 10);
        assert!(camper.set_name("").is_err());
        assert!(camper.set_age(19).is_err());
        assert_eq!(camper, Camper::from_parts(1, "Lee".to_string(), 10));
    }
}
