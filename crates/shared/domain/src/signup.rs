//! Signup domain entity: one camper booked into one activity at one hour.

use crate::activity::Activity;
use crate::camper::Camper;
use crate::error::DomainResult;
use crate::validation::{validate_id, validate_reference, validate_time};

/// Association of a camper to an activity at an hour of the day.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Signup {
    /// Unique signup identifier
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    id: i32,
    /// Hour of day (0 to 23)
    #[cfg_attr(feature = "openapi", schema(example = 9))]
    time: i32,
    /// Camper taking part
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    camper_id: i32,
    /// Activity booked
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    activity_id: i32,
}

impl Signup {
    /// Rebuild a signup from a stored row.
    pub fn from_parts(id: i32, time: i32, camper_id: i32, activity_id: i32) -> Self {
        Self {
            id,
            time,
            camper_id,
            activity_id,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn time(&self) -> i32 {
        self.time
    }

    pub fn camper_id(&self) -> i32 {
        self.camper_id
    }

    pub fn activity_id(&self) -> i32 {
        self.activity_id
    }
}

/// Signup whose scalar fields passed validation.
///
/// The referenced camper and activity still have to be shown to exist with
/// [`NewSignup::resolve`] before the signup can be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSignup {
    time: i32,
    camper_id: i32,
    activity_id: i32,
}

impl NewSignup {
    pub fn new(camper_id: i64, activity_id: i64, time: i64) -> DomainResult<Self> {
        Ok(Self {
            camper_id: validate_id("camper_id", camper_id)?,
            activity_id: validate_id("activity_id", activity_id)?,
            time: validate_time(time)?,
        })
    }

    pub fn time(&self) -> i32 {
        self.time
    }

    pub fn camper_id(&self) -> i32 {
        self.camper_id
    }

    pub fn activity_id(&self) -> i32 {
        self.activity_id
    }

    /// Check both foreign keys against the rows found for them.
    pub fn resolve(
        &self,
        camper: Option<Camper>,
        activity: Option<Activity>,
    ) -> DomainResult<(Camper, Activity)> {
        let camper = validate_reference("camper_id", self.camper_id, camper)?;
        let activity = validate_reference("activity_id", self.activity_id, activity)?;
        Ok((camper, activity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_signup_rejects_out_of_range_hour() {
        assert!(NewSignup::new(1, 1, 23).is_ok());
        assert_eq!(NewSignup::new(1, 1, 24).unwrap_err().field(), Some("time"));
        assert_eq!(NewSignup::new(1, 1, -3).unwrap_err().field(), Some("time"));
    }

    #[test]
    fn test_resolve_requires_both_rows() {
        let signup = NewSignup::new(1, 2, 9).unwrap();
        let camper = Camper::from_parts(1, "Lee".to_string(), 10);
        let activity = Activity::from_parts(2, "Archery".to_string(), 2);

        let err = signup.resolve(None, Some(activity.clone())).unwrap_err();
        assert_eq!(err.field(), Some("camper_id"));

        let err = signup.resolve(Some(camper.clone()), None).unwrap_err();
        assert_eq!(err.field(), Some("activity_id"));

        let (c, a) = signup.resolve(Some(camper), Some(activity)).unwrap();
        assert_eq!((c.id(), a.id()), (1, 2));
    }
}
