//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum camper name length requirement
pub const MIN_NAME_LENGTH: usize = 1;

/// Youngest age accepted at camp
pub const MIN_CAMPER_AGE: i64 = 8;

/// Oldest age accepted at camp
pub const MAX_CAMPER_AGE: i64 = 18;

/// First bookable hour of the day
pub const MIN_SIGNUP_HOUR: i64 = 0;

/// Last bookable hour of the day
pub const MAX_SIGNUP_HOUR: i64 = 23;

// =============================================================================
// Serialization
// =============================================================================

/// Default exclusions applied whenever a camper is serialized
pub const CAMPER_SERIALIZE_RULES: &[&str] = &["-signups.camper"];

/// Default exclusions applied whenever an activity is serialized
pub const ACTIVITY_SERIALIZE_RULES: &[&str] = &["-signups.activity"];

/// Default exclusions applied whenever a signup is serialized
pub const SIGNUP_SERIALIZE_RULES: &[&str] = &["-camper.signups", "-activity.signups"];

/// Exclusions for list and summary views of campers and activities
pub const SUMMARY_VIEW_RULES: &[&str] = &["-signups"];

/// Exclusions for single camper/activity views (entity defaults only)
pub const DETAIL_VIEW_RULES: &[&str] = &[];
