//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod activity;
pub mod camper;
pub mod signup;
