//! Service layer - Business logic.

mod camp_service;

pub use camp_service::{CampManager, CampService};
