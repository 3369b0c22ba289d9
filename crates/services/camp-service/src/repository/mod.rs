//! Repository layer for data access.

pub mod entities;
mod camp_repository;

pub use camp_repository::{CampRepository, CampStore};

#[cfg(any(test, feature = "test-utils"))]
pub use camp_repository::MockCampRepository;
