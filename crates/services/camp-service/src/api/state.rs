//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::Database;
use crate::repository::CampStore;
use crate::service::{CampManager, CampService};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Camper, activity and signup use cases
    pub camp_service: Arc<dyn CampService>,
    /// Database connection (health checks)
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the SeaORM-backed repository and service onto a database.
    pub fn from_database(database: Arc<Database>) -> Self {
        let repo = Arc::new(CampStore::new(database.get_connection()));
        let camp_service = Arc::new(CampManager::new(repo));

        Self {
            camp_service,
            database,
        }
    }
}
