//! Shared configuration structures.

use serde::{Deserialize, Serialize};

/// Default database URL (SQLite file next to the binary, created on demand)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://camp.db?mode=rwc";

/// Database configuration.
#[derive(Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Single-connection in-memory SQLite database (tests and demos).
    ///
    /// One connection only: every SQLite memory connection is its own database.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 10,
            min_connections: 1,
        }
    }
}
