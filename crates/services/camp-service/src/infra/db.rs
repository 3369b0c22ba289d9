//! Database handle and schema lifecycle.

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr,
};
use sea_orm_migration::{MigrationStatus, MigratorTrait};

use common::DatabaseConfig;

use super::migrations::Migrator;

/// Where one migration stands on the connected database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

/// Pooled SeaORM connection plus the camp schema migrations.
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open the pool and bring the schema up to date.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let db = Self::open(config).await?;
        db.apply_pending().await?;
        tracing::info!("Database connected and migrations applied");
        Ok(db)
    }

    /// Open the pool and leave the schema alone (migrate commands).
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        tracing::debug!(backend = ?connection.get_database_backend(), "Database pool opened");
        Ok(Self { connection })
    }

    /// Cheap handle for repositories; clones share the pool.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    pub async fn apply_pending(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Undo the most recent migration.
    pub async fn revert_last(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Drop every table and re-run all migrations. All rows are lost.
    pub async fn rebuild(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Every known migration in order, with whether it has been applied.
    pub async fn migration_states(&self) -> Result<Vec<MigrationState>, DbErr> {
        let states = Migrator::get_migration_with_status(&self.connection)
            .await?
            .into_iter()
            .map(|m| MigrationState {
                name: m.name().to_string(),
                applied: m.status() == MigrationStatus::Applied,
            })
            .collect();
        Ok(states)
    }

    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection.ping().await
    }
}
