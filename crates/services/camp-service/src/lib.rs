//! Camp Service Library
//!
//! HTTP API over the summer camp records: campers, activities and the
//! signups linking them. Used by the `camp-service` binary and by the
//! integration tests, which drive [`api::create_router`] directly.

pub mod api;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use sea_orm::DbErr;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::CampServiceConfig;
use crate::infra::{Database, MigrationState};
use crate::repository::CampStore;
use crate::service::{CampManager, CampService};

/// Run the HTTP server until Ctrl+C.
pub async fn run_server(config: CampServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Connect and bring the schema up to date
    let db = Arc::new(Database::connect(&config.database).await?);

    let app = create_router(AppState::from_database(db));

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Camp service listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Camp service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

/// Run a migrate command against the configured database.
pub async fn run_migrations(
    config: CampServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open(&config.database).await?;
    let states = migrate(&db, action).await?;

    if let MigrateAction::Status = action {
        for state in states {
            let marker = if state.applied { "[x]" } else { "[ ]" };
            println!("{} {}", marker, state.name);
        }
    }

    Ok(())
}

/// Apply `action` and report where every migration stands afterwards.
pub async fn migrate(
    db: &Database,
    action: MigrateAction,
) -> Result<Vec<MigrationState>, DbErr> {
    match action {
        MigrateAction::Up => {
            db.apply_pending().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.revert_last().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Fresh => {
            db.rebuild().await?;
            info!("Database reset and migrations applied");
        }
        MigrateAction::Status => {}
    }

    db.migration_states().await
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Fill an empty database with a few campers, activities and signups.
pub async fn run_seed(config: CampServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let service = CampManager::new(Arc::new(CampStore::new(db.get_connection())));

    let seeded = seed(&service).await?;
    if seeded {
        info!("Seed data inserted");
    } else {
        info!("Database already has campers, seed skipped");
    }

    Ok(())
}

/// Insert the demo data set through the service, so every row is validated.
///
/// Returns `false` without writing anything when campers already exist.
pub async fn seed(service: &dyn CampService) -> common::AppResult<bool> {
    if !service.list_campers().await?.is_empty() {
        return Ok(false);
    }

    let campers = [("Caitlin", 8), ("Lizzie", 9), ("Nicholas", 12), ("Ashley", 11)];
    let activities = [("Archery", 2), ("Swim in the lake", 1), ("Hiking by the stream", 3)];

    let mut camper_ids = Vec::with_capacity(campers.len());
    for (name, age) in campers {
        camper_ids.push(service.create_camper(name.to_string(), age).await?.id());
    }

    let mut activity_ids = Vec::with_capacity(activities.len());
    for (name, difficulty) in activities {
        activity_ids.push(service.create_activity(name.to_string(), difficulty).await?.id());
    }

    // Camper i takes activity i mod n, at a staggered morning hour
    for (i, camper_id) in camper_ids.iter().enumerate() {
        let activity_id = activity_ids[i % activity_ids.len()];
        let hour = 9 + i as i64;
        service
            .create_signup(i64::from(*camper_id), i64::from(activity_id), hour)
            .await?;
    }

    Ok(true)
}
