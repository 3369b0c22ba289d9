//! Activity handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{views, Activity};

use crate::api::extractors::{EntityId, ValidatedJson};
use crate::api::AppState;

/// Activity creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateActivityRequest {
    /// Activity name
    #[validate(length(min = 1, message = "must not be empty"))]
    #[schema(example = "Archery")]
    pub name: String,
    /// Difficulty rating
    #[schema(example = 3)]
    pub difficulty: i32,
}

/// Create activity routes
pub fn activity_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_activities).post(create_activity))
        .route("/:id", get(get_activity).delete(delete_activity))
}

/// List all activities without their signups
#[utoipa::path(
    get,
    path = "/activities",
    tag = "Activities",
    responses(
        (status = 200, description = "List of activities", body = [Activity])
    )
)]
pub async fn list_activities(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let activities = state.camp_service.list_activities().await?;
    tracing::debug!(count = activities.len(), "Listed activities");

    Ok(Json(views::activity_list(&activities)?))
}

/// Create a new activity
#[utoipa::path(
    post,
    path = "/activities",
    tag = "Activities",
    request_body = CreateActivityRequest,
    responses(
        (status = 201, description = "Activity created", body = Activity),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_activity(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateActivityRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let activity = state
        .camp_service
        .create_activity(payload.name, payload.difficulty)
        .await?;
    tracing::info!(activity_id = activity.id(), "Activity created");

    Ok((StatusCode::CREATED, Json(views::activity_summary(&activity)?)))
}

/// Get an activity with its signups, each showing its camper
#[utoipa::path(
    get,
    path = "/activities/{id}",
    tag = "Activities",
    params(
        ("id" = i32, Path, description = "Activity ID")
    ),
    responses(
        (status = 200, description = "Activity with signups", body = Activity),
        (status = 404, description = "Activity not found")
    )
)]
pub async fn get_activity(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Value>> {
    let activity = state.camp_service.get_activity(id).await?;

    Ok(Json(views::activity_detail(&activity)?))
}

/// Delete an activity and every signup for it
#[utoipa::path(
    delete,
    path = "/activities/{id}",
    tag = "Activities",
    params(
        ("id" = i32, Path, description = "Activity ID")
    ),
    responses(
        (status = 204, description = "Activity deleted"),
        (status = 404, description = "Activity not found")
    )
)]
pub async fn delete_activity(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<StatusCode> {
    state.camp_service.delete_activity(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
