//! Camper handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{views, Camper, CamperChanges};

use crate::api::extractors::{EntityId, ValidatedJson};
use crate::api::AppState;

/// Camper creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCamperRequest {
    /// Camper name
    #[validate(length(min = 1, message = "must not be empty"))]
    #[schema(example = "Lee", min_length = 1)]
    pub name: String,
    /// Camper age in years
    #[validate(range(min = 8, max = 18, message = "must be between 8 and 18"))]
    #[schema(example = 10, minimum = 8, maximum = 18)]
    pub age: i64,
}

/// Camper partial update request.
///
/// Only `name` and `age` may be sent. Their rules are applied once the camper
/// has been found, so an unknown id answers 404 whatever the body holds.
/// A field sent as `null` is kept apart from an absent one and rejected.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateCamperRequest {
    /// New name
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>, example = "Sam")]
    pub name: Option<Option<String>>,
    /// New age
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<i64>, example = 12)]
    pub age: Option<Option<i64>>,
}

/// Runs only for keys present in the body, so `Some(None)` is an explicit null.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateCamperRequest> for CamperChanges {
    fn from(req: UpdateCamperRequest) -> Self {
        CamperChanges {
            name: req.name,
            age: req.age,
        }
    }
}

/// Create camper routes
pub fn camper_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_campers).post(create_camper))
        .route("/:id", get(get_camper).patch(update_camper))
}

/// List all campers without their signups
#[utoipa::path(
    get,
    path = "/campers",
    tag = "Campers",
    responses(
        (status = 200, description = "List of campers", body = [Camper])
    )
)]
pub async fn list_campers(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let campers = state.camp_service.list_campers().await?;
    tracing::debug!(count = campers.len(), "Listed campers");

    Ok(Json(views::camper_list(&campers)?))
}

/// Create a new camper
#[utoipa::path(
    post,
    path = "/campers",
    tag = "Campers",
    request_body = CreateCamperRequest,
    responses(
        (status = 201, description = "Camper created", body = Camper),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_camper(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCamperRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let camper = state
        .camp_service
        .create_camper(payload.name, payload.age)
        .await?;
    tracing::info!(camper_id = camper.id(), "Camper created");

    Ok((StatusCode::CREATED, Json(views::camper_summary(&camper)?)))
}

/// Get a camper with its signups, each showing its activity
#[utoipa::path(
    get,
    path = "/campers/{id}",
    tag = "Campers",
    params(
        ("id" = i32, Path, description = "Camper ID")
    ),
    responses(
        (status = 200, description = "Camper with signups", body = Camper),
        (status = 404, description = "Camper not found")
    )
)]
pub async fn get_camper(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Value>> {
    let camper = state.camp_service.get_camper(id).await?;

    Ok(Json(views::camper_detail(&camper)?))
}

/// Update a camper's name and/or age
#[utoipa::path(
    patch,
    path = "/campers/{id}",
    tag = "Campers",
    params(
        ("id" = i32, Path, description = "Camper ID")
    ),
    request_body = UpdateCamperRequest,
    responses(
        (status = 202, description = "Camper updated", body = Camper),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Camper not found")
    )
)]
pub async fn update_camper(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(payload): ValidatedJson<UpdateCamperRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let camper = state
        .camp_service
        .update_camper(id, payload.into())
        .await?;
    tracing::info!(camper_id = id, "Camper updated");

    Ok((StatusCode::ACCEPTED, Json(views::camper_summary(&camper)?)))
}
