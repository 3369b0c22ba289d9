//! Signup handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{views, Signup};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;

/// Signup creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSignupRequest {
    /// Camper to sign up
    #[schema(example = 1)]
    pub camper_id: i64,
    /// Activity to sign up for
    #[schema(example = 1)]
    pub activity_id: i64,
    /// Hour of the day
    #[validate(range(min = 0, max = 23, message = "must be between 0 and 23"))]
    #[schema(example = 9, minimum = 0, maximum = 23)]
    pub time: i64,
}

/// Create signup routes
pub fn signup_routes() -> Router<AppState> {
    Router::new().route("/", post(create_signup))
}

/// Sign a camper up for an activity
#[utoipa::path(
    post,
    path = "/signups",
    tag = "Signups",
    request_body = CreateSignupRequest,
    responses(
        (status = 201, description = "Signup created with its camper and activity", body = Signup),
        (status = 400, description = "Validation error or unknown camper/activity")
    )
)]
pub async fn create_signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateSignupRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let signup = state
        .camp_service
        .create_signup(payload.camper_id, payload.activity_id, payload.time)
        .await?;
    tracing::info!(
        signup_id = signup.entity.id(),
        camper_id = signup.entity.camper_id(),
        activity_id = signup.entity.activity_id(),
        "Signup created"
    );

    Ok((StatusCode::CREATED, Json(views::signup_detail(&signup)?)))
}
