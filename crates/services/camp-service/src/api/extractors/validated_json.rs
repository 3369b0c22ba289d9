//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use common::AppError;

/// JSON body that has passed its `validator` rules.
///
/// Malformed bodies, unknown fields and failed rules all become
/// `AppError::Validation`, so clients get a 400 with the offending field.
///
/// ```rust,ignore
/// async fn create_camper(ValidatedJson(payload): ValidatedJson<CreateCamperRequest>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::warn!(error = %e.body_text(), "Rejected request body");
            AppError::validation(e.body_text())
        })?;

        value.validate().map_err(|e| {
            let err = first_field_error(&e);
            tracing::warn!(field = ?err.field(), "Request failed validation");
            err
        })?;

        Ok(ValidatedJson(value))
    }
}

/// Report the first failing field (by name, so the choice is stable).
fn first_field_error(errors: &ValidationErrors) -> AppError {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    match fields.first() {
        Some((field, errs)) => {
            let message = errs
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| "is invalid".to_string());
            AppError::invalid_field(field.to_string(), format!("{}: {}", field, message))
        }
        None => AppError::validation(errors.to_string()),
    }
}
