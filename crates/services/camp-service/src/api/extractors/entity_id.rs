//! Row id extractor for `/:id` routes.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use common::AppError;

/// Row id taken from the `:id` path segment.
///
/// A segment that cannot name a stored row (not a number, zero or negative,
/// outside the `i32` key range) is answered as not found, in the same error
/// envelope as every other failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Only fails when the route has no single `:id` segment
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::internal(e.body_text()))?;

        parse_id(&raw).map(EntityId).ok_or_else(|| {
            tracing::debug!(id = %raw, "Path id cannot name a row");
            AppError::NotFound
        })
    }
}

fn parse_id(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok().filter(|id| *id > 0)
}
