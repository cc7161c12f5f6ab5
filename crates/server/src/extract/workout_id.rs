use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use shared::api::{error::ServerError, response_errors::WorkoutError};
use tracing::warn;

/// The numeric `:id` segment of a workout path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for WorkoutId
where
    S: Send + Sync,
{
    type Rejection = ServerError<WorkoutError>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                warn!(%rejection, "Missing workout id");
                WorkoutError::InvalidId
            })?;

        let id = raw.parse::<i64>().map_err(|e| {
            warn!(%raw, error = %e, "Invalid workout id");
            WorkoutError::InvalidId
        })?;

        Ok(WorkoutId(id))
    }
}
