use axum::Json;
use shared::{
    api::{envelope::WorkoutEnvelope, error::ServerError, response_errors::WorkoutError},
    model::Workout,
};
use tracing::instrument;

use crate::{db::DatabaseConnection, extract::WorkoutId};

#[instrument(skip(conn))]
pub async fn fetch_workout(
    DatabaseConnection(conn): DatabaseConnection,
    WorkoutId(id): WorkoutId,
) -> Result<Json<WorkoutEnvelope>, ServerError<WorkoutError>> {
    let workout = conn
        .interact(move |conn| Workout::fetch::<WorkoutError>(conn, id))
        .await??
        .ok_or(WorkoutError::NotFound { id })?;

    Ok(Json(workout.into()))
}
