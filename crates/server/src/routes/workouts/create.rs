use axum::Json;
use shared::{
    api::{envelope::WorkoutEnvelope, error::ServerError, response_errors::WorkoutError},
    model::{ValidateModel, Workout},
};
use tracing::{info, instrument};

use crate::{db::DatabaseConnection, extract::Payload};

#[instrument(skip(conn, workout), fields(title = %workout.title))]
pub async fn create_workout(
    DatabaseConnection(conn): DatabaseConnection,
    Payload(workout): Payload<Workout>,
) -> Result<Json<WorkoutEnvelope>, ServerError<WorkoutError>> {
    workout.validate().map_err(WorkoutError::from)?;

    let workout = conn
        .interact(move |conn| Workout::create::<WorkoutError>(conn, workout))
        .await??;

    info!(id = workout.id, entries = workout.entries.len(), "Workout created");
    Ok(Json(workout.into()))
}
