use axum::Json;
use shared::{
    api::{envelope::WorkoutEnvelope, error::ServerError, response_errors::WorkoutError},
    model::{UpdateWorkout, ValidateModel, Workout},
};
use tracing::instrument;

use crate::{
    db::DatabaseConnection,
    extract::{Payload, WorkoutId},
};

/// Applies the fields present in the body to the stored workout. Entries are
/// only touched when the body has an `entries` list, which then replaces them
/// with freshly numbered ones. Otherwise entry ids stay the same.
#[instrument(skip(conn))]
pub async fn update_workout(
    DatabaseConnection(conn): DatabaseConnection,
    WorkoutId(id): WorkoutId,
    Payload(changes): Payload<UpdateWorkout>,
) -> Result<Json<WorkoutEnvelope>, ServerError<WorkoutError>> {
    let workout = conn
        .interact(move |conn| {
            let Some(mut workout) = Workout::fetch::<WorkoutError>(conn, id)? else {
                return Err(ServerError::from(WorkoutError::NotFound { id }));
            };

            let replace_entries = changes.entries.is_some();
            changes.apply_to(&mut workout);
            workout.validate().map_err(WorkoutError::from)?;

            if replace_entries {
                Workout::update(conn, &mut workout)?;
            } else {
                Workout::update_details(conn, &workout)?;
            }

            Ok::<_, ServerError<WorkoutError>>(workout)
        })
        .await??;

    Ok(Json(workout.into()))
}
