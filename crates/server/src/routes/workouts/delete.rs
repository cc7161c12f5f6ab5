use axum::http::StatusCode;
use shared::{
    api::{error::ServerError, response_errors::WorkoutError},
    model::Workout,
};
use tracing::{info, instrument};

use crate::{db::DatabaseConnection, extract::WorkoutId};

#[instrument(skip(conn))]
pub async fn delete_workout(
    DatabaseConnection(conn): DatabaseConnection,
    WorkoutId(id): WorkoutId,
) -> Result<StatusCode, ServerError<WorkoutError>> {
    conn.interact(move |conn| Workout::delete(conn, id)).await??;

    info!(id, "Workout deleted");
    Ok(StatusCode::NO_CONTENT)
}
