use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use shared::api::{error::ServerError, response_errors::WorkoutError};
use tracing::warn;

/// JSON request body. Unlike `Json` a rejection is answered with the generic
/// `{"error": "invalid request sent"}` body; the reason is only logged.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ServerError<WorkoutError>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Payload(value)),
            Err(rejection) => {
                warn!(status = %rejection.status(), reason = %rejection.body_text(), "Rejected request body");
                Err(WorkoutError::InvalidPayload.into())
            }
        }
    }
}
