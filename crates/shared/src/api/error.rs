use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};

#[cfg(feature = "backend")]
pub use backend::*;

/// Placeholder inner error for routes and functions that have no domain
/// specific failures
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Nothing {}

impl fmt::Display for Nothing {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl std::error::Error for Nothing {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub error_messages: Vec<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error_messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Error returned from the store and from request handlers.
///
/// `Inner` carries a domain error that knows its own status code and is safe
/// to show to the client. `Other` is anything unexpected; its message is only
/// ever logged.
#[derive(Debug)]
pub enum ServerError<T> {
    Inner { code: StatusCode, inner: T },
    Other { message: String },
}

impl<T> ServerError<T> {
    pub fn code(&self) -> StatusCode {
        match self {
            Self::Inner { code, .. } => *code,
            Self::Other { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn inner(&self) -> Option<&T> {
        match self {
            Self::Inner { inner, .. } => Some(inner),
            Self::Other { .. } => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for ServerError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inner { code, inner } => write!(f, "{code}: {inner}"),
            Self::Other { message } => write!(f, "{message}"),
        }
    }
}

impl<T: fmt::Debug + fmt::Display> std::error::Error for ServerError<T> {}

#[macro_export]
macro_rules! other_error {
    ($($arg:tt)*) => {
        $crate::api::error::ServerError::Other { message: format!($($arg)*) }
    };
}

#[cfg(feature = "backend")]
mod backend {
    use std::fmt;

    use axum::{
        response::{IntoResponse, Response},
        Json,
    };
    use deadpool_sqlite::{HookError, InteractError, PoolError};
    use http::StatusCode;
    use tracing::{debug, error};

    use super::{Nothing, ServerError};
    use crate::api::envelope::ErrorEnvelope;

    const INTERNAL_SERVER_ERROR_MESSAGE: &str = "internal server error";

    impl<T: fmt::Debug + fmt::Display> IntoResponse for ServerError<T> {
        fn into_response(self) -> Response {
            match self {
                ServerError::Inner { code, inner } if code.is_server_error() => {
                    error!(%code, ?inner, "Request failed");
                    (code, Json(ErrorEnvelope::new(INTERNAL_SERVER_ERROR_MESSAGE))).into_response()
                }
                ServerError::Inner { code, inner } => {
                    debug!(%code, ?inner, "Request rejected");
                    (code, Json(ErrorEnvelope::new(inner.to_string()))).into_response()
                }
                ServerError::Other { message } => {
                    error!(%message, "Internal server error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ErrorEnvelope::new(INTERNAL_SERVER_ERROR_MESSAGE)),
                    )
                        .into_response()
                }
            }
        }
    }

    impl<T> From<rusqlite::Error> for ServerError<T> {
        #[track_caller]
        fn from(err: rusqlite::Error) -> Self {
            Self::Other { message: format!("rusqlite: {err:?}") }
        }
    }

    impl<T> From<InteractError> for ServerError<T> {
        #[track_caller]
        fn from(err: InteractError) -> Self {
            Self::Other { message: format!("deadpool interact: {err}") }
        }
    }

    impl<T> From<PoolError> for ServerError<T> {
        #[track_caller]
        fn from(err: PoolError) -> Self {
            Self::Other { message: format!("deadpool pool: {err}") }
        }
    }

    impl From<ServerError<Nothing>> for HookError {
        fn from(err: ServerError<Nothing>) -> Self {
            Self::Message(err.to_string().into())
        }
    }
}
