use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::{ServerError, ValidationError};

macro_rules! response_error {
    ($name:ident {
        $(
            #[code($variant_code:expr)]
            #[error($($message:tt)*)]
            $variant:ident
            $({ $($var_struct_body_tt:tt)* })?
        ,)*
    }) => {

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
        pub enum $name {
            $(
                #[error($($message)*)]
                $variant $({
                    $($var_struct_body_tt)*
                })?,
            )*
        }

        impl From<$name> for ServerError<$name> {
            fn from(inner: $name) -> Self {
                let code = match &inner {
                    $( $name::$variant { .. } => $variant_code, )*
                };
                Self::Inner { code, inner }
            }
        }
    };
}

response_error!(WorkoutError {
    #[code(StatusCode::BAD_REQUEST)]
    #[error("invalid workout id")]
    InvalidId,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("invalid request sent")]
    InvalidPayload,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("{message}")]
    Validation { message: String },
    #[code(StatusCode::NOT_FOUND)]
    #[error("workout not found")]
    NotFound { id: i64 },
    #[code(StatusCode::REQUEST_TIMEOUT)]
    #[error("request timed out")]
    Timeout,
});

impl From<ValidationError> for WorkoutError {
    fn from(err: ValidationError) -> Self {
        Self::Validation { message: err.to_string() }
    }
}

impl WorkoutError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
