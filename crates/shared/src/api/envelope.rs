use serde::{Deserialize, Serialize};

use crate::model::Workout;

/// Success body: `{"workout": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEnvelope {
    pub workout: Workout,
}

impl From<Workout> for WorkoutEnvelope {
    fn from(workout: Workout) -> Self {
        Self { workout }
    }
}

/// Failure body: `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new<S: Into<String>>(error: S) -> Self {
        Self { error: error.into() }
    }
}
