use serde::{Deserialize, Serialize};

use super::{Workout, WorkoutEntry};

/// Body of a partial update. Scalar fields left out are kept as they are.
/// `entries`, when present (even empty), replaces the whole entry list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateWorkout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<WorkoutEntry>>,
}

impl UpdateWorkout {
    pub fn apply_to(self, workout: &mut Workout) {
        if let Some(title) = self.title {
            workout.title = title;
        }
        if let Some(description) = self.description {
            workout.description = description;
        }
        if let Some(duration_minutes) = self.duration_minutes {
            workout.duration_minutes = duration_minutes;
        }
        if let Some(calories_burned) = self.calories_burned {
            workout.calories_burned = calories_burned;
        }
        if let Some(entries) = self.entries {
            workout.entries = entries;
        }
    }
}
