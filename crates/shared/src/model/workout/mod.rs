use serde::{Deserialize, Serialize};

mod update;
pub use update::*;

mod validate;

#[cfg(feature = "backend")]
mod store;
#[cfg(feature = "backend")]
pub use store::*;

/// A workout and its ordered exercise entries.
///
/// An `id` of 0 means the workout hasn't been persisted yet. Missing fields
/// default when decoding so a create request only needs what it cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workout {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    pub entries: Vec<WorkoutEntry>,
}

/// One exercise within a workout. Entries are owned by their workout and are
/// only ever written or removed along with it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkoutEntry {
    pub id: i64,
    pub exercise_name: String,
    pub sets: i32,
    pub reps: Option<i32>,
    pub duration_seconds: Option<i32>,
    pub weight: Option<f64>,
    pub notes: String,
    /// Position within the parent workout, unique per workout
    pub order_index: i32,
}
