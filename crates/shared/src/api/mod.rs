use const_format::concatcp;

pub mod envelope;
pub mod error;
pub mod response_errors;

pub const API_BASE_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Object {
    Health,
    Workout,
    WorkoutId,
}

impl Object {
    pub const fn path(&self) -> &str {
        use Object::*;
        match self {
            Health => concatcp!(API_BASE_PATH, "health"),
            Workout => concatcp!(API_BASE_PATH, "workouts"),
            WorkoutId => concatcp!(API_BASE_PATH, "workouts/:id"),
        }
    }

    /// Fills in the `:id` segment of the path
    pub fn id_path(&self, id: i64) -> String {
        self.path().replace(":id", &id.to_string())
    }
}
