use std::collections::HashSet;

use super::{Workout, WorkoutEntry};
use crate::{api::error::ValidationError, model::ValidateModel};

impl WorkoutEntry {
    fn collect_errors(&self, index: usize, error_messages: &mut Vec<String>) {
        let mut push = |message: &str| error_messages.push(format!("entries[{index}]: {message}"));

        if self.exercise_name.trim().is_empty() {
            push("exercise_name must not be empty");
        }
        if self.sets < 0 {
            push("sets must not be negative");
        }
        if self.reps.is_some_and(|r| r < 0) {
            push("reps must not be negative");
        }
        if self.duration_seconds.is_some_and(|d| d < 0) {
            push("duration_seconds must not be negative");
        }
        if self.weight.is_some_and(|w| !w.is_finite() || w < 0.0) {
            push("weight must be a non-negative number");
        }
        // Rep based or timed, never both
        if self.reps.is_some() == self.duration_seconds.is_some() {
            push("exactly one of reps or duration_seconds must be set");
        }
    }
}

impl ValidateModel for Workout {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut error_messages = Vec::new();

        if self.title.trim().is_empty() {
            error_messages.push("title must not be empty".to_string());
        }
        if self.duration_minutes < 0 {
            error_messages.push("duration_minutes must not be negative".to_string());
        }
        if self.calories_burned < 0 {
            error_messages.push("calories_burned must not be negative".to_string());
        }

        let mut order_indexes = HashSet::new();
        for (i, entry) in self.entries.iter().enumerate() {
            entry.collect_errors(i, &mut error_messages);
            if !order_indexes.insert(entry.order_index) {
                error_messages.push(format!(
                    "entries[{i}]: order_index {} is used more than once",
                    entry.order_index
                ));
            }
        }

        if error_messages.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { error_messages })
        }
    }
}
