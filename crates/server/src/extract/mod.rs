mod payload;
pub use payload::*;

mod workout_id;
pub use workout_id::*;
