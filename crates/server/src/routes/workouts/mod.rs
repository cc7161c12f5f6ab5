mod create;
pub use create::*;

mod delete;
pub use delete::*;

mod fetch;
pub use fetch::*;

mod update;
pub use update::*;
