pub mod cli;

pub mod db;

pub mod extract;

mod state;
pub use state::*;

pub mod routes;
