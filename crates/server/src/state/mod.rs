use std::sync::Arc;

use axum::extract::FromRef;
use deadpool_sqlite::Pool;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: Pool,
    pub args: Arc<Cli>,
}

impl FromRef<AppState> for Pool {
    fn from_ref(state: &AppState) -> Self {
        // pool uses an Arc internally so clone is cheap
        state.pool.clone()
    }
}
