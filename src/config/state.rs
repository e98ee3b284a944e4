// Application state module
// Process-wide state built once at startup and shared by every request

use std::sync::Arc;

use super::types::Config;
use crate::store::StudentStore;

/// Application state
pub struct AppState {
    pub config: Config,
    pub students: Arc<StudentStore>,
}

impl AppState {
    pub fn new(config: Config, students: Arc<StudentStore>) -> Self {
        Self { config, students }
    }

    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}
