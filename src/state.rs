//! Application state shared by all handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::quiz::QuizBank;
use crate::session::{QuizEngine, SessionStore};

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Quiz rules over the loaded bank (read-only)
    pub engine: Arc<QuizEngine>,

    /// Per-browser quiz sessions
    pub sessions: SessionStore,

    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(bank: Arc<QuizBank>, config: AppConfig) -> Self {
        let engine = QuizEngine::new(
            bank,
            config.matcher(),
            config.draw_strategy,
            config.speech.clone(),
        );
        Self {
            engine: Arc::new(engine),
            sessions: SessionStore::new(),
            config: Arc::new(config),
        }
    }
}
