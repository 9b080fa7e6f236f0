//! Application state.

use journal_core::{ChatCompletion, Database, EntryService};
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Database connection (also backs the entry service)
    pub db: Arc<Database>,
    /// Entry CRUD and analysis
    pub entries: Arc<EntryService>,
    /// Whether the inference client can send requests
    pub llm_configured: bool,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config, db: Database, llm: Arc<dyn ChatCompletion>) -> Arc<Self> {
        let db = Arc::new(db);
        let llm_configured = llm.is_configured();
        let entries = EntryService::new(db.clone(), llm, &config.llm);
        Arc::new(Self {
            config: Arc::new(config),
            entries: Arc::new(entries),
            llm_configured,
            db,
            start_time: Instant::now(),
        })
    }
}
