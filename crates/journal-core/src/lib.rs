//! journal-core - Core library for the journal service
//!
//! This crate provides the domain logic behind journal-server:
//!
//! - **types**: Entry records, update payloads and analysis results
//! - **db**: Direct SQLite database access
//! - **store**: Persistence trait the service is written against
//! - **llm**: Chat-completion client for entry analysis
//! - **entry**: The entry service orchestrating storage and analysis

#[cfg(feature = "db")]
pub mod db;
pub mod entry;
pub mod error;
pub mod llm;
pub mod store;
pub mod types;

// Re-export commonly used types
#[cfg(feature = "db")]
pub use db::Database;
pub use entry::EntryService;
pub use error::{Error, Result};
pub use llm::{ChatCompletion, LlmConfig};
pub use store::EntryStore;
pub use types::{AnalysisResult, Entry, EntryPatch, NewEntry, Sentiment};
