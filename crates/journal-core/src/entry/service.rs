//! Entry service implementation.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::llm::{ChatCompletion, LlmConfig};
use crate::store::EntryStore;
use crate::types::{AnalysisResult, Entry, EntryPatch, NewEntry, timestamp_now};

use super::{build_analysis_request, parse_analysis};

/// Journal entry service.
///
/// Each method is a single request/response against its collaborators; no
/// state is kept between calls. Not-found is reported as `Ok(None)`.
pub struct EntryService {
    store: Arc<dyn EntryStore>,
    llm: Arc<dyn ChatCompletion>,
    config: LlmConfig,
}

impl EntryService {
    /// Create a new entry service.
    pub fn new(store: Arc<dyn EntryStore>, llm: Arc<dyn ChatCompletion>, config: &LlmConfig) -> Self {
        debug!("EntryService initialized (model {})", config.model);
        Self {
            store,
            llm,
            config: config.clone(),
        }
    }

    /// Create a new entry, stamping both timestamps with the current time.
    pub async fn create(&self, entry: NewEntry) -> Result<Entry> {
        info!("Creating entry");
        let created = self.store.create(&entry, timestamp_now()).await?;
        debug!("Entry created: {}", created.id);
        Ok(created)
    }

    /// List all entries in storage order.
    pub async fn list(&self) -> Result<Vec<Entry>> {
        info!("Fetching all entries");
        let entries = self.store.list().await?;
        debug!("Fetched {} entries", entries.len());
        Ok(entries)
    }

    /// Get a specific entry.
    pub async fn get(&self, id: &str) -> Result<Option<Entry>> {
        info!("Fetching entry {}", id);
        let entry = self.store.get(id).await?;
        if entry.is_some() {
            debug!("Entry {} found", id);
        } else {
            warn!("Entry {} not found", id);
        }
        Ok(entry)
    }

    /// Update an existing entry.
    ///
    /// Read-then-write without a version check: concurrent updates to the
    /// same id are last-write-wins. `created_at` is carried over from the
    /// stored record and `updated_at` always moves forward.
    pub async fn update(&self, id: &str, patch: EntryPatch) -> Result<Option<Entry>> {
        info!("Updating entry {}", id);
        let Some(existing) = self.store.get(id).await? else {
            warn!("Entry {} not found. Update aborted.", id);
            return Ok(None);
        };

        let mut updated = existing.clone();
        updated.apply(patch);
        updated.id = id.to_string();
        updated.created_at = existing.created_at;
        updated.updated_at = timestamp_now().max(existing.updated_at + Duration::milliseconds(1));

        self.store.update(&updated).await?;
        debug!("Entry {} updated", id);
        Ok(Some(updated))
    }

    /// Delete a specific entry. Missing ids are not an error.
    pub async fn delete(&self, id: &str) -> Result<()> {
        info!("Deleting entry {}", id);
        self.store.delete(id).await?;
        debug!("Entry {} deleted", id);
        Ok(())
    }

    /// Delete all entries.
    pub async fn delete_all(&self) -> Result<()> {
        info!("Deleting all entries");
        self.store.delete_all().await?;
        debug!("All entries deleted");
        Ok(())
    }

    /// Analyze an entry with the configured model.
    ///
    /// Returns `Ok(None)` without contacting the model when the entry does
    /// not exist. The result is not persisted.
    pub async fn analyze(&self, id: &str) -> Result<Option<AnalysisResult>> {
        info!("Analyzing entry {}", id);
        let Some(entry) = self.store.get(id).await? else {
            warn!("Entry {} not found. Analysis aborted.", id);
            return Ok(None);
        };

        debug!("Combined entry text: {}", entry.analysis_text());
        let request = build_analysis_request(&entry, &self.config)?;
        let content = self.llm.complete(&request).await?;

        let analysis = parse_analysis(content.as_deref()).inspect_err(|e| {
            if matches!(e, Error::EmptyResponse) {
                error!("Empty response from LLM");
            } else {
                warn!("Unparseable analysis for entry {}: {}", id, e);
            }
        })?;
        debug!(
            "Parsed analysis for entry {}: sentiment {}, topics {:?}",
            id,
            analysis.sentiment.as_str(),
            analysis.topics
        );

        Ok(Some(analysis))
    }
}
