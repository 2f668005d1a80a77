//! Debounced auto-save.
//!
//! Every scene mutation marks the manager dirty and restarts the debounce
//! timer; a save fires once the document has been quiet for the debounce
//! delay. The host drives this by calling [`AutosaveManager::maybe_save`]
//! from its tick loop. Failures surface as a status the host can show,
//! never as interruptions of the drawing path.

use crate::document::Document;
use crate::storage::{Storage, StorageResult};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default auto-save debounce delay in milliseconds.
pub const DEFAULT_AUTOSAVE_DEBOUNCE_MS: u64 = 500;

/// Storage key for the "last opened" document slot.
pub const LAST_DOCUMENT_KEY: &str = "__last_document__";

pub struct AutosaveManager<S: Storage> {
    storage: Arc<S>,
    debounce: Duration,
    /// When the document last changed; the debounce window counts from here.
    last_change: Option<Instant>,
    dirty: bool,
    current_doc_id: Option<String>,
}

impl<S: Storage> AutosaveManager<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            debounce: Duration::from_millis(DEFAULT_AUTOSAVE_DEBOUNCE_MS),
            last_change: None,
            dirty: false,
            current_doc_id: None,
        }
    }

    pub fn set_debounce(&mut self, debounce: Duration) {
        self.debounce = debounce;
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Record a document mutation, restarting the debounce window.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
        self.last_change = Some(Instant::now());
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_document_id(&mut self, id: Option<String>) {
        self.current_doc_id = id;
    }

    pub fn document_id(&self) -> Option<&str> {
        self.current_doc_id.as_deref()
    }

    /// Whether the document is dirty and has been quiet long enough.
    pub fn should_save(&self) -> bool {
        if !self.dirty {
            return false;
        }
        match self.last_change {
            Some(changed) => changed.elapsed() >= self.debounce,
            None => true,
        }
    }

    /// Save if the debounce window has elapsed; returns whether it did.
    pub async fn maybe_save(&mut self, document: &Document) -> StorageResult<bool> {
        if !self.should_save() {
            return Ok(false);
        }
        self.save(document).await?;
        Ok(true)
    }

    /// Save immediately, also refreshing the last-opened slot.
    pub async fn save(&mut self, document: &Document) -> StorageResult<()> {
        let doc_id = self
            .current_doc_id
            .clone()
            .unwrap_or_else(|| document.id.clone());
        self.storage.save(&doc_id, document).await?;
        self.storage.save(LAST_DOCUMENT_KEY, document).await?;
        self.dirty = false;
        self.last_change = None;
        log::debug!("autosaved document {doc_id}");
        Ok(())
    }

    pub async fn load(&mut self, id: &str) -> StorageResult<Document> {
        let document = self.storage.load(id).await?;
        self.current_doc_id = Some(id.to_string());
        self.dirty = false;
        self.last_change = None;
        Ok(document)
    }

    /// The document from the last-opened slot, if one was saved.
    pub async fn load_last(&mut self) -> Option<Document> {
        match self.storage.load(LAST_DOCUMENT_KEY).await {
            Ok(document) => {
                self.current_doc_id = Some(document.id.clone());
                self.dirty = false;
                self.last_change = None;
                Some(document)
            }
            Err(_) => None,
        }
    }

    pub async fn list_documents(&self) -> StorageResult<Vec<String>> {
        let mut ids = self.storage.list().await?;
        ids.retain(|id| id != LAST_DOCUMENT_KEY);
        Ok(ids)
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}
