//! Persistence: storage backends, auto-save, and document management.

mod autosave;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use autosave::{AutosaveManager, DEFAULT_AUTOSAVE_DEBOUNCE_MS, LAST_DOCUMENT_KEY};
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::document::{now_millis, Document};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("storage error: {0}")]
    Other(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async storage operations (object-safe, WASM-friendly).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A document storage backend keyed by document id.
///
/// Implementations are Send + Sync on native targets; on WASM the bounds
/// are relaxed since everything runs on one thread.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    fn save(&self, id: &str, document: &Document) -> BoxFuture<'_, StorageResult<()>>;

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Document>>;

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all stored document ids.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

#[cfg(target_arch = "wasm32")]
pub trait Storage {
    fn save(&self, id: &str, document: &Document) -> BoxFuture<'_, StorageResult<()>>;

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Document>>;

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all stored document ids.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Load every stored document, newest first by update time.
///
/// Documents that fail to load or parse are skipped with a warning rather
/// than failing the whole listing.
pub async fn load_all_documents<S: Storage>(storage: &S) -> StorageResult<Vec<Document>> {
    let mut ids = storage.list().await?;
    ids.retain(|id| id != LAST_DOCUMENT_KEY);

    let mut documents = Vec::with_capacity(ids.len());
    for id in ids {
        match storage.load(&id).await {
            Ok(doc) => documents.push(doc),
            Err(err) => log::warn!("skipping unreadable document {id}: {err}"),
        }
    }
    documents.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Ok(documents)
}

/// Store a copy of a document under a fresh id with a " (Copy)" name.
pub async fn duplicate_document<S: Storage>(storage: &S, id: &str) -> StorageResult<Document> {
    let source = storage.load(id).await?;
    let mut copy = source;
    copy.id = crate::document::generate_document_id();
    copy.name = format!("{} (Copy)", copy.name);
    let now = now_millis();
    copy.created_at = now;
    copy.updated_at = now;
    storage.save(&copy.id, &copy).await?;
    Ok(copy)
}

/// Rename a stored document in place.
pub async fn rename_document<S: Storage>(
    storage: &S,
    id: &str,
    name: &str,
) -> StorageResult<Document> {
    let mut document = storage.load(id).await?;
    document.name = name.to_string();
    document.touch();
    storage.save(id, &document).await?;
    Ok(document)
}

/// Case-insensitive substring search over document names.
pub async fn search_documents<S: Storage>(
    storage: &S,
    query: &str,
) -> StorageResult<Vec<Document>> {
    let needle = query.to_lowercase();
    let mut documents = load_all_documents(storage).await?;
    documents.retain(|d| d.name.to_lowercase().contains(&needle));
    Ok(documents)
}

/// Delete a document, clearing the last-opened slot if it pointed at it.
pub async fn delete_document<S: Storage>(storage: &S, id: &str) -> StorageResult<()> {
    storage.delete(id).await?;
    if let Ok(last) = storage.load(LAST_DOCUMENT_KEY).await {
        if last.id == id {
            storage.delete(LAST_DOCUMENT_KEY).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn block_on<F: std::future::Future>(f: F) -> F::Output {
    // Minimal polling executor; storage futures never actually suspend
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {}
        }
    }
}
