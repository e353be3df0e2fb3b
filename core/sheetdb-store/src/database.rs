//! Document store backed by a [`DocumentAdapter`].

use crate::error::{StoreError, StoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sheetdb_adapter::DocumentAdapter;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Typed document held in memory and persisted through an adapter.
///
/// The lock around the data is never held across an adapter call, so slow
/// network round trips do not block readers of the in-memory value.
///
/// After a failed [`read`](Database::read) the in-memory value no longer
/// reflects the stored document, and writes are refused with
/// [`StoreError::Stale`] until a read succeeds.
pub struct Database<T, A> {
    adapter: A,
    default_data: T,
    data: RwLock<T>,
    stale: AtomicBool,
}

impl<T, A> Database<T, A>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
    A: DocumentAdapter,
{
    /// Creates a store whose data starts as `default_data`.
    pub fn new(adapter: A, default_data: T) -> Self {
        Self {
            adapter,
            data: RwLock::new(default_data.clone()),
            default_data,
            stale: AtomicBool::new(false),
        }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Reloads the data from the adapter, replacing the in-memory value.
    ///
    /// A `null` document resets the data to the default. If the document
    /// does not decode as `T`, the in-memory value is left untouched.
    pub async fn read(&self) -> StoreResult<()> {
        match self.load().await {
            Ok(loaded) => {
                *self.data.write().await = loaded;
                self.stale.store(false, Ordering::SeqCst);
                Ok(())
            }
            Err(e) => {
                self.stale.store(true, Ordering::SeqCst);
                warn!("Read through {} failed, writes disabled: {e}", self.adapter.name());
                Err(e)
            }
        }
    }

    async fn load(&self) -> StoreResult<T> {
        let document = self.adapter.read().await?;

        if document.is_null() {
            debug!("{} returned no document, using defaults", self.adapter.name());
            return Ok(self.default_data.clone());
        }

        serde_json::from_value(document).map_err(StoreError::Decode)
    }

    /// Returns true if the last read failed.
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }

    fn ensure_fresh(&self) -> StoreResult<()> {
        if self.is_stale() {
            return Err(StoreError::Stale);
        }
        Ok(())
    }

    /// Persists a snapshot of the current data through the adapter.
    pub async fn write(&self) -> StoreResult<()> {
        self.ensure_fresh()?;
        let snapshot = {
            let data = self.data.read().await;
            serde_json::to_value(&*data).map_err(StoreError::Encode)?
        };

        self.write_snapshot(snapshot).await
    }

    /// Applies `f` to the data and returns its result. Does not persist.
    pub async fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut data = self.data.write().await;
        f(&mut *data)
    }

    /// Applies `f` to the data, then persists the result.
    ///
    /// `f` is not called when writes are disabled.
    pub async fn update_and_write<R>(&self, f: impl FnOnce(&mut T) -> R) -> StoreResult<R> {
        self.ensure_fresh()?;
        let (result, snapshot) = {
            let mut data = self.data.write().await;
            let result = f(&mut *data);
            let snapshot = serde_json::to_value(&*data).map_err(StoreError::Encode)?;
            (result, snapshot)
        };

        self.write_snapshot(snapshot).await?;
        Ok(result)
    }

    /// Returns a copy of the current data.
    pub async fn data(&self) -> T {
        self.data.read().await.clone()
    }

    async fn write_snapshot(&self, snapshot: Value) -> StoreResult<()> {
        self.adapter.write(&snapshot).await?;
        info!("Saved document through {}", self.adapter.name());
        Ok(())
    }
}
