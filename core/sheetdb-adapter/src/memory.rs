//! In-process document adapter.

use crate::adapter::DocumentAdapter;
use crate::error::AdapterResult;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// Keeps the document in memory. Nothing survives the process.
#[derive(Debug)]
pub struct MemoryAdapter {
    document: RwLock<Value>,
    writes: AtomicUsize,
}

impl MemoryAdapter {
    /// Creates an adapter whose first `read` returns `initial`.
    pub fn new(initial: Value) -> Self {
        Self {
            document: RwLock::new(initial),
            writes: AtomicUsize::new(0),
        }
    }

    /// Returns a copy of the currently stored document.
    pub async fn snapshot(&self) -> Value {
        self.document.read().await.clone()
    }

    /// Number of completed writes.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Default for MemoryAdapter {
    fn default() -> Self {
        Self::new(Value::Object(Default::default()))
    }
}

#[async_trait]
impl DocumentAdapter for MemoryAdapter {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn read(&self) -> AdapterResult<Value> {
        Ok(self.document.read().await.clone())
    }

    async fn write(&self, document: &Value) -> AdapterResult<()> {
        *self.document.write().await = document.clone();
        let count = self.writes.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Stored document in memory (write #{})", count);
        Ok(())
    }
}
