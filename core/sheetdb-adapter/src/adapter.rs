//! Document adapter abstraction trait.
//!
//! A document store persists its entire state through exactly two calls:
//! load the whole document, and replace the whole document.

use crate::error::AdapterResult;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Whole-document persistence backend.
#[async_trait]
pub trait DocumentAdapter: Send + Sync {
    /// Short human-readable backend name, used in logs.
    fn name(&self) -> &'static str;

    /// Loads the entire persisted document.
    async fn read(&self) -> AdapterResult<Value>;

    /// Replaces the entire persisted document with `document`.
    async fn write(&self, document: &Value) -> AdapterResult<()>;
}

#[async_trait]
impl<A: DocumentAdapter + ?Sized> DocumentAdapter for Box<A> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn read(&self) -> AdapterResult<Value> {
        (**self).read().await
    }

    async fn write(&self, document: &Value) -> AdapterResult<()> {
        (**self).write(document).await
    }
}

#[async_trait]
impl<A: DocumentAdapter + ?Sized> DocumentAdapter for Arc<A> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn read(&self) -> AdapterResult<Value> {
        (**self).read().await
    }

    async fn write(&self, document: &Value) -> AdapterResult<()> {
        (**self).write(document).await
    }
}
