//! Typed whole-document store.
//!
//! A [`Database`] keeps one value of type `T` in memory and loads or saves it
//! as a whole through a [`DocumentAdapter`]. Callers mutate the in-memory
//! value and then call [`Database::write`] to persist the full snapshot.

mod database;
mod error;

pub use database::Database;
pub use error::{StoreError, StoreResult};
pub use sheetdb_adapter::DocumentAdapter;
