//! Spreadsheet-backed persistence for whole-document JSON storage.
//!
//! A spreadsheet exposed through a deployed web-hook script acts as the
//! backing store for a single JSON document. Reading the document is one HTTP
//! GET; writing it is one HTTP POST carrying the whole document.
//!
//! # Components
//!
//! - **DocumentAdapter**: the two-operation contract (`read`, `write`) that
//!   document stores consume
//! - **SheetAdapter**: the remote implementation, with an optional `sheetName`
//!   partition and a configurable failure policy
//! - **MemoryAdapter**: an in-process implementation for tests and offline runs
//!
//! # Example
//!
//! ```
//! use sheetdb_adapter::{ErrorPolicy, SheetAdapter, SheetAdapterConfig};
//!
//! let config = SheetAdapterConfig::new("https://script.example.com/exec")
//!     .with_sheet_name("messages")
//!     .with_error_policy(ErrorPolicy::Strict);
//!
//! let adapter = SheetAdapter::new(config).unwrap();
//! assert_eq!(
//!     adapter.request_url().as_str(),
//!     "https://script.example.com/exec?sheetName=messages"
//! );
//! ```

mod adapter;
mod error;
mod memory;
mod sheet;

pub use adapter::DocumentAdapter;
pub use error::{AdapterError, AdapterResult};
pub use memory::MemoryAdapter;
pub use sheet::{
    ErrorPolicy, SheetAdapter, SheetAdapterConfig, WriteAck, SHEET_NAME_PARAM, WRITE_SUCCESS,
};
