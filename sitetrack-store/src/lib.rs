//! # sitetrack-store
//!
//! JSON snapshot persistence for the project registry.
//!
//! Call [`save_snapshot`] to write a registry's collection as indented JSON
//! (atomic `.tmp` + rename), [`load_records`] to read one back while
//! skipping malformed records, and [`import_into`] to merge a snapshot file
//! into a live registry.

pub mod error;
pub mod snapshot;

pub use error::StoreError;
pub use snapshot::{
    import_into, load_records, save_snapshot, RecordBatch, DEFAULT_SNAPSHOT_FILENAME,
};
