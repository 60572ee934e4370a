// src/output/mod.rs
//! Output handling: CSV export and media files.
//!
//! Producers build [`DeliveryTarget`]s from pure path and serialization
//! functions; [`execute`] is the only place that touches the filesystem.

pub mod csv;
mod paths;
mod types;
mod writer;

// Re-export the public interface
pub use paths::{
    extension_from_url, media_file_name, media_path, sanitize_filename, with_name_suffix,
    FALLBACK_EXTENSION,
};
pub use types::{CompletedOperation, DeliveryTarget, ExecutionStats, FailedOperation, OutputReport};
pub use writer::execute;
