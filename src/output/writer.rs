// src/output/writer.rs
//! Executes output operations by performing actual I/O.
//!
//! This module is the only place where files are written; everything
//! that produces output builds a [`DeliveryTarget`] and hands it here.

use super::types::{CompletedOperation, DeliveryTarget};
use crate::error::AppError;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Performs one output operation.
pub fn execute(target: &DeliveryTarget) -> Result<CompletedOperation, AppError> {
    let start = Instant::now();
    let bytes_written = match target {
        DeliveryTarget::WriteFile { path, bytes } => write_file(path, bytes)?,
        DeliveryTarget::CreateDirectory { path } => {
            create_directory(path)?;
            0
        }
    };

    Ok(CompletedOperation {
        path: target.path().clone(),
        bytes_written,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", bytes.len(), path.display());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)?;

    log::info!("Wrote file: {}", path.display());
    Ok(bytes.len())
}

fn create_directory(path: &Path) -> Result<(), AppError> {
    if path.exists() {
        if path.is_dir() {
            log::debug!("Directory already exists: {}", path.display());
            return Ok(());
        }
        return Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", path.display()),
        )));
    }

    fs::create_dir_all(path)?;
    log::info!("Created directory: {}", path.display());
    Ok(())
}
