// src/output/types.rs
//! Type definitions for output operations.

use std::path::PathBuf;

/// A single filesystem operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    /// Write bytes to a file, creating parent directories
    WriteFile { path: PathBuf, bytes: Vec<u8> },
    /// Create a directory
    CreateDirectory { path: PathBuf },
}

impl DeliveryTarget {
    pub fn path(&self) -> &PathBuf {
        match self {
            DeliveryTarget::WriteFile { path, .. } | DeliveryTarget::CreateDirectory { path } => {
                path
            }
        }
    }
}

/// Result of a batch of output operations.
#[derive(Debug, Clone, Default)]
pub struct OutputReport {
    /// Successfully completed operations
    pub completed: Vec<CompletedOperation>,
    /// Failed operations with errors
    pub failed: Vec<FailedOperation>,
    /// Execution statistics
    pub stats: ExecutionStats,
}

impl OutputReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a completed operation to the report.
    pub fn with_completed(mut self, operation: CompletedOperation) -> Self {
        self.stats.operations_completed += 1;
        self.stats.bytes_written += operation.bytes_written;
        self.stats.total_duration_ms += operation.duration_ms;
        self.completed.push(operation);
        self
    }

    /// Adds a failed operation to the report.
    pub fn with_failed(mut self, operation: FailedOperation) -> Self {
        self.stats.operations_failed += 1;
        self.failed.push(operation);
        self
    }

    /// Checks if all operations succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A successfully completed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedOperation {
    pub path: PathBuf,
    pub bytes_written: usize,
    pub duration_ms: u64,
}

/// A failed operation: what it was for and why it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedOperation {
    pub subject: String,
    pub error: String,
}

/// Execution statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    pub operations_completed: usize,
    pub operations_failed: usize,
    pub bytes_written: usize,
    pub total_duration_ms: u64,
}
