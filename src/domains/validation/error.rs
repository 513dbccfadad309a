//! Validation-specific error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running the FHIR validator.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The validator jar is not where the configuration says it is.
    #[error("Validator jar not found at {}", .0.display())]
    MissingValidator(PathBuf),

    /// The resource could not be staged in a temporary file.
    #[error("Failed to write temporary resource file: {0}")]
    TempFile(#[source] std::io::Error),

    /// The validator process could not be started.
    #[error("Failed to run validator: {0}")]
    Spawn(#[source] std::io::Error),

    /// The validator did not finish in time.
    #[error("Validator timed out after {0} seconds")]
    Timeout(u64),

    /// The validator exited with a status other than 0 or 1.
    #[error("Validator exited with status {code}: {stderr}")]
    ExitStatus { code: String, stderr: String },

    /// The validator printed nothing on stdout or stderr.
    #[error("No output from validator")]
    NoOutput,
}

impl ValidationError {
    /// Create an exit status error from a process status and its stderr.
    pub fn exit_status(status: std::process::ExitStatus, stderr: &[u8]) -> Self {
        Self::ExitStatus {
            code: status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "terminated by signal".to_string()),
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }
}
