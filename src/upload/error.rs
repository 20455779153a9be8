//! Upload client errors

use thiserror::Error;

/// Error types for upload client operations
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload command is empty")]
    EmptyCommand,

    #[error("upload client '{0}' not found on PATH")]
    ClientNotFound(String),

    #[error("installing the upload client failed (exit code {code:?}): {stderr}")]
    InstallFailed { code: Option<i32>, stderr: String },

    #[error("upload failed (exit code {code:?})")]
    UploadFailed { code: Option<i32> },

    #[error("failed to run {program}: {message}")]
    Spawn { program: String, message: String },
}

impl UploadError {
    /// Exit code of the external process, when it produced one
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            UploadError::InstallFailed { code, .. } | UploadError::UploadFailed { code } => *code,
            _ => None,
        }
    }
}
