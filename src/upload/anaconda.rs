//! anaconda-client subprocess implementation

use crate::upload::{UploadClient, UploadError, UploadRequest};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Client that shells out to the `anaconda` CLI
#[derive(Debug, Clone)]
pub struct AnacondaClient {
    /// Upload program, e.g. `anaconda`
    program: String,

    /// Arguments placed before the upload arguments
    leading_args: Vec<String>,

    /// Installer invoked when the program is missing
    install_command: Vec<String>,
}

impl AnacondaClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `upload_command` - Program and leading args
    /// * `install_command` - Installer program and args; empty disables installing
    ///
    /// # Errors
    /// Returns `UploadError::EmptyCommand` if `upload_command` is empty.
    pub fn new(upload_command: Vec<String>, install_command: Vec<String>) -> Result<Self, UploadError> {
        let mut parts = upload_command.into_iter();
        let program = parts.next().ok_or(UploadError::EmptyCommand)?;

        Ok(Self {
            program,
            leading_args: parts.collect(),
            install_command,
        })
    }

    /// The upload program name
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether the upload program resolves on PATH (or as a path)
    pub fn is_installed(&self) -> bool {
        which::which(self.program()).is_ok()
    }

    async fn install(&self) -> Result<(), UploadError> {
        let Some((program, args)) = self.install_command.split_first() else {
            return Err(UploadError::ClientNotFound(self.program().to_string()));
        };

        info!("Installing upload client: {}", self.install_command.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| UploadError::Spawn {
                program: program.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(
                "installer exited with code {:?}: {}",
                output.status.code(),
                stderr
            );
            return Err(UploadError::InstallFailed {
                code: output.status.code(),
                stderr,
            });
        }

        debug!("installer finished successfully");
        Ok(())
    }
}

#[async_trait]
impl UploadClient for AnacondaClient {
    async fn ensure_available(&self) -> Result<(), UploadError> {
        if self.is_installed() {
            debug!("upload client '{}' already available", self.program());
            return Ok(());
        }

        self.install().await?;

        if !self.is_installed() {
            return Err(UploadError::ClientNotFound(self.program().to_string()));
        }
        Ok(())
    }

    async fn upload(&self, request: &UploadRequest) -> Result<(), UploadError> {
        let program = &self.program;
        let leading = &self.leading_args;

        debug!(
            "Running {} {} {}",
            program,
            leading.join(" "),
            request.redacted_args().join(" ")
        );

        // stdout/stderr are inherited so the client's own messages reach the CI log
        let status = Command::new(program)
            .args(leading)
            .args(request.args())
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| UploadError::Spawn {
                program: program.clone(),
                message: e.to_string(),
            })?;

        if !status.success() {
            warn!("{} exited with code {:?}", program, status.code());
            return Err(UploadError::UploadFailed {
                code: status.code(),
            });
        }

        Ok(())
    }
}
