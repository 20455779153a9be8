//! Upload client for pushing artifacts to anaconda.org

pub mod anaconda;
pub mod error;

use async_trait::async_trait;
pub use anaconda::AnacondaClient;
pub use error::UploadError;
use std::fmt;
use std::path::PathBuf;

/// Everything one upload call needs
#[derive(Clone)]
pub struct UploadRequest {
    /// Destination organization
    pub org: String,

    /// Authentication token for `org`
    pub token: String,

    /// Files to upload, in order
    pub files: Vec<PathBuf>,
}

impl UploadRequest {
    /// Client arguments after the program and its leading args
    ///
    /// `-t <token> upload --force -u <org> <files...>`
    pub fn args(&self) -> Vec<String> {
        self.args_with_token(&self.token)
    }

    /// Same as [`UploadRequest::args`] with the token masked, for logs
    pub fn redacted_args(&self) -> Vec<String> {
        self.args_with_token("***")
    }

    fn args_with_token(&self, token: &str) -> Vec<String> {
        let mut args = vec![
            "-t".to_string(),
            token.to_string(),
            "upload".to_string(),
            "--force".to_string(),
            "-u".to_string(),
            self.org.clone(),
        ];
        args.extend(self.files.iter().map(|f| f.display().to_string()));
        args
    }
}

// Hand-written so the token never reaches a log line
impl fmt::Debug for UploadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadRequest")
            .field("org", &self.org)
            .field("token", &"***")
            .field("files", &self.files)
            .finish()
    }
}

/// Trait for upload clients - allows for different implementations
#[async_trait]
pub trait UploadClient: Send + Sync {
    /// Make sure the client can be invoked, installing it if needed
    async fn ensure_available(&self) -> Result<(), UploadError>;

    /// Upload the files, overwriting same-named artifacts at the destination
    async fn upload(&self, request: &UploadRequest) -> Result<(), UploadError>;
}
