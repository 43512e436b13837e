use thiserror::Error;

#[derive(Error, Debug)]
pub enum SandboxError {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("No such entry: {0}")]
    NotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Not a file: {0}")]
    NotAFile(String),

    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SandboxError {
    /// True for errors the API surfaces as an application-level 404.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::InvalidIdentifier(_) | Self::NotFound(_) | Self::NotADirectory(_) | Self::NotAFile(_)
        )
    }
}
