use thiserror::Error;

/// Result type for fleoptions operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving encryption options
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A deferred option setter rejected its configuration
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// A KMS provider name that is not one of local, aws, azure or gcp
    #[error("Unknown KMS provider: {0}")]
    UnknownKmsProvider(String),
}
