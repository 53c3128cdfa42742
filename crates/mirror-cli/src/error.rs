//! Error types for mirror-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from mirror-core
    #[error(transparent)]
    Core(#[from] mirror_core::Error),
}
