use commit_message_checker_core::errors::{CommitCheckerError, ErrorKind};
use commit_message_checker_developer_platforms::errors::Error as PlatformError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Authentication error
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Invalid arguments or event payload
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl CliError {
    /// The error text without the category prefix.
    ///
    /// For [`CliError::ValidationFailed`] this is the configured error text.
    pub fn detail(&self) -> &str {
        match self {
            CliError::ConfigError(detail)
            | CliError::AuthError(detail)
            | CliError::NetworkError(detail)
            | CliError::InvalidArguments(detail)
            | CliError::ValidationFailed(detail) => detail,
        }
    }
}

impl From<PlatformError> for CliError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::AuthError(_) => CliError::AuthError(err.to_string()),
            _ => CliError::NetworkError(err.to_string()),
        }
    }
}

impl From<CommitCheckerError> for CliError {
    fn from(err: CommitCheckerError) -> Self {
        match err.kind() {
            ErrorKind::MatchFailure => CliError::ValidationFailed(err.to_string()),
            ErrorKind::Configuration | ErrorKind::PatternSyntax => {
                CliError::ConfigError(err.to_string())
            }
            ErrorKind::Authorization => CliError::AuthError(err.to_string()),
            ErrorKind::PayloadShape => CliError::InvalidArguments(err.to_string()),
            ErrorKind::RemoteFetch => match err {
                CommitCheckerError::RemoteFetch(PlatformError::AuthError(_)) => {
                    CliError::AuthError(err.to_string())
                }
                _ => CliError::NetworkError(err.to_string()),
            },
        }
    }
}

impl std::process::Termination for CliError {
    fn report(self) -> std::process::ExitCode {
        match self {
            CliError::ConfigError(_) => std::process::ExitCode::from(2),
            CliError::AuthError(_) => std::process::ExitCode::from(3),
            CliError::NetworkError(_) => std::process::ExitCode::from(4),
            CliError::InvalidArguments(_) => std::process::ExitCode::from(5),
            CliError::ValidationFailed(_) => std::process::ExitCode::from(1),
        }
    }
}
