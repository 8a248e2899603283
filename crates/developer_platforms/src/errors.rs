#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Error types for developer platform operations.
///
/// This enum represents the failures that can occur while reading commit
/// history from a developer platform like GitHub. None of these errors are
/// retried locally; they are reported to the caller as-is.
///
/// # Examples
///
/// ```rust
/// use commit_message_checker_developer_platforms::errors::Error;
///
/// let auth_error = Error::AuthError("Bad credentials".to_string());
/// assert_eq!(auth_error.to_string(), "Authentication failed: Bad credentials");
///
/// let rate_limit = Error::RateLimitExceeded;
/// assert_eq!(rate_limit.to_string(), "Rate limit exceeded");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Generic API request failure.
    ///
    /// The string parameter carries the message reported by the platform or
    /// by the HTTP client.
    #[error("API request failed: {0}")]
    ApiError(String),

    /// Authentication failed with the platform.
    ///
    /// The access token is missing, invalid, expired or lacks the scopes
    /// required to read the repository.
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// The GraphQL endpoint answered the request but reported errors in the
    /// response body.
    #[error("GraphQL query failed: {0}")]
    GraphQlError(String),

    /// Invalid response format from platform API.
    ///
    /// The response could be read but did not have the expected structure,
    /// e.g. a missing `data` object.
    #[error("Invalid response format")]
    InvalidResponse,

    /// The requested repository, pull request or commit does not exist or is
    /// not visible with the current credentials.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Platform rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}
