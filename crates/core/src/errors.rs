use commit_message_checker_developer_platforms::errors::Error as PlatformError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Broad classes of [`CommitCheckerError`].
///
/// Every class is fatal for the run. Only [`ErrorKind::MatchFailure`] is an
/// expected business outcome; the others indicate a misconfigured workflow, an
/// unexpected event payload or an unreachable platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Empty pattern, error or messages, or invalid flags
    Configuration,

    /// The pattern is not a valid regular expression or could not be evaluated
    PatternSyntax,

    /// The event payload is missing a required field or the event is unsupported
    PayloadShape,

    /// A feature requiring an access token was requested without one
    Authorization,

    /// The developer platform could not be queried
    RemoteFetch,

    /// One or more messages did not pass the check
    MatchFailure,
}

#[derive(Error, Debug)]
pub enum CommitCheckerError {
    #[error("PATTERN not defined.")]
    PatternNotDefined,

    #[error("FLAGS contains invalid characters \"{0}\".")]
    InvalidFlags(String),

    #[error("ERROR not defined.")]
    ErrorNotDefined,

    #[error("MESSAGES not defined.")]
    MessagesNotDefined,

    #[error("PATTERN is not a valid regular expression: {0}")]
    PatternSyntax(#[from] regex::Error),

    #[error("PATTERN could not be evaluated: {0}")]
    PatternEvaluation(#[from] fancy_regex::Error),

    #[error("No payload found in the context.")]
    NoPayload,

    #[error("No pull_request found in the payload.")]
    NoPullRequest,

    #[error("No title found in the pull_request.")]
    NoTitle,

    #[error("No number found in the pull_request.")]
    NoNumber,

    #[error("No repository found in the payload.")]
    NoRepository,

    #[error("No name found in the repository.")]
    NoRepositoryName,

    #[error("No owner found in the repository.")]
    NoRepositoryOwner,

    #[error("No id found in the commit.")]
    NoCommitId,

    #[error("The payload does not have the expected shape: {0}")]
    InvalidPayload(String),

    #[error("Event \"{0}\" is not supported.")]
    UnsupportedEvent(String),

    /// The named option needs an access token to query the platform.
    #[error("The `{0}` option requires a github access token.")]
    MissingToken(&'static str),

    #[error("Failed to fetch commit information: {0}")]
    RemoteFetch(#[from] PlatformError),

    /// Carries the user configured error text verbatim.
    #[error("{0}")]
    MatchFailure(String),
}

impl CommitCheckerError {
    /// Returns the class the error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommitCheckerError::PatternNotDefined
            | CommitCheckerError::InvalidFlags(_)
            | CommitCheckerError::ErrorNotDefined
            | CommitCheckerError::MessagesNotDefined => ErrorKind::Configuration,
            CommitCheckerError::PatternSyntax(_) | CommitCheckerError::PatternEvaluation(_) => {
                ErrorKind::PatternSyntax
            }
            CommitCheckerError::NoPayload
            | CommitCheckerError::NoPullRequest
            | CommitCheckerError::NoTitle
            | CommitCheckerError::NoNumber
            | CommitCheckerError::NoRepository
            | CommitCheckerError::NoRepositoryName
            | CommitCheckerError::NoRepositoryOwner
            | CommitCheckerError::NoCommitId
            | CommitCheckerError::InvalidPayload(_)
            | CommitCheckerError::UnsupportedEvent(_) => ErrorKind::PayloadShape,
            CommitCheckerError::MissingToken(_) => ErrorKind::Authorization,
            CommitCheckerError::RemoteFetch(_) => ErrorKind::RemoteFetch,
            CommitCheckerError::MatchFailure(_) => ErrorKind::MatchFailure,
        }
    }
}
