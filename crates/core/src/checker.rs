//! # Message Checking
//!
//! Validates an argument bundle and checks every message against the pattern.
//!
//! The check is an AND over all messages: a single failing message fails the
//! run with the configured error text. Every message is evaluated and logged
//! before the outcome is decided, so the log always shows the full picture.

use tracing::{info, instrument};

use crate::errors::CommitCheckerError;
use crate::pattern::{validate_flags, Pattern};

#[cfg(test)]
#[path = "checker_tests.rs"]
mod tests;

/// Arguments for [`check_messages`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckerArguments {
    /// The regular expression to check the messages against
    pub pattern: String,

    /// Regex flags, may be empty
    pub flags: String,

    /// Error text reported when the check fails
    pub error: String,

    /// The messages to check, in order
    pub messages: Vec<String>,

    /// Invert the verdict: a message passes when it does not match
    pub fail_on_match: bool,
}

/// Checks the messages given by `args`.
///
/// The arguments are validated first, in this order: pattern, flags, error,
/// messages. The first failing validation is returned before any message is
/// evaluated.
///
/// # Errors
///
/// - a configuration error if the arguments are invalid
/// - [`CommitCheckerError::PatternSyntax`] if the pattern does not compile
/// - [`CommitCheckerError::PatternEvaluation`] if the pattern cannot be
///   evaluated against a message
/// - [`CommitCheckerError::MatchFailure`] with `args.error` if any message fails
///
/// # Examples
///
/// ```
/// use commit_message_checker_core::checker::{check_messages, CheckerArguments};
///
/// let args = CheckerArguments {
///     pattern: "^(feat|fix): ".to_string(),
///     flags: String::new(),
///     error: "Use a conventional commit prefix.".to_string(),
///     messages: vec!["feat: add login".to_string(), "wip".to_string()],
///     fail_on_match: false,
/// };
///
/// let err = check_messages(&args).unwrap_err();
/// assert_eq!(err.to_string(), "Use a conventional commit prefix.");
/// ```
#[instrument(skip(args), fields(messages = args.messages.len()))]
pub fn check_messages(args: &CheckerArguments) -> Result<(), CommitCheckerError> {
    if args.pattern.is_empty() {
        return Err(CommitCheckerError::PatternNotDefined);
    }

    validate_flags(&args.flags)?;

    if args.error.is_empty() {
        return Err(CommitCheckerError::ErrorNotDefined);
    }

    if args.messages.is_empty() {
        return Err(CommitCheckerError::MessagesNotDefined);
    }

    let pattern = Pattern::compile(&args.pattern, &args.flags)?;

    info!("Checking commit messages against \"{}\"...", args.pattern);

    let mut result = true;
    for message in &args.messages {
        if check_message(&pattern, message, args.fail_on_match)? {
            info!("- OK: \"{}\"", message);
        } else {
            info!("- failed: \"{}\"", message);
            result = false;
        }
    }

    if !result {
        return Err(CommitCheckerError::MatchFailure(args.error.clone()));
    }

    Ok(())
}

fn check_message(
    pattern: &Pattern,
    message: &str,
    fail_on_match: bool,
) -> Result<bool, CommitCheckerError> {
    Ok(pattern.is_match(message)? != fail_on_match)
}
