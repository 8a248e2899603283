//! Configuration settings for the commit message checker.
//!
//! This module centralizes the constants used throughout the crate together
//! with the typed configuration that is resolved once at the boundary and then
//! passed by reference into the collector and the checker.
use std::collections::BTreeSet;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::checker::CheckerArguments;
use crate::errors::CommitCheckerError;
use crate::pattern::validate_flags;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Regex flags accepted in the `flags` input
pub const ALLOWED_FLAGS: &str = "gimsuy";

/// Flags applied when the `flags` input is empty
pub const DEFAULT_FLAGS: &str = "gm";

/// Name of the option that enables checking the commits of a pull request
pub const CHECK_ALL_COMMIT_MESSAGES_OPTION: &str = "checkAllCommitMessages";

/// Name of the option that drops merge commits from the checked messages
pub const EXCLUDE_MERGE_COMMITS_OPTION: &str = "excludeMergeCommits";

lazy_static! {
    /// Matches every accepted flag character. Whatever survives a
    /// `replace_all` with this regex is invalid.
    pub static ref VALID_FLAGS_REGEX: Regex =
        Regex::new("[gimsuy]").expect("Failed to compile flags regex");

    /// Separators accepted between user names in the `excludeUsers` input
    static ref USER_LIST_SEPARATOR_REGEX: Regex =
        Regex::new(r"[,\r\n]+").expect("Failed to compile user list regex");
}

/// Options controlling which parts of an event become messages.
///
/// All options default to off. Requesting `check_all_commits` or
/// `exclude_merge_commits` requires a non-empty `access_token`, see
/// [`PullRequestOptions::validate`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PullRequestOptions {
    /// Do not include the pull request title in the composite message
    pub ignore_title: bool,

    /// Do not include the pull request description in the composite message
    pub ignore_description: bool,

    /// Also check every commit of the pull request
    pub check_all_commits: bool,

    /// Token used to query the developer platform
    pub access_token: Option<String>,

    /// Drop commits with more than one parent
    pub exclude_merge_commits: bool,

    /// Commits authored by any of these names or logins are not checked
    pub exclude_users: BTreeSet<String>,
}

impl PullRequestOptions {
    /// Returns `true` if a non-empty access token was supplied.
    pub fn has_access_token(&self) -> bool {
        self.access_token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty())
    }

    /// Ensures every option that needs the developer platform has a token.
    pub fn validate(&self) -> Result<(), CommitCheckerError> {
        if self.has_access_token() {
            return Ok(());
        }

        if self.check_all_commits {
            return Err(CommitCheckerError::MissingToken(
                CHECK_ALL_COMMIT_MESSAGES_OPTION,
            ));
        }

        if self.exclude_merge_commits {
            return Err(CommitCheckerError::MissingToken(EXCLUDE_MERGE_COMMITS_OPTION));
        }

        Ok(())
    }
}

impl fmt::Debug for PullRequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PullRequestOptions")
            .field("ignore_title", &self.ignore_title)
            .field("ignore_description", &self.ignore_description)
            .field("check_all_commits", &self.check_all_commits)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("exclude_merge_commits", &self.exclude_merge_commits)
            .field("exclude_users", &self.exclude_users)
            .finish()
    }
}

/// Complete configuration of one run, resolved from the user's inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckerConfiguration {
    /// The regular expression every message must match
    pub pattern: String,

    /// Regex flags, a subset of [`ALLOWED_FLAGS`]
    pub flags: String,

    /// Error text reported when a message fails the check
    pub error: String,

    /// Invert the check: a message fails when it matches
    pub fail_on_match: bool,

    /// Options for collecting the messages
    pub options: PullRequestOptions,
}

impl CheckerConfiguration {
    /// Validates the inputs that do not depend on the collected messages.
    ///
    /// The checks run in the same order as [`crate::checker::check_messages`]
    /// so that a run reports the same error whether or not any message was
    /// collected.
    pub fn validate(&self) -> Result<(), CommitCheckerError> {
        if self.pattern.is_empty() {
            return Err(CommitCheckerError::PatternNotDefined);
        }

        validate_flags(&self.flags)?;

        if self.error.is_empty() {
            return Err(CommitCheckerError::ErrorNotDefined);
        }

        self.options.validate()
    }

    /// Builds the argument bundle for the checker from the collected messages.
    pub fn to_checker_arguments(&self, messages: Vec<String>) -> CheckerArguments {
        CheckerArguments {
            pattern: self.pattern.clone(),
            flags: self.flags.clone(),
            error: self.error.clone(),
            messages,
            fail_on_match: self.fail_on_match,
        }
    }
}

/// Parses a boolean input. Only the literal `true` is true.
pub fn parse_bool_input(input: &str) -> bool {
    input.trim() == "true"
}

/// Parses a list of user names separated by commas or new lines.
///
/// Entries are trimmed and blank entries are dropped.
pub fn parse_user_list(input: &str) -> BTreeSet<String> {
    USER_LIST_SEPARATOR_REGEX
        .split(input)
        .map(str::trim)
        .filter(|user| !user.is_empty())
        .map(str::to_string)
        .collect()
}
