//! # Commit Message Checker Core
//!
//! Core business logic for checking commit and pull request messages against a
//! user supplied regular expression.
//!
//! A run collects the messages of the triggering event (the pull request title
//! and description, optionally the commit history of the pull request, or the
//! commits of a push) and checks every one of them against the pattern. The
//! run fails as soon as any message does not pass.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use commit_message_checker_developer_platforms::CommitHistoryProvider;
//! use commit_message_checker_core::{CommitMessageChecker, CheckOutcome, config::CheckerConfiguration};
//! use anyhow::Result;
//! use serde_json::json;
//!
//! async fn check_push<P: CommitHistoryProvider + std::fmt::Debug>(provider: P) -> Result<()> {
//!     let checker = CommitMessageChecker::new(provider);
//!
//!     let config = CheckerConfiguration {
//!         pattern: "^(feat|fix|docs|chore)(\\(.+\\))?: ".to_string(),
//!         flags: String::new(),
//!         error: "Commit messages must follow the Conventional Commits format.".to_string(),
//!         ..Default::default()
//!     };
//!
//!     let payload = json!({ "commits": [{ "id": "abc", "message": "feat: add login" }] });
//!
//!     match checker.process_event("push", Some(payload), &config).await? {
//!         CheckOutcome::Passed => println!("All commit messages are valid"),
//!         CheckOutcome::Skipped => println!("Nothing to check"),
//!     }
//!
//!     Ok(())
//! }
//! ```

use commit_message_checker_developer_platforms::CommitHistoryProvider;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

pub mod checker;

pub mod collector;

pub mod config;
use config::CheckerConfiguration;

pub mod errors;
use errors::CommitCheckerError;

pub mod history;

pub mod pattern;

pub mod payload;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Every collected message passed the check
    Passed,

    /// The event did not carry any message, nothing was checked
    Skipped,
}

/// Main struct for checking the messages of an event.
///
/// `CommitMessageChecker` owns the developer platform provider used to read
/// commit history and runs the collect-then-check pipeline for one event.
///
/// # Examples
///
/// ```rust,no_run
/// use commit_message_checker_developer_platforms::CommitHistoryProvider;
/// use commit_message_checker_core::{CommitMessageChecker, config::CheckerConfiguration};
/// use anyhow::Result;
///
/// async fn example<P: CommitHistoryProvider + std::fmt::Debug>(
///     provider: P,
///     config: CheckerConfiguration,
/// ) -> Result<()> {
///     let checker = CommitMessageChecker::new(provider);
///
///     let outcome = checker.process_event("pull_request", None, &config).await;
///     println!("Outcome: {:?}", outcome);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct CommitMessageChecker<P: CommitHistoryProvider + std::fmt::Debug> {
    provider: P,
}

impl<P: CommitHistoryProvider + std::fmt::Debug> CommitMessageChecker<P> {
    /// Creates a new `CommitMessageChecker` reading commit history from `provider`.
    ///
    /// # Arguments
    ///
    /// * `provider` - The developer platform provider
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Collects the messages of an event and checks them.
    ///
    /// The configuration is validated before the payload is read. An event
    /// without any message is not an error, the run is reported as
    /// [`CheckOutcome::Skipped`].
    ///
    /// # Arguments
    ///
    /// * `event_name` - The name of the triggering event, e.g. `pull_request`
    /// * `payload` - The raw JSON payload of the event
    /// * `config` - The resolved configuration of the run
    ///
    /// # Errors
    ///
    /// Returns the first error raised while validating the configuration,
    /// collecting the messages or checking them. A message that does not pass
    /// yields [`CommitCheckerError::MatchFailure`] carrying the configured
    /// error text.
    #[instrument(skip(self, payload, config))]
    pub async fn process_event(
        &self,
        event_name: &str,
        payload: Option<Value>,
        config: &CheckerConfiguration,
    ) -> Result<CheckOutcome, CommitCheckerError> {
        config.validate()?;

        debug!(options = ?config.options, "Collecting messages");
        let messages =
            collector::collect_event_messages(event_name, payload, &config.options, &self.provider)
                .await?;

        if messages.is_empty() {
            info!("No commits found in the payload, skipping check.");
            return Ok(CheckOutcome::Skipped);
        }

        let args = config.to_checker_arguments(messages);
        if let Err(e) = checker::check_messages(&args) {
            warn!(
                event = event_name,
                messages = args.messages.len(),
                "Commit message check failed"
            );
            return Err(e);
        }

        info!(
            event = event_name,
            messages = args.messages.len(),
            "All commit messages passed the check"
        );
        Ok(CheckOutcome::Passed)
    }
}
