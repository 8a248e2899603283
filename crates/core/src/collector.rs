//! # Event Message Collector
//!
//! Derives the ordered list of messages to check from the payload of the
//! triggering event.
//!
//! For pull requests the title and description form a single message which is
//! always first, followed by the commit history when
//! [`PullRequestOptions::check_all_commits`] is set. For pushes every pushed
//! commit contributes its message in payload order. Commits are deduplicated
//! by id, and merge commits or commits by excluded authors are dropped when
//! the options ask for it.

use std::collections::HashSet;

use commit_message_checker_developer_platforms::models::CommitRecord;
use commit_message_checker_developer_platforms::CommitHistoryProvider;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::PullRequestOptions;
use crate::errors::CommitCheckerError;
use crate::history::{fetch_commit, fetch_pull_request_commits};
use crate::payload::{EventPayload, PullRequestPayload, PushCommit, PushPayload, RepositoryDetails};

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;

/// Separator between the pull request title and its description
pub const TITLE_DESCRIPTION_SEPARATOR: &str = "\n\n";

/// Parses the raw payload of `event_name` and collects its messages.
///
/// The options are validated before the payload is looked at, so a missing
/// access token is reported even for a malformed event.
///
/// # Errors
///
/// See [`EventPayload::parse`] and [`collect_messages`].
pub async fn collect_event_messages<P: CommitHistoryProvider + ?Sized>(
    event_name: &str,
    payload: Option<Value>,
    options: &PullRequestOptions,
    provider: &P,
) -> Result<Vec<String>, CommitCheckerError> {
    options.validate()?;

    let event = EventPayload::parse(event_name, payload)?;
    collect_messages(&event, options, provider).await
}

/// Collects the messages of a parsed event.
///
/// # Arguments
///
/// * `event` - The payload of the triggering event
/// * `options` - Which parts of the event become messages
/// * `provider` - Used to read commit history when the options require it
///
/// # Errors
///
/// - [`CommitCheckerError::MissingToken`] if an option needs an access token
/// - a payload shape error if a field required by the options is missing
/// - [`CommitCheckerError::RemoteFetch`] if the commit history cannot be read
#[instrument(skip(event, provider))]
pub async fn collect_messages<P: CommitHistoryProvider + ?Sized>(
    event: &EventPayload,
    options: &PullRequestOptions,
    provider: &P,
) -> Result<Vec<String>, CommitCheckerError> {
    options.validate()?;

    let messages = match event {
        EventPayload::PullRequest(payload) => {
            collect_pull_request_messages(payload, options, provider).await?
        }
        EventPayload::Push(payload) => collect_push_messages(payload, options, provider).await?,
    };

    debug!(count = messages.len(), "Collected messages");
    Ok(messages)
}

async fn collect_pull_request_messages<P: CommitHistoryProvider + ?Sized>(
    payload: &PullRequestPayload,
    options: &PullRequestOptions,
    provider: &P,
) -> Result<Vec<String>, CommitCheckerError> {
    let pull_request = &payload.pull_request;
    let mut messages = Vec::new();

    let mut message = String::new();
    if !options.ignore_title {
        let title = pull_request.title().ok_or(CommitCheckerError::NoTitle)?;
        message.push_str(title);
    }

    if !options.ignore_description {
        if let Some(body) = pull_request.body() {
            if !message.is_empty() {
                message.push_str(TITLE_DESCRIPTION_SEPARATOR);
            }
            message.push_str(body);
        }
    }

    if !message.is_empty() {
        messages.push(message);
    }

    if options.check_all_commits {
        let pr_number = pull_request.require_number()?;
        let repository = RepositoryDetails::require_coordinates(payload.repository.as_ref())?;

        let commits = fetch_pull_request_commits(
            provider,
            &repository.owner,
            &repository.name,
            pr_number,
            &options.exclude_users,
        )
        .await?;

        messages.extend(select_history_messages(commits, options.exclude_merge_commits));
    }

    Ok(messages)
}

async fn collect_push_messages<P: CommitHistoryProvider + ?Sized>(
    payload: &PushPayload,
    options: &PullRequestOptions,
    provider: &P,
) -> Result<Vec<String>, CommitCheckerError> {
    if payload.commits.is_empty() {
        debug!("The push payload does not contain any commits");
        return Ok(Vec::new());
    }

    let mut seen = HashSet::new();
    let mut selected: Vec<&PushCommit> = Vec::new();
    for commit in &payload.commits {
        if commit.message().is_none() {
            debug!(commit = commit.id(), "Skipping commit without a message");
            continue;
        }

        if commit.to_record().is_authored_by_any(&options.exclude_users) {
            info!(commit = commit.id(), "Skipping commit by an excluded author");
            continue;
        }

        if let Some(id) = commit.id() {
            if !seen.insert(id) {
                debug!(commit = id, "Skipping duplicate commit");
                continue;
            }
        }

        selected.push(commit);
    }

    if !options.exclude_merge_commits || selected.is_empty() {
        return Ok(selected
            .into_iter()
            .filter_map(PushCommit::message)
            .map(str::to_string)
            .collect());
    }

    let repository = RepositoryDetails::require_coordinates(payload.repository.as_ref())?;

    let mut messages = Vec::with_capacity(selected.len());
    for commit in selected {
        let sha = commit.id().ok_or(CommitCheckerError::NoCommitId)?;
        let record = fetch_commit(provider, &repository.owner, &repository.name, sha).await?;

        if record.is_merge_commit() {
            info!(commit = sha, "Skipping merge commit");
            continue;
        }

        if let Some(message) = commit.message() {
            messages.push(message.to_string());
        }
    }

    Ok(messages)
}

/// Extracts the messages of fetched commits in delivery order.
fn select_history_messages(commits: Vec<CommitRecord>, exclude_merge_commits: bool) -> Vec<String> {
    let mut seen = HashSet::new();

    commits
        .into_iter()
        .filter(|commit| {
            if exclude_merge_commits && commit.is_merge_commit() {
                info!(commit = commit.oid.as_deref(), "Skipping merge commit");
                return false;
            }

            match &commit.oid {
                Some(oid) => seen.insert(oid.clone()),
                None => true,
            }
        })
        .map(|commit| commit.message)
        .filter(|message| !message.is_empty())
        .collect()
}
