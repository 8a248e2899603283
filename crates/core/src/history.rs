//! # Commit History
//!
//! Reads commits from the developer platform and applies the author
//! exclusions of the run.

use std::collections::BTreeSet;

use commit_message_checker_developer_platforms::models::CommitRecord;
use commit_message_checker_developer_platforms::CommitHistoryProvider;
use tracing::{debug, info, instrument};

use crate::errors::CommitCheckerError;

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;

/// Retrieves the commits of a pull request, oldest first.
///
/// Commits authored by any entry of `exclude_users` are dropped.
///
/// # Arguments
///
/// * `provider` - The developer platform to query
/// * `repo_owner` - The owner of the repository
/// * `repo_name` - The name of the repository
/// * `pr_number` - The pull request number
/// * `exclude_users` - Author names or logins whose commits are not checked
///
/// # Errors
///
/// Returns [`CommitCheckerError::RemoteFetch`] if the platform query fails.
#[instrument(skip(provider))]
pub async fn fetch_pull_request_commits<P: CommitHistoryProvider + ?Sized>(
    provider: &P,
    repo_owner: &str,
    repo_name: &str,
    pr_number: u64,
    exclude_users: &BTreeSet<String>,
) -> Result<Vec<CommitRecord>, CommitCheckerError> {
    let commits = provider
        .list_pull_request_commits(repo_owner, repo_name, pr_number)
        .await?;

    debug!(
        repository_owner = repo_owner,
        repository = repo_name,
        pull_request = pr_number,
        count = commits.len(),
        "Fetched pull request commits",
    );

    if exclude_users.is_empty() {
        return Ok(commits);
    }

    let total = commits.len();
    let kept: Vec<CommitRecord> = commits
        .into_iter()
        .filter(|commit| !commit.is_authored_by_any(exclude_users))
        .collect();

    if kept.len() < total {
        info!(
            repository_owner = repo_owner,
            repository = repo_name,
            pull_request = pr_number,
            excluded = total - kept.len(),
            "Excluded commits by ignored authors",
        );
    }

    Ok(kept)
}

/// Retrieves a single commit.
///
/// # Errors
///
/// Returns [`CommitCheckerError::RemoteFetch`] if the platform query fails.
#[instrument(skip(provider))]
pub async fn fetch_commit<P: CommitHistoryProvider + ?Sized>(
    provider: &P,
    repo_owner: &str,
    repo_name: &str,
    sha: &str,
) -> Result<CommitRecord, CommitCheckerError> {
    let commit = provider.get_commit(repo_owner, repo_name, sha).await?;

    debug!(
        repository_owner = repo_owner,
        repository = repo_name,
        commit = sha,
        parents = commit.parent_count,
        "Fetched commit",
    );

    Ok(commit)
}
