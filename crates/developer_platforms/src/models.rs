//! # Models
//!
//! This module contains the data models used to describe commit history read
//! from a developer platform.
//!
//! [`CommitRecord`] is the platform independent view handed to the checker.
//! The remaining types mirror the shape of the GitHub GraphQL responses and
//! are only used while decoding them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// A commit as seen by the checker.
///
/// Records are created per request and discarded once the message has been
/// extracted. The parent count decides whether the commit is a merge commit
/// and the author fields decide whether the commit belongs to an excluded
/// user.
///
/// # Examples
///
/// ```
/// use commit_message_checker_developer_platforms::models::CommitRecord;
///
/// let record = CommitRecord {
///     oid: Some("6dcb09b5b57875f334f61aebed695e2e4193db5e".to_string()),
///     message: "Merge branch 'main' into feature".to_string(),
///     parent_count: 2,
///     author_name: Some("Monalisa Octocat".to_string()),
///     author_login: Some("octocat".to_string()),
/// };
///
/// assert!(record.is_merge_commit());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// The commit SHA, if the platform reported it
    pub oid: Option<String>,

    /// The full commit message
    pub message: String,

    /// The number of parents of the commit
    pub parent_count: u64,

    /// The git author name of the commit
    pub author_name: Option<String>,

    /// The platform login of the author, if the author maps to an account
    pub author_login: Option<String>,
}

impl CommitRecord {
    /// Returns `true` if the commit has more than one parent.
    pub fn is_merge_commit(&self) -> bool {
        self.parent_count > 1
    }

    /// Returns `true` if either the author name or the author login is in `users`.
    pub fn is_authored_by_any(&self, users: &BTreeSet<String>) -> bool {
        if users.is_empty() {
            return false;
        }

        [&self.author_name, &self.author_login]
            .into_iter()
            .flatten()
            .any(|author| users.contains(author))
    }
}

/// Envelope of every GraphQL response.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,

    #[serde(default)]
    pub errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlErrorMessage {
    pub message: String,

    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PullRequestCommitsData {
    pub repository: Option<PullRequestRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PullRequestRepository {
    pub pull_request: Option<PullRequestCommits>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PullRequestCommits {
    pub commits: CommitConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommitConnection {
    #[serde(default)]
    pub page_info: PageInfo,

    #[serde(default)]
    pub edges: Vec<CommitEdge>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,

    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitEdge {
    pub node: Option<CommitNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitNode {
    pub commit: GitCommit,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitData {
    pub repository: Option<CommitRepository>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitRepository {
    pub object: Option<GitCommit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GitCommit {
    pub oid: Option<String>,

    #[serde(default)]
    pub message: String,

    pub parents: Option<ParentConnection>,

    pub author: Option<GitActor>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ParentConnection {
    pub total_count: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GitActor {
    pub name: Option<String>,

    pub user: Option<ActorUser>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActorUser {
    pub login: String,
}

impl From<GitCommit> for CommitRecord {
    fn from(commit: GitCommit) -> Self {
        let (author_name, author_login) = match commit.author {
            Some(author) => (author.name, author.user.map(|u| u.login)),
            None => (None, None),
        };

        CommitRecord {
            oid: commit.oid,
            message: commit.message,
            parent_count: commit.parents.map(|p| p.total_count).unwrap_or_default(),
            author_name,
            author_login,
        }
    }
}
