//! # Event Payloads
//!
//! Typed views of the webhook payloads the checker understands.
//!
//! [`EventPayload::parse`] is the single place where the raw JSON of the
//! triggering event is turned into a typed value. It rejects unsupported
//! events and payloads without the objects every run needs. Fields that are
//! only needed by some options (the pull request number, the repository) are
//! kept optional and checked through accessors that return the matching
//! error.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use commit_message_checker_developer_platforms::models::CommitRecord;

use crate::errors::CommitCheckerError;

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;

/// Name of the pull request event
pub const PULL_REQUEST_EVENT: &str = "pull_request";

/// Name of the pull request event running in the context of the base repository
pub const PULL_REQUEST_TARGET_EVENT: &str = "pull_request_target";

/// Name of the push event
pub const PUSH_EVENT: &str = "push";

/// The payload of a supported event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    PullRequest(PullRequestPayload),
    Push(PushPayload),
}

/// Payload of a `pull_request` or `pull_request_target` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestPayload {
    pub pull_request: PullRequestDetails,
    pub repository: Option<RepositoryDetails>,
}

/// Payload of a `push` event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PushPayload {
    /// The pushed commits, oldest first. Missing or malformed lists are empty.
    #[serde(default, deserialize_with = "deserialize_commits")]
    pub commits: Vec<PushCommit>,

    #[serde(default)]
    pub repository: Option<RepositoryDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PullRequestDetails {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub number: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RepositoryDetails {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub owner: Option<OwnerDetails>,
}

/// Repository owner. Pull request payloads carry `login`, push payloads
/// carry `name` (and usually `login` as well).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OwnerDetails {
    #[serde(default)]
    pub login: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PushCommit {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub author: Option<PushCommitAuthor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PushCommitAuthor {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPullRequestEvent {
    #[serde(default)]
    pull_request: Option<PullRequestDetails>,

    #[serde(default)]
    repository: Option<RepositoryDetails>,
}

/// Name and owner of a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryCoordinates {
    pub owner: String,
    pub name: String,
}

fn deserialize_commits<'de, D>(deserializer: D) -> Result<Vec<PushCommit>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(serde::de::Error::custom))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl EventPayload {
    /// Parses the payload of the event named `event_name`.
    ///
    /// # Errors
    ///
    /// - [`CommitCheckerError::UnsupportedEvent`] for any other event name
    /// - [`CommitCheckerError::NoPayload`] if `payload` is missing or `null`
    /// - [`CommitCheckerError::NoPullRequest`] if a pull request event has no
    ///   `pull_request` object
    /// - [`CommitCheckerError::InvalidPayload`] if the JSON has the wrong shape
    pub fn parse(event_name: &str, payload: Option<Value>) -> Result<Self, CommitCheckerError> {
        match event_name {
            PULL_REQUEST_EVENT | PULL_REQUEST_TARGET_EVENT => {
                let value = Self::require_payload(payload)?;
                let raw: RawPullRequestEvent = serde_json::from_value(value)
                    .map_err(|e| CommitCheckerError::InvalidPayload(e.to_string()))?;

                let pull_request = raw.pull_request.ok_or(CommitCheckerError::NoPullRequest)?;

                Ok(EventPayload::PullRequest(PullRequestPayload {
                    pull_request,
                    repository: raw.repository,
                }))
            }
            PUSH_EVENT => {
                let value = Self::require_payload(payload)?;
                let push: PushPayload = serde_json::from_value(value)
                    .map_err(|e| CommitCheckerError::InvalidPayload(e.to_string()))?;

                Ok(EventPayload::Push(push))
            }
            other => Err(CommitCheckerError::UnsupportedEvent(other.to_string())),
        }
    }

    fn require_payload(payload: Option<Value>) -> Result<Value, CommitCheckerError> {
        payload
            .filter(|value| !value.is_null())
            .ok_or(CommitCheckerError::NoPayload)
    }
}

impl PullRequestDetails {
    /// The title, if present and non-empty.
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    /// The description, if present and non-empty.
    pub fn body(&self) -> Option<&str> {
        non_empty(&self.body)
    }

    /// The pull request number.
    pub fn require_number(&self) -> Result<u64, CommitCheckerError> {
        self.number
            .filter(|n| *n > 0)
            .ok_or(CommitCheckerError::NoNumber)
    }
}

impl RepositoryDetails {
    /// Resolves the owner and name of an optional repository object, reporting
    /// the first missing piece.
    pub fn require_coordinates(
        repository: Option<&RepositoryDetails>,
    ) -> Result<RepositoryCoordinates, CommitCheckerError> {
        let repository = repository.ok_or(CommitCheckerError::NoRepository)?;

        let name = non_empty(&repository.name).ok_or(CommitCheckerError::NoRepositoryName)?;

        let owner = repository
            .owner
            .as_ref()
            .and_then(|owner| non_empty(&owner.login).or_else(|| non_empty(&owner.name)))
            .ok_or(CommitCheckerError::NoRepositoryOwner)?;

        Ok(RepositoryCoordinates {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl PushCommit {
    /// The commit message, if present and non-empty.
    pub fn message(&self) -> Option<&str> {
        non_empty(&self.message)
    }

    /// The commit id, if present and non-empty.
    pub fn id(&self) -> Option<&str> {
        non_empty(&self.id)
    }

    /// Converts the payload commit into a [`CommitRecord`] so that the same
    /// exclusion rules apply to pushed and fetched commits. Push payloads do
    /// not carry parent information, the parent count is therefore unknown (0).
    pub fn to_record(&self) -> CommitRecord {
        let (author_name, author_login) = match &self.author {
            Some(author) => (author.name.clone(), author.username.clone()),
            None => (None, None),
        };

        CommitRecord {
            oid: self.id.clone(),
            message: self.message.clone().unwrap_or_default(),
            parent_count: 0,
            author_name,
            author_login,
        }
    }
}
