use async_trait::async_trait;

pub mod errors;

pub mod github;

pub mod models;
use errors::Error;
use models::CommitRecord;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Maximum number of commits requested per page of pull request history.
pub const MAX_COMMITS_PER_PAGE: u32 = 100;

/// Trait for reading commit history from developer platforms (e.g., GitHub, GitLab).
///
/// Implementations hold their own credentials. Every call is an independent
/// request/response exchange; retries, if any, are the responsibility of the
/// implementation's HTTP client and are never performed by callers.
///
/// # Example Implementation
///
/// ```rust,no_run
/// use commit_message_checker_developer_platforms::{CommitHistoryProvider, errors::Error, models::CommitRecord};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct StaticProvider {
///     commits: Vec<CommitRecord>,
/// }
///
/// #[async_trait]
/// impl CommitHistoryProvider for StaticProvider {
///     async fn list_pull_request_commits(
///         &self,
///         _repo_owner: &str,
///         _repo_name: &str,
///         _pr_number: u64,
///     ) -> Result<Vec<CommitRecord>, Error> {
///         Ok(self.commits.clone())
///     }
///
///     async fn get_commit(
///         &self,
///         _repo_owner: &str,
///         _repo_name: &str,
///         sha: &str,
///     ) -> Result<CommitRecord, Error> {
///         self.commits
///             .iter()
///             .find(|c| c.oid.as_deref() == Some(sha))
///             .cloned()
///             .ok_or_else(|| Error::NotFound(sha.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait CommitHistoryProvider: Send + Sync {
    /// Retrieves every commit of a pull request.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    /// * `pr_number` - The pull request number
    ///
    /// # Returns
    ///
    /// A `Result` containing the commits in the order delivered by the
    /// platform, oldest first
    async fn list_pull_request_commits(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
    ) -> Result<Vec<CommitRecord>, Error>;

    /// Retrieves a single commit.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    /// * `sha` - The commit SHA
    ///
    /// # Returns
    ///
    /// A `Result` containing the commit, or [`Error::NotFound`] if the
    /// repository does not contain it
    async fn get_commit(
        &self,
        repo_owner: &str,
        repo_name: &str,
        sha: &str,
    ) -> Result<CommitRecord, Error>;
}
