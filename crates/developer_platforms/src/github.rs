use async_trait::async_trait;
use indoc::indoc;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, error, info, instrument};

use crate::{
    errors::Error,
    models::{CommitData, CommitRecord, GraphQlErrorMessage, GraphQlResponse, PullRequestCommitsData},
    CommitHistoryProvider, MAX_COMMITS_PER_PAGE,
};

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;

/// Query for one page of the commits of a pull request.
const PULL_REQUEST_COMMITS_QUERY: &str = indoc! {"
    query($repositoryOwner: String!, $repositoryName: String!, $pullRequestNumber: Int!, $numberOfCommits: Int!, $after: String) {
      repository(owner: $repositoryOwner, name: $repositoryName) {
        pullRequest(number: $pullRequestNumber) {
          commits(first: $numberOfCommits, after: $after) {
            pageInfo {
              hasNextPage
              endCursor
            }
            edges {
              node {
                commit {
                  oid
                  message
                  parents {
                    totalCount
                  }
                  author {
                    name
                    user {
                      login
                    }
                  }
                }
              }
            }
          }
        }
      }
    }
"};

/// Query for a single commit.
const COMMIT_QUERY: &str = indoc! {"
    query($repositoryOwner: String!, $repositoryName: String!, $commitSha: GitObjectID!) {
      repository(owner: $repositoryOwner, name: $repositoryName) {
        object(oid: $commitSha) {
          ... on Commit {
            oid
            message
            parents {
              totalCount
            }
            author {
              name
              user {
                login
              }
            }
          }
        }
      }
    }
"};

/// Creates an `Octocrab` client authenticated with a personal access token.
///
/// # Arguments
///
/// * `token` - A personal access token or the workflow's `GITHUB_TOKEN`
///
/// # Errors
///
/// Returns [`Error::ApiError`] if the client cannot be built.
#[instrument(skip(token))]
pub fn create_token_client(token: &str) -> Result<Octocrab, Error> {
    create_client(Some(token), None)
}

/// Creates an `Octocrab` client, optionally authenticated and optionally
/// pointed at a different API root (GitHub Enterprise Server, test servers).
///
/// # Arguments
///
/// * `token` - The access token, if any
/// * `api_url` - The API root, e.g. `https://github.example.com/api`. The
///   GraphQL endpoint is resolved as `<api_url>/graphql`.
///
/// # Example
///
/// ```rust,no_run
/// use commit_message_checker_developer_platforms::github::{create_client, GitHubProvider};
///
/// # fn main() -> Result<(), commit_message_checker_developer_platforms::errors::Error> {
/// let client = create_client(Some("ghp_example"), Some("https://api.github.com"))?;
/// let provider = GitHubProvider::new(client);
/// # Ok(())
/// # }
/// ```
#[instrument(skip(token))]
pub fn create_client(token: Option<&str>, api_url: Option<&str>) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder();

    if let Some(url) = api_url {
        builder = builder.base_uri(url).map_err(|e| {
            Error::ApiError(format!("Invalid API url '{}'. Error was: {}", url, e))
        })?;
    }

    if let Some(token) = token {
        builder = builder.personal_token(token.to_string());
    }

    builder
        .build()
        .map_err(|e| Error::ApiError(format!("Failed to build the GitHub client: {}", e)))
}

fn map_octocrab_error(message: &str, e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            let err = *source;
            let status = err.status_code.as_u16();
            error!(
                error_message = err.message.as_str(),
                status,
                "{}. Received an error from GitHub",
                message
            );

            match status {
                401 => Error::AuthError(err.message),
                403 | 429 if err.message.to_lowercase().contains("rate limit") => {
                    Error::RateLimitExceeded
                }
                403 => Error::AuthError(err.message),
                404 => Error::NotFound(err.message),
                _ => Error::ApiError(err.message),
            }
        }
        _ => {
            error!(error_message = e.to_string(), "{}", message);
            Error::ApiError(e.to_string())
        }
    }
}

fn map_graphql_errors(errors: Vec<GraphQlErrorMessage>) -> Error {
    for err in &errors {
        error!(
            error_message = err.message.as_str(),
            error_type = err.kind.as_deref().unwrap_or_default(),
            "GraphQL query reported an error"
        );
    }

    let kinds: Vec<&str> = errors.iter().filter_map(|e| e.kind.as_deref()).collect();
    let messages = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    if kinds.contains(&"RATE_LIMITED") {
        Error::RateLimitExceeded
    } else if kinds.contains(&"NOT_FOUND") {
        Error::NotFound(messages)
    } else {
        Error::GraphQlError(messages)
    }
}

/// [`CommitHistoryProvider`] backed by the GitHub GraphQL API.
#[derive(Debug)]
pub struct GitHubProvider {
    client: Octocrab,
}

impl GitHubProvider {
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    async fn query<T>(&self, query: &str, variables: serde_json::Value) -> Result<T, Error>
    where
        T: DeserializeOwned + Send,
    {
        let response: GraphQlResponse<T> = self
            .client
            .graphql(&json!({ "query": query, "variables": variables }))
            .await
            .map_err(|e| map_octocrab_error("Failed to execute GraphQL query", e))?;

        if !response.errors.is_empty() {
            return Err(map_graphql_errors(response.errors));
        }

        response.data.ok_or(Error::InvalidResponse)
    }
}

#[async_trait]
impl CommitHistoryProvider for GitHubProvider {
    #[instrument(skip(self))]
    async fn list_pull_request_commits(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
    ) -> Result<Vec<CommitRecord>, Error> {
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let data: PullRequestCommitsData = self
                .query(
                    PULL_REQUEST_COMMITS_QUERY,
                    json!({
                        "repositoryOwner": repo_owner,
                        "repositoryName": repo_name,
                        "pullRequestNumber": pr_number,
                        "numberOfCommits": MAX_COMMITS_PER_PAGE,
                        "after": cursor,
                    }),
                )
                .await?;

            let commits = data
                .repository
                .ok_or_else(|| Error::NotFound(format!("{}/{}", repo_owner, repo_name)))?
                .pull_request
                .ok_or_else(|| {
                    Error::NotFound(format!("{}/{}#{}", repo_owner, repo_name, pr_number))
                })?
                .commits;

            let page_size = commits.edges.len();
            records.extend(
                commits
                    .edges
                    .into_iter()
                    .filter_map(|edge| edge.node)
                    .map(|node| CommitRecord::from(node.commit)),
            );

            debug!(
                repository_owner = repo_owner,
                repository = repo_name,
                pull_request = pr_number,
                count = page_size,
                "Received a page of pull request commits",
            );

            match commits.page_info.end_cursor {
                Some(next) if commits.page_info.has_next_page && page_size > 0 => {
                    cursor = Some(next)
                }
                _ => break,
            }
        }

        info!(
            repository_owner = repo_owner,
            repository = repo_name,
            pull_request = pr_number,
            count = records.len(),
            "Fetched pull request commits",
        );

        Ok(records)
    }

    #[instrument(skip(self))]
    async fn get_commit(
        &self,
        repo_owner: &str,
        repo_name: &str,
        sha: &str,
    ) -> Result<CommitRecord, Error> {
        let data: CommitData = self
            .query(
                COMMIT_QUERY,
                json!({
                    "repositoryOwner": repo_owner,
                    "repositoryName": repo_name,
                    "commitSha": sha,
                }),
            )
            .await?;

        let commit = data
            .repository
            .ok_or_else(|| Error::NotFound(format!("{}/{}", repo_owner, repo_name)))?
            .object
            .ok_or_else(|| Error::NotFound(format!("{}/{}@{}", repo_owner, repo_name, sha)))?;

        debug!(
            repository_owner = repo_owner,
            repository = repo_name,
            commit = sha,
            "Fetched commit",
        );

        Ok(CommitRecord::from(commit))
    }
}
