//! Tests for the CommitHistoryProvider trait contract

use crate::errors::Error;
use crate::models::CommitRecord;
use crate::{CommitHistoryProvider, MAX_COMMITS_PER_PAGE};
use async_trait::async_trait;

/// Provider serving a fixed list of commits
#[derive(Debug)]
struct StaticProvider {
    commits: Vec<CommitRecord>,
}

#[async_trait]
impl CommitHistoryProvider for StaticProvider {
    async fn list_pull_request_commits(
        &self,
        _repo_owner: &str,
        _repo_name: &str,
        _pr_number: u64,
    ) -> Result<Vec<CommitRecord>, Error> {
        Ok(self.commits.clone())
    }

    async fn get_commit(
        &self,
        _repo_owner: &str,
        _repo_name: &str,
        sha: &str,
    ) -> Result<CommitRecord, Error> {
        self.commits
            .iter()
            .find(|c| c.oid.as_deref() == Some(sha))
            .cloned()
            .ok_or_else(|| Error::NotFound(sha.to_string()))
    }
}

fn commit(oid: &str, parent_count: u64) -> CommitRecord {
    CommitRecord {
        oid: Some(oid.to_string()),
        message: format!("commit {}", oid),
        parent_count,
        author_name: None,
        author_login: None,
    }
}

#[test]
fn test_page_size_is_graphql_maximum() {
    assert_eq!(MAX_COMMITS_PER_PAGE, 100);
}

#[tokio::test]
async fn test_provider_usable_as_trait_object() {
    let provider: Box<dyn CommitHistoryProvider> = Box::new(StaticProvider {
        commits: vec![commit("a1", 1), commit("a2", 2)],
    });

    let commits = provider
        .list_pull_request_commits("owner", "repo", 1)
        .await
        .expect("Failed to list commits");
    assert_eq!(commits.len(), 2);

    let merge = provider
        .get_commit("owner", "repo", "a2")
        .await
        .expect("Failed to get commit");
    assert!(merge.is_merge_commit());
}

#[tokio::test]
async fn test_provider_reports_missing_commit() {
    let provider = StaticProvider { commits: vec![] };

    let result = provider.get_commit("owner", "repo", "nope").await;

    assert!(matches!(result, Err(Error::NotFound(sha)) if sha == "nope"));
}
