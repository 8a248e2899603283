use crate::{
    config::{CheckerConfiguration, PullRequestOptions},
    errors::{CommitCheckerError, ErrorKind},
    CheckOutcome, CommitMessageChecker,
};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tokio::test;

use commit_message_checker_developer_platforms::errors::Error;
use commit_message_checker_developer_platforms::models::CommitRecord;
use commit_message_checker_developer_platforms::CommitHistoryProvider;

// Mock implementation of CommitHistoryProvider for testing
#[derive(Debug, Default)]
struct MockGitProvider {
    commits: Vec<CommitRecord>,
    calls: Arc<AtomicUsize>,
}

impl MockGitProvider {
    fn new() -> Self {
        Self::default()
    }

    fn with_commits(commits: Vec<CommitRecord>) -> Self {
        Self {
            commits,
            ..Default::default()
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommitHistoryProvider for MockGitProvider {
    async fn list_pull_request_commits(
        &self,
        _repo_owner: &str,
        _repo_name: &str,
        _pr_number: u64,
    ) -> Result<Vec<CommitRecord>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.commits.clone())
    }

    async fn get_commit(
        &self,
        _repo_owner: &str,
        _repo_name: &str,
        sha: &str,
    ) -> Result<CommitRecord, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.commits
            .iter()
            .find(|c| c.oid.as_deref() == Some(sha))
            .cloned()
            .ok_or_else(|| Error::NotFound(sha.to_string()))
    }
}

fn config(pattern: &str) -> CheckerConfiguration {
    CheckerConfiguration {
        pattern: pattern.to_string(),
        flags: String::new(),
        error: "some-error".to_string(),
        fail_on_match: false,
        options: PullRequestOptions::default(),
    }
}

fn single_commit_push() -> Value {
    json!({
        "commits": [{ "id": "c1", "message": "some-message" }],
        "repository": { "name": "some-repo", "owner": { "name": "some-owner" } }
    })
}

#[test]
async fn test_constructor_new() {
    let checker = CommitMessageChecker::new(MockGitProvider::new());

    assert_eq!(checker.provider.call_count(), 0);
}

#[test]
async fn test_process_event_push_passes() {
    let checker = CommitMessageChecker::new(MockGitProvider::new());

    let outcome = checker
        .process_event("push", Some(single_commit_push()), &config(".*"))
        .await
        .unwrap();

    assert_eq!(outcome, CheckOutcome::Passed);
}

#[test]
async fn test_process_event_is_idempotent() {
    let checker = CommitMessageChecker::new(MockGitProvider::new());
    let config = config(".*");

    for _ in 0..3 {
        let outcome = checker
            .process_event("push", Some(single_commit_push()), &config)
            .await
            .unwrap();

        assert_eq!(outcome, CheckOutcome::Passed);
    }
}

#[test]
async fn test_process_event_push_fails_with_configured_error() {
    let checker = CommitMessageChecker::new(MockGitProvider::new());

    let err = checker
        .process_event("push", Some(single_commit_push()), &config("some-pattern"))
        .await
        .expect_err("check should fail");

    assert_eq!(err.kind(), ErrorKind::MatchFailure);
    assert_eq!(err.to_string(), "some-error");
}

#[test]
async fn test_process_event_fail_on_match() {
    let checker = CommitMessageChecker::new(MockGitProvider::new());
    let mut config = config("some-message");
    config.fail_on_match = true;

    let err = checker
        .process_event("push", Some(single_commit_push()), &config)
        .await
        .expect_err("check should fail");

    assert!(matches!(err, CommitCheckerError::MatchFailure(_)));
}

#[test]
async fn test_process_event_push_without_commits_is_skipped() {
    let checker = CommitMessageChecker::new(MockGitProvider::new());

    let outcome = checker
        .process_event("push", Some(json!({ "commits": [] })), &config(".*"))
        .await
        .unwrap();

    assert_eq!(outcome, CheckOutcome::Skipped);
}

#[test]
async fn test_process_event_pull_request_without_messages_is_skipped() {
    let checker = CommitMessageChecker::new(MockGitProvider::new());
    let mut config = config("some-pattern");
    config.options.ignore_title = true;
    config.options.ignore_description = true;

    let outcome = checker
        .process_event(
            "pull_request",
            Some(json!({ "pull_request": { "title": "T", "body": "B" } })),
            &config,
        )
        .await
        .unwrap();

    assert_eq!(outcome, CheckOutcome::Skipped);
}

#[test]
async fn test_process_event_pull_request_with_crlf_body() {
    let checker = CommitMessageChecker::new(MockGitProvider::new());
    let mut config = config(r"^Closes #\d+$");
    config.flags = "gm".to_string();

    let outcome = checker
        .process_event(
            "pull_request",
            Some(json!({
                "pull_request": { "title": "feat: login", "body": "Adds login.\r\nCloses #12\r\n" }
            })),
            &config,
        )
        .await
        .unwrap();

    assert_eq!(outcome, CheckOutcome::Passed);
}

#[test]
async fn test_process_event_negative_lookahead() {
    let checker = CommitMessageChecker::new(MockGitProvider::new());
    let config = config("^(?!WIP)");

    let outcome = checker
        .process_event("push", Some(single_commit_push()), &config)
        .await
        .unwrap();
    assert_eq!(outcome, CheckOutcome::Passed);

    let err = checker
        .process_event(
            "push",
            Some(json!({ "commits": [{ "id": "c1", "message": "WIP: login" }] })),
            &config,
        )
        .await
        .expect_err("check should fail");
    assert!(matches!(err, CommitCheckerError::MatchFailure(_)));
}

#[test]
async fn test_process_event_validates_configuration_first() {
    let checker = CommitMessageChecker::new(MockGitProvider::new());

    let err = checker
        .process_event("issues", None, &config(""))
        .await
        .expect_err("check should fail");
    assert!(matches!(err, CommitCheckerError::PatternNotDefined));

    let mut invalid_flags = config(".*");
    invalid_flags.flags = "gx".to_string();
    let err = checker
        .process_event("issues", None, &invalid_flags)
        .await
        .expect_err("check should fail");
    assert_eq!(err.to_string(), "FLAGS contains invalid characters \"x\".");

    let mut no_error = config(".*");
    no_error.error = String::new();
    let err = checker
        .process_event("issues", None, &no_error)
        .await
        .expect_err("check should fail");
    assert!(matches!(err, CommitCheckerError::ErrorNotDefined));
}

#[test]
async fn test_process_event_unsupported_event() {
    let checker = CommitMessageChecker::new(MockGitProvider::new());

    let err = checker
        .process_event("issues", Some(json!({})), &config(".*"))
        .await
        .expect_err("check should fail");

    assert_eq!(err.kind(), ErrorKind::PayloadShape);
}

#[test]
async fn test_process_event_malformed_pattern() {
    let checker = CommitMessageChecker::new(MockGitProvider::new());

    let err = checker
        .process_event("push", Some(single_commit_push()), &config("(unclosed"))
        .await
        .expect_err("check should fail");

    assert_eq!(err.kind(), ErrorKind::PatternSyntax);
}

#[test]
async fn test_process_event_pull_request_checks_all_commits() {
    let provider = MockGitProvider::with_commits(vec![
        CommitRecord {
            oid: Some("c1".to_string()),
            message: "feat: first".to_string(),
            parent_count: 1,
            author_name: None,
            author_login: None,
        },
        CommitRecord {
            oid: Some("c2".to_string()),
            message: "wip".to_string(),
            parent_count: 1,
            author_name: None,
            author_login: None,
        },
    ]);
    let checker = CommitMessageChecker::new(provider);
    let mut config = config("^(feat|fix): ");
    config.options.check_all_commits = true;
    config.options.access_token = Some("some-token".to_string());

    let err = checker
        .process_event(
            "pull_request",
            Some(json!({
                "pull_request": { "title": "feat: title", "number": 5 },
                "repository": { "name": "some-repo", "owner": { "login": "some-owner" } }
            })),
            &config,
        )
        .await
        .expect_err("check should fail");

    assert!(matches!(err, CommitCheckerError::MatchFailure(_)));
    assert_eq!(checker.provider.call_count(), 1);
}

#[test]
async fn test_process_event_missing_token() {
    let checker = CommitMessageChecker::new(MockGitProvider::new());
    let mut config = config(".*");
    config.options.check_all_commits = true;

    let err = checker
        .process_event("push", None, &config)
        .await
        .expect_err("check should fail");

    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert_eq!(checker.provider.call_count(), 0);
}
