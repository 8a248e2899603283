use super::*;
use std::process::{ExitCode, Termination};

#[test]
fn test_config_error_display() {
    let err = CliError::ConfigError("bad config".to_string());
    assert_eq!(format!("{}", err), "Configuration error: bad config");
}

#[test]
fn test_auth_error_display() {
    let err = CliError::AuthError("bad auth".to_string());
    assert_eq!(format!("{}", err), "Authentication error: bad auth");
}

#[test]
fn test_network_error_display() {
    let err = CliError::NetworkError("net fail".to_string());
    assert_eq!(format!("{}", err), "Network error: net fail");
}

#[test]
fn test_invalid_arguments_display() {
    let err = CliError::InvalidArguments("bad arg".to_string());
    assert_eq!(format!("{}", err), "Invalid arguments: bad arg");
}

#[test]
fn test_validation_failed_display() {
    let err = CliError::ValidationFailed("fail".to_string());
    assert_eq!(format!("{}", err), "Validation failed: fail");
    assert_eq!(err.detail(), "fail");
}

#[test]
fn test_from_match_failure_keeps_configured_text() {
    let err: CliError =
        CommitCheckerError::MatchFailure("Use conventional commits.".to_string()).into();

    assert!(matches!(err, CliError::ValidationFailed(_)));
    assert_eq!(err.detail(), "Use conventional commits.");
}

#[test]
fn test_from_checker_error_by_kind() {
    let err: CliError = CommitCheckerError::PatternNotDefined.into();
    assert!(matches!(err, CliError::ConfigError(ref d) if d == "PATTERN not defined."));

    let err: CliError = CommitCheckerError::MissingToken("checkAllCommitMessages").into();
    assert!(matches!(err, CliError::AuthError(_)));

    let err: CliError = CommitCheckerError::NoPullRequest.into();
    assert!(matches!(err, CliError::InvalidArguments(_)));

    let err: CliError = CommitCheckerError::UnsupportedEvent("issues".to_string()).into();
    assert!(matches!(err, CliError::InvalidArguments(_)));

    let err: CliError =
        CommitCheckerError::RemoteFetch(PlatformError::ApiError("boom".to_string())).into();
    assert!(matches!(err, CliError::NetworkError(_)));

    let err: CliError =
        CommitCheckerError::RemoteFetch(PlatformError::AuthError("Bad credentials".to_string()))
            .into();
    assert!(matches!(err, CliError::AuthError(_)));
}

#[test]
fn test_from_platform_error() {
    let err: CliError = PlatformError::RateLimitExceeded.into();
    assert!(matches!(err, CliError::NetworkError(_)));

    let err: CliError = PlatformError::AuthError("nope".to_string()).into();
    assert!(matches!(err, CliError::AuthError(_)));
}

#[test]
fn test_exit_codes() {
    let cases = [
        (CliError::ValidationFailed(String::new()), ExitCode::from(1)),
        (CliError::ConfigError(String::new()), ExitCode::from(2)),
        (CliError::AuthError(String::new()), ExitCode::from(3)),
        (CliError::NetworkError(String::new()), ExitCode::from(4)),
        (CliError::InvalidArguments(String::new()), ExitCode::from(5)),
    ];

    for (err, expected) in cases {
        assert_eq!(format!("{:?}", err.report()), format!("{:?}", expected));
    }
}
