use super::*;
use std::error::Error as StdError;

#[test]
fn test_api_error() {
    let error = Error::ApiError("connection reset".to_string());

    assert_eq!(error.to_string(), "API request failed: connection reset");
    assert!(error.source().is_none());
}

#[test]
fn test_auth_error() {
    let error = Error::AuthError("Bad credentials".to_string());

    assert_eq!(error.to_string(), "Authentication failed: Bad credentials");
    assert!(error.source().is_none());
}

#[test]
fn test_graphql_error() {
    let error = Error::GraphQlError("Could not resolve to a Repository".to_string());

    assert_eq!(
        error.to_string(),
        "GraphQL query failed: Could not resolve to a Repository"
    );
}

#[test]
fn test_invalid_response_error() {
    let error = Error::InvalidResponse;

    assert_eq!(error.to_string(), "Invalid response format");
    assert!(error.source().is_none());
}

#[test]
fn test_not_found_error() {
    let error = Error::NotFound("owner/repo#12".to_string());

    assert_eq!(error.to_string(), "Resource not found: owner/repo#12");
}

#[test]
fn test_rate_limit_exceeded_error() {
    let error = Error::RateLimitExceeded;

    assert_eq!(error.to_string(), "Rate limit exceeded");
    assert!(error.source().is_none());
}
