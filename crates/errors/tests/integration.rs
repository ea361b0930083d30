//! Integration tests for error classification

use pkgprobe_errors::{Error, NetworkError, UserFacingError, VerifyError};

#[test]
fn transient_network_errors_are_retryable() {
    let errors = [
        NetworkError::Timeout {
            url: "https://example.com".to_string(),
        },
        NetworkError::ConnectionRefused("dns failure".to_string()),
        NetworkError::RateLimited { retry_after: None },
        NetworkError::Server {
            status: 503,
            message: "Service Unavailable".to_string(),
        },
    ];

    for err in errors {
        assert!(Error::from(err).is_retryable());
    }
}

#[test]
fn request_failures_are_classified_by_message_pattern() {
    let transient = NetworkError::RequestFailed("operation timed out".to_string());
    assert!(transient.is_transient());

    let transient = NetworkError::RequestFailed("Connection reset by peer".to_string());
    assert!(transient.is_transient());

    let terminal = NetworkError::RequestFailed("invalid certificate".to_string());
    assert!(!terminal.is_transient());
}

#[test]
fn terminal_errors_are_not_retryable() {
    let malformed = Error::from(VerifyError::MalformedIdentifier {
        identifier: "noseparator".to_string(),
        reason: "expected publisher.name".to_string(),
    });
    assert!(!malformed.is_retryable());

    let invalid = Error::from(NetworkError::InvalidUrl("not a url".to_string()));
    assert!(!invalid.is_retryable());
}

#[test]
fn retry_after_is_surfaced_only_for_rate_limits() {
    let rate_limited = Error::from(NetworkError::RateLimited {
        retry_after: Some(5),
    });
    assert_eq!(rate_limited.retry_after_secs(), Some(5));

    let server = Error::from(NetworkError::Server {
        status: 500,
        message: "Internal Server Error".to_string(),
    });
    assert_eq!(server.retry_after_secs(), None);
}

#[test]
fn user_codes_are_stable() {
    let err = Error::from(NetworkError::RateLimited { retry_after: None });
    assert_eq!(err.user_code(), Some("network.rate_limited"));

    let err = Error::internal("boom");
    assert_eq!(err.user_code(), Some("error.internal"));
}
