//! Mapping of HTTP and transport failures onto [`GatewayError`]
//!
//! 408, 429 and 5xx responses, timeouts and connection failures are the
//! transient kinds; every other failure is permanent.

use jury_application::GatewayError;

const MAX_BODY_CHARS: usize = 500;

fn truncate(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_BODY_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Classify a non-success response
pub(crate) fn from_status(status: u16, body: &str) -> GatewayError {
    let body = truncate(body);
    match status {
        401 | 403 => GatewayError::Unauthorized(body),
        404 => GatewayError::ModelNotAvailable(body),
        429 => GatewayError::RateLimited(body),
        _ => GatewayError::HttpStatus { status, body },
    }
}

/// Classify a transport-level failure
pub(crate) fn from_reqwest(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() {
        GatewayError::ConnectionError(error.to_string())
    } else if error.is_decode() || error.is_body() {
        GatewayError::InvalidResponse(error.to_string())
    } else {
        GatewayError::RequestFailed(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_statuses() {
        assert!(from_status(429, "slow down").is_transient());
        assert!(from_status(500, "").is_transient());
        assert!(from_status(503, "overloaded").is_transient());
        assert!(from_status(408, "").is_transient());
    }

    #[test]
    fn test_permanent_statuses() {
        assert_eq!(
            from_status(401, "bad key"),
            GatewayError::Unauthorized("bad key".into())
        );
        assert!(matches!(
            from_status(404, "no such model"),
            GatewayError::ModelNotAvailable(_)
        ));
        assert!(!from_status(400, "bad request").is_transient());
        assert!(!from_status(422, "").is_transient());
    }

    #[test]
    fn test_malformed_request_is_permanent() {
        let error = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        assert!(error.is_builder());

        let mapped = from_reqwest(error);
        assert!(matches!(mapped, GatewayError::RequestFailed(_)));
        assert!(!mapped.is_transient());
    }

    #[test]
    fn test_long_body_truncated() {
        let body = "x".repeat(2000);
        match from_status(400, &body) {
            GatewayError::HttpStatus { body, .. } => {
                assert_eq!(body.len(), MAX_BODY_CHARS + 3);
                assert!(body.ends_with("..."));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
