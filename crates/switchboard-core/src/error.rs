//! Failure kinds for talking to a backend.

use thiserror::Error;

/// What went wrong while calling a backend inference service.
///
/// Carries strings rather than transport types so the core crate stays free
/// of HTTP dependencies. The HTTP layer decides how each kind is surfaced:
/// non-streaming handlers map every variant to a 500 with a JSON error body,
/// the streaming relay converts them into a single in-band error frame.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Network-level failure reaching the backend.
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// The backend answered with a non-200 status.
    #[error("backend request failed with status {0}")]
    Http(u16),

    /// The backend answered 200 but the body was not the expected shape.
    #[error("unexpected backend response: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_status_code() {
        let error = BackendError::Http(503);
        assert_eq!(error.to_string(), "backend request failed with status 503");
    }

    #[test]
    fn display_carries_cause() {
        let error = BackendError::Unreachable("connection refused".into());
        assert!(error.to_string().contains("connection refused"));
    }
}
