use thiserror::Error;

/// Failure modes of a backend call, in the order screens care about them:
/// can't reach the server at all, the session is no longer accepted, the
/// server answered with a business error, or the body didn't decode.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("Unable to connect to server. Please check your connection.")]
    Network,
    #[error("Session expired. Please login again.")]
    Unauthorized,
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Unexpected response from server.")]
    Decode,
}

impl ApiError {
    /// Retrying only makes sense when the request never produced a usable
    /// answer. A 401 must not be retried: the redirect has already fired.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network => true,
            ApiError::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(ApiError::Network.is_retryable());
        assert!(ApiError::Server { status: 502, message: "bad gateway".into() }.is_retryable());
        assert!(!ApiError::Server { status: 404, message: "no data".into() }.is_retryable());
        assert!(!ApiError::Unauthorized.is_retryable());
        assert!(!ApiError::Decode.is_retryable());
    }

    #[test]
    fn server_error_displays_message_verbatim() {
        let err = ApiError::Server { status: 400, message: "Username or email already exists.".into() };
        assert_eq!(err.to_string(), "Username or email already exists.");
    }
}
