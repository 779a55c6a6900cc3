use thiserror::Error;

/// Normalized error shape for everything the request layer can fail with.
///
/// Propagation policy: list fetches absorb any of these into the mock
/// fallback, mutations absorb them into local optimistic updates, and only
/// the auth flows surface them to callers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Transport-level failure: no response was received at all.
    #[error("network unreachable: {0}")]
    Network(String),

    /// Non-2xx response, message extracted from the body when possible.
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        message: String,
        details: Option<serde_json::Value>,
        url: String,
    },

    /// The response arrived but did not carry what the caller required,
    /// e.g. a login reply without a token.
    #[error("invalid response: {0}")]
    Validation(String),

    /// Persistent storage was inaccessible. Always treated as non-fatal;
    /// the code proceeds as if no token were stored.
    #[error("storage unavailable: {0}")]
    Storage(String),
}

impl ApiError {
    /// HTTP status code, when the error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401/403, the statuses that invalidate a stored token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_detection() {
        let err = ApiError::Http {
            status: 401,
            message: "unauthorized".into(),
            details: None,
            url: "/auth/me".into(),
        };
        assert!(err.is_unauthorized());

        let err = ApiError::Http {
            status: 500,
            message: "boom".into(),
            details: None,
            url: "/listings".into(),
        };
        assert!(!err.is_unauthorized());
        assert!(!ApiError::Network("refused".into()).is_unauthorized());
    }

    #[test]
    fn test_display_includes_status() {
        let err = ApiError::Http {
            status: 404,
            message: "listing not found".into(),
            details: None,
            url: "/listings/9".into(),
        };
        assert_eq!(err.to_string(), "HTTP 404: listing not found");
    }
}
