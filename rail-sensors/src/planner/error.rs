//! Journey planner error types.

/// Errors from a journey-planning provider.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// HTTP request failed. Built through `From`, which drops the URL:
    /// the app key travels in the query string.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// App id/key rejected
    #[error("unauthorized: check transportapi_app_id and transportapi_app_key")]
    Unauthorized,

    /// Rate limited by the provider
    #[error("rate limited by journey planner")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        PlannerError::Http(err.without_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PlannerError::Api {
            status: 503,
            message: "down".into(),
        };
        assert_eq!(err.to_string(), "API error 503: down");
        assert_eq!(
            PlannerError::RateLimited.to_string(),
            "rate limited by journey planner"
        );
    }
}
