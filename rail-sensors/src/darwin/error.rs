//! Failures while checking a token or station against the departure board.
//!
//! The config flow only distinguishes a rejected token, rejected station
//! input and everything else; the remaining variants exist so logs say
//! which "everything else" it was.

/// Why a departure board lookup failed.
#[derive(Debug, thiserror::Error)]
pub enum DarwinError {
    /// Could not reach the board service. The token travels in a header,
    /// so the request URL is safe to keep.
    #[error("departure board unreachable: {0}")]
    Http(#[from] reqwest::Error),

    /// The board came back but did not decode; `body` is truncated.
    #[error("departure board did not decode: {message} (body: {body})")]
    Decode { message: String, body: String },

    /// 401 or 403.
    #[error("token rejected by the departure board service")]
    InvalidToken,

    /// 400 or 404 for a station or destination code.
    #[error("station or destination rejected: {0}")]
    InvalidInput(String),

    /// 429. Reported to the form as an unknown failure.
    #[error("departure board service is throttling requests")]
    RateLimited,

    /// Any other non-success status.
    #[error("departure board returned {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failed_lookup() {
        assert_eq!(
            DarwinError::InvalidToken.to_string(),
            "token rejected by the departure board service"
        );
        assert_eq!(
            DarwinError::InvalidInput("QX".into()).to_string(),
            "station or destination rejected: QX"
        );

        let err = DarwinError::UnexpectedStatus {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(
            err.to_string(),
            "departure board returned 500: Internal Server Error"
        );

        let err = DarwinError::Decode {
            message: "expected string".into(),
            body: "{}".into(),
        };
        assert!(err.to_string().starts_with("departure board did not decode"));
        assert!(err.to_string().ends_with("(body: {})"));
    }
}
