use std::time::Duration;
use thiserror::Error;

pub const MISSING_CREDENTIALS_MESSAGE: &str =
    "Authentication token not found. Please log in again.";

/// Every failure the gateway and the credential store surface.
///
/// The `Display` output is meant to be shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An authenticated call was attempted without a stored token.
    /// Raised before any network traffic.
    #[error("Authentication token not found. Please log in again.")]
    MissingCredentials,

    /// The backend answered with a non-success status.
    #[error("{0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    StorageWriteFailure(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request timed out after {}", format_limit(.0))]
    Timeout(Duration),

    #[error("{0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

fn format_limit(limit: &Duration) -> String {
    if limit.as_millis() < 1000 {
        format!("{}ms", limit.as_millis())
    } else if limit.subsec_millis() == 0 {
        format!("{}s", limit.as_secs())
    } else {
        format!("{:.1}s", limit.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_display_ready() {
        assert_eq!(
            Error::MissingCredentials.to_string(),
            MISSING_CREDENTIALS_MESSAGE
        );
        assert_eq!(
            Error::RequestFailed("Bad credentials".to_string()).to_string(),
            "Bad credentials"
        );
        assert_eq!(
            Error::Timeout(Duration::from_secs(30)).to_string(),
            "Request timed out after 30s"
        );
        assert_eq!(
            Error::Timeout(Duration::from_millis(200)).to_string(),
            "Request timed out after 200ms"
        );
        assert_eq!(
            Error::Timeout(Duration::from_millis(2500)).to_string(),
            "Request timed out after 2.5s"
        );
    }
}
