//! Errors raised by the relief API client

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server answered but refused the operation
    #[error("{message} (HTTP {status})")]
    Rejected { status: u16, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display() {
        let err = ApiError::Rejected {
            status: 400,
            message: "Only pending applications can be approved.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Only pending applications can be approved. (HTTP 400)"
        );
    }

    #[test]
    fn test_decode_from_serde() {
        let err: ApiError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("unexpected response body"));
    }
}
