// src/error.rs
use thiserror::Error;

/// Failures talking to the analysis backend
#[derive(Debug, Error)]
pub enum ClientError {
    /// Any non-2xx answer. The body is not read.
    #[error("Server responded {0}")]
    Status(u16),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Why a submission attempt ended without a new result
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Upload both files")]
    MissingInput,

    #[error("An analysis is already in progress")]
    AlreadyRunning,

    #[error("Request failed: {0}")]
    Request(#[from] ClientError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(SubmitError::MissingInput.to_string(), "Upload both files");
        assert_eq!(
            SubmitError::from(ClientError::Status(502)).to_string(),
            "Request failed: Server responded 502"
        );
    }
}
