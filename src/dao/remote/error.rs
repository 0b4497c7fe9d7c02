use reqwest::StatusCode;
use thiserror::Error;

/// Result alias for remote API calls.
pub type RemoteResult<T> = Result<T, RemoteDaoError>;

/// Errors raised while talking to the remote domain API.
#[derive(Debug, Error)]
pub enum RemoteDaoError {
    /// The HTTP client could not be constructed.
    #[error("failed to build remote API client")]
    ClientBuilder {
        /// Builder failure.
        #[source]
        source: reqwest::Error,
    },
    /// The request never completed (connect failure, timeout, …).
    #[error("remote API request to `{url}` failed")]
    RequestSend {
        /// Absolute URL of the failed call.
        url: String,
        /// Transport failure.
        #[source]
        source: reqwest::Error,
    },
    /// The remote answered with a non-success status.
    #[error("remote API request to `{url}` returned status {status}")]
    RequestStatus {
        /// Absolute URL of the failed call.
        url: String,
        /// Status the remote answered with.
        status: StatusCode,
    },
    /// The response body did not match the expected shape.
    #[error("failed to decode remote API response from `{url}`")]
    DecodeResponse {
        /// Absolute URL of the call.
        url: String,
        /// Decode failure.
        #[source]
        source: reqwest::Error,
    },
}

impl RemoteDaoError {
    /// Upstream HTTP status, when the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteDaoError::RequestStatus { status, .. } => Some(status.as_u16()),
            _ => None,
        }
    }

    /// URL of the failed call, when known.
    pub fn url(&self) -> Option<&str> {
        match self {
            RemoteDaoError::RequestSend { url, .. }
            | RemoteDaoError::RequestStatus { url, .. }
            | RemoteDaoError::DecodeResponse { url, .. } => Some(url),
            RemoteDaoError::ClientBuilder { .. } => None,
        }
    }
}
