//! Error types shared by the embedding backend.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`EmbeddingError`] failures.
pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

/// Failures that can occur while requesting embeddings.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Required environment variable is missing.
    #[error("missing embedding environment variable `{var}`")]
    MissingEnvVar {
        /// Name of the variable that was not set.
        var: &'static str,
    },
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build embedding client")]
    ClientBuilder {
        /// Underlying client construction failure.
        #[source]
        source: reqwest::Error,
    },
    /// A request to the embeddings endpoint could not be sent.
    #[error("failed to send embedding request")]
    RequestSend {
        /// Underlying transport failure.
        #[source]
        source: reqwest::Error,
    },
    /// The backend returned a non-success status code.
    #[error("unexpected embedding response status {status}")]
    RequestStatus {
        /// Status code reported by the backend.
        status: StatusCode,
    },
    /// Response payload could not be parsed into JSON.
    #[error("failed to decode embedding response")]
    DecodeResponse {
        /// Underlying decode failure.
        #[source]
        source: reqwest::Error,
    },
    /// The backend answered successfully but returned no embedding data.
    #[error("embedding response contained no data")]
    EmptyResponse,
}
