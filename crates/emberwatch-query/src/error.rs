//! Error types for the query client.
//!
//! Unlike the stream channels, every operation here is one-shot
//! request/response: failures propagate to the caller and are never
//! retried automatically. A failed query is an explicit error state,
//! distinct from "no data in range".

/// Errors from a remote query.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The request could not be sent or the transport failed mid-flight.
    #[error("request failed: {0}")]
    Http(String),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, best effort.
        body: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The request was rejected client-side before being sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
