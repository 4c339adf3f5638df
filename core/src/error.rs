//! Error types for the todo API client.
//!
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from other failures. Error responses that
//! carry the server's `{"error":{...}}` envelope become `Api`; anything else
//! non-2xx lands in `HttpError` with the raw body.

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,

    /// The server rejected the request and explained why.
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// A non-2xx status without a recognizable error envelope.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}
