//! Error types for the parameter-echo client.
//!
//! 405 and 406 get dedicated variants because they are the two refusals the
//! form endpoints define. Every other non-200 lands in `HttpError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The endpoint only accepts POST.
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),

    /// The listing endpoint received no parameters.
    #[error("no parameters submitted: {0}")]
    NoParameters(String),

    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// A 200 body that does not have the endpoint's text layout.
    #[error("unexpected response body: {0:?}")]
    UnexpectedBody(String),

    /// An input the endpoint would echo in a form the parser cannot read
    /// back, such as a value containing a line break.
    #[error("input cannot be echoed unambiguously: {0:?}")]
    AmbiguousInput(String),

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}
