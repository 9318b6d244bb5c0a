//! Error types for the interaction logger.
//!
//! [`TransportError`] covers everything that collapses into the generic
//! "network error" message: the request could not be built or sent, or the
//! response body could not be read as JSON. [`DomError`] is raised while
//! binding the handler to a host document.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The configured base URL (or the joined endpoint) is not a valid URL.
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request could not be sent or its body could not be read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body is not JSON.
    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response body is the JSON literal `null`, which has no fields to read.
    #[error("response body is null")]
    NullBody,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomError {
    #[error("element `{0}` not found in host document")]
    MissingElement(String),

    #[error("element `{id}` is not {expected}")]
    WrongElementKind { id: String, expected: &'static str },
}
