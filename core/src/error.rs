//! Error types for the CMS API client.
//!
//! # Design
//! The CMS contract treats every status ≥ 400 as a uniform failure whose body
//! is opaque text, so `Request` carries the raw status and body rather than
//! per-status variants. `Transport` exists for the no-response case and is
//! constructed at the I/O boundary by the host, never by the parse methods.

use std::fmt;

/// Errors returned by `CmsClient` build/parse methods and fetch hosts.
#[derive(Debug)]
pub enum ApiError {
    /// No response was received at all (connection refused, DNS, timeout).
    Transport(String),

    /// The server responded with a status ≥ 400. The body is not guaranteed
    /// to be JSON and is carried as opaque text.
    Request { status: u16, text: String },

    /// The request payload could not be serialized to JSON.
    Serialization(String),

    /// The response body did not match the expected DTO shape. A contract
    /// error — there is no partial result to recover.
    Mapping(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport failure: {msg}"),
            ApiError::Request { status, text } => {
                write!(f, "HTTP {status}: {text}")
            }
            ApiError::Serialization(msg) => {
                write!(f, "serialization failed: {msg}")
            }
            ApiError::Mapping(msg) => {
                write!(f, "response mapping failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
