use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the feedline workspace.
///
/// Variants fall into three groups: configuration defects (raised at
/// construction, never converted into invalid-source events), connection
/// failures against a backing store, and source-invalid conditions that the
/// dispatcher reports through [`InvalidSourceEvent`](crate::InvalidSourceEvent).
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FeedError {
    /// A header required by the transport is absent from the descriptor.
    #[error("missing header: {key}")]
    MissingHeader {
        /// Header key that was looked up.
        key: String,
    },

    /// A header is present but its value cannot be interpreted.
    #[error("invalid header {key}: '{value}'")]
    InvalidHeader {
        /// Header key.
        key: String,
        /// Raw header value.
        value: String,
    },

    /// The requested resolution has no collection layout or line rendering.
    #[error("resolution: '{resolution}' not supported")]
    UnsupportedResolution {
        /// Resolution label as requested.
        resolution: String,
    },

    /// A transport medium tag did not name any known medium.
    #[error("unexpected transport medium: '{tag}'")]
    UnknownTransport {
        /// The unrecognised tag.
        tag: String,
    },

    /// Invalid or unusable configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The backing store could not be reached.
    #[error("connection to {endpoint} failed: {msg}")]
    Connection {
        /// Endpoint that was dialled, e.g. `mongodb://localhost:27017`.
        endpoint: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The backing store rejected or failed a query.
    #[error("query failed: {msg}")]
    Query {
        /// Human-readable error message.
        msg: String,
    },

    /// Issues with the returned data (missing fields, wrong types, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Local filesystem failure.
    #[error("io error on {path}: {msg}")]
    Io {
        /// Path being read or written.
        path: String,
        /// Human-readable error message.
        msg: String,
    },

    /// An HTTP transport failed or returned a non-success status.
    #[error("http request to {url} failed (status {status:?}): {msg}")]
    Http {
        /// Requested URL.
        url: String,
        /// Response status code, if a response was received.
        status: Option<u16>,
        /// Human-readable error message.
        msg: String,
    },

    /// The reader was constructed but holds no records.
    #[error("the reader was empty for source: {locator}")]
    EmptySource {
        /// Locator of the empty source.
        locator: String,
    },

    /// `read_line` was called after the stream was exhausted.
    #[error("read past end of stream")]
    EndOfStream,
}

impl FeedError {
    /// Helper: build a `MissingHeader` error.
    pub fn missing_header(key: impl Into<String>) -> Self {
        Self::MissingHeader { key: key.into() }
    }

    /// Helper: build an `InvalidHeader` error.
    pub fn invalid_header(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidHeader {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Helper: build an `UnsupportedResolution` error.
    pub fn unsupported_resolution(resolution: impl Into<String>) -> Self {
        Self::UnsupportedResolution {
            resolution: resolution.into(),
        }
    }

    /// Helper: build a `Connection` error.
    pub fn connection(endpoint: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connection {
            endpoint: endpoint.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Query` error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query { msg: msg.into() }
    }

    /// Helper: build an `Io` error for a path.
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            msg: err.to_string(),
        }
    }

    /// Helper: build an `Http` error.
    pub fn http(url: impl Into<String>, status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::Http {
            url: url.into(),
            status,
            msg: msg.into(),
        }
    }

    /// Helper: build an `EmptySource` error.
    pub fn empty_source(locator: impl Into<String>) -> Self {
        Self::EmptySource {
            locator: locator.into(),
        }
    }

    /// Returns true for defects in the calling configuration.
    ///
    /// These are raised immediately and are never reported as invalid sources.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingHeader { .. }
                | Self::InvalidHeader { .. }
                | Self::UnsupportedResolution { .. }
                | Self::UnknownTransport { .. }
                | Self::Config(_)
        )
    }

    /// Returns true if the error means "this one source has no usable data".
    #[must_use]
    pub const fn is_source_invalid(&self) -> bool {
        !self.is_configuration()
    }
}
