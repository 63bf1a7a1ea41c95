//! Error types for oaikit.
//!
//! Every endpoint call reports failures through a single [`Error`] type whose
//! variants are mutually exclusive:
//!
//! - [`Error::Encoding`]: the request could not be built; nothing was sent.
//! - [`Error::Transport`]: the HTTP exchange itself failed (DNS, connect, timeout).
//! - [`Error::RemoteStatus`]: the server answered with a status other than `200 OK`.
//! - [`Error::Decoding`]: a `200 OK` body did not match the expected shape.
//!
//! [`Error::Config`] is only produced while constructing a [`Client`](crate::Client).
//! None of these leave the client in a bad state; it can be reused after any error.

use serde::de::Error as _;

use crate::endpoint::Endpoint;

/// Result type alias for oaikit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for all client operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The request could not be serialized or assembled.
    #[error("error encoding {endpoint} request: {message}")]
    Encoding {
        /// Endpoint family the request was meant for.
        endpoint: Endpoint,
        /// What went wrong.
        message: String,
    },

    /// The network exchange failed before a complete response was received.
    #[error("error making request to {endpoint} API: {source}")]
    Transport {
        /// Endpoint family that was being called.
        endpoint: Endpoint,
        /// Underlying transport failure.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a status other than `200 OK`.
    #[error("{endpoint} API returned non-200 status code: {status}")]
    RemoteStatus {
        /// Endpoint family that was being called.
        endpoint: Endpoint,
        /// HTTP status code returned by the server.
        status: u16,
    },

    /// A success response body did not decode into the expected type.
    #[error("error decoding {endpoint} response body: {source}")]
    Decoding {
        /// Endpoint family that produced the body.
        endpoint: Endpoint,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// The client could not be constructed from the given configuration.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

/// Discriminant of an [`Error`], convenient for matching and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// See [`Error::Encoding`].
    Encoding,
    /// See [`Error::Transport`].
    Transport,
    /// See [`Error::RemoteStatus`].
    RemoteStatus,
    /// See [`Error::Decoding`].
    Decoding,
    /// See [`Error::Config`].
    Config,
}

impl Error {
    /// Create an encoding error.
    #[must_use]
    pub fn encoding(endpoint: Endpoint, message: impl Into<String>) -> Self {
        Self::Encoding {
            endpoint,
            message: message.into(),
        }
    }

    /// Create a transport error.
    #[must_use]
    pub const fn transport(endpoint: Endpoint, source: reqwest::Error) -> Self {
        Self::Transport { endpoint, source }
    }

    /// Create a remote status error.
    #[must_use]
    pub const fn remote_status(endpoint: Endpoint, status: u16) -> Self {
        Self::RemoteStatus { endpoint, status }
    }

    /// Create a decoding error from a JSON parse failure.
    #[must_use]
    pub const fn decoding(endpoint: Endpoint, source: serde_json::Error) -> Self {
        Self::Decoding { endpoint, source }
    }

    /// Create a decoding error from a plain message.
    ///
    /// Used for bodies that are not JSON at all (plain-text transcripts, base64
    /// vectors) so they still surface as [`ErrorKind::Decoding`].
    #[must_use]
    pub fn decoding_message(endpoint: Endpoint, message: impl std::fmt::Display) -> Self {
        Self::Decoding {
            endpoint,
            source: serde_json::Error::custom(message),
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// The kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Encoding { .. } => ErrorKind::Encoding,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::RemoteStatus { .. } => ErrorKind::RemoteStatus,
            Self::Decoding { .. } => ErrorKind::Decoding,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// The endpoint family involved, if the error came from a call.
    #[must_use]
    pub const fn endpoint(&self) -> Option<Endpoint> {
        match self {
            Self::Encoding { endpoint, .. }
            | Self::Transport { endpoint, .. }
            | Self::RemoteStatus { endpoint, .. }
            | Self::Decoding { endpoint, .. } => Some(*endpoint),
            Self::Config(_) => None,
        }
    }

    /// The HTTP status code of a [`Error::RemoteStatus`] error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the transport failure was a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }
}
