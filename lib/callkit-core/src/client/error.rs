use std::fmt;

use crate::client::serializer::SerializationError;

/// Errors that can occur while turning arguments into a request.
///
/// Every variant is fatal for the current request: no partial
/// [`RequestDescriptor`](crate::RequestDescriptor) is ever produced.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ApiClientError {
    /// HTTP client error from the underlying reqwest library.
    ///
    /// Only produced by the [`ReqwestTransport`](crate::ReqwestTransport).
    ReqwestError(reqwest::Error),

    /// URL parsing error when converting a descriptor into a reqwest request.
    UrlError(url::ParseError),

    /// Invalid HTTP header name.
    InvalidHeaderName(http::header::InvalidHeaderName),

    /// Invalid HTTP header value.
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// JSON serialization error.
    ///
    /// Occurs when an argument cannot be turned into a JSON value.
    JsonValueError(serde_json::Error),

    /// Query parameter serialization error.
    QuerySerializationError(serde_urlencoded::ser::Error),

    /// The declared type is neither a model, an array, nor a known scalar.
    #[display("Unknown type '{type_name}' for argument '{name}'")]
    #[from(skip)]
    UnknownType {
        /// The offending type name.
        type_name: String,
        /// The argument that declared it.
        name: String,
    },

    /// An argument value could not be serialized for the wire.
    #[display("Failed to serialize argument '{name}': {source}")]
    #[from(skip)]
    Serialization {
        /// The argument being serialized.
        name: String,
        /// The serializer failure.
        source: SerializationError,
    },

    /// Path template contains unresolved parameters.
    ///
    /// Only raised with [`PathPolicy::Strict`](crate::PathPolicy::Strict).
    #[display("Path '{path}' is missing required arguments: {missings:?}")]
    #[from(skip)]
    PathUnresolved {
        /// The path as far as it could be substituted.
        path: String,
        /// List of missing parameter names.
        missings: Vec<String>,
    },

    /// The selected server index does not point into the server list.
    #[display("Invalid server index {index}, {count} server(s) configured")]
    #[from(skip)]
    InvalidServerIndex {
        /// The selected index.
        index: usize,
        /// Number of configured servers.
        count: usize,
    },
}

/// Failure of a complete call: either the request could not be assembled,
/// or the transport rejected it.
///
/// Transport errors are kept as-is so callers can inspect the original failure.
#[derive(Debug)]
pub enum CallError<E> {
    /// The request could not be assembled.
    Request(ApiClientError),
    /// The transport failed.
    Transport(E),
}

impl<E> CallError<E> {
    /// Returns the transport error, if the failure came from the transport.
    pub fn into_transport(self) -> Option<E> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Request(_) => None,
        }
    }
}

impl<E> From<ApiClientError> for CallError<E> {
    fn from(value: ApiClientError) -> Self {
        Self::Request(value)
    }
}

impl<E: fmt::Display> fmt::Display for CallError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(err) => write!(f, "Failed to build request: {err}"),
            Self::Transport(err) => write!(f, "Transport error: {err}"),
        }
    }
}

impl<E> std::error::Error for CallError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request(err) => Some(err),
            Self::Transport(err) => Some(err),
        }
    }
}
