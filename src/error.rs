use thiserror::Error;

use crate::http::TransportError;
use crate::sink::SinkError;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the request/response plugins and the data source.
#[derive(Debug, Error)]
pub enum Error {
    /// A response property was addressed by a name that does not exist.
    ///
    /// This is a configuration mistake in the calling controller and is
    /// never retried or swallowed.
    #[error("response property doesn't exist: {0}")]
    UnknownProperty(String),

    /// A property exists but the supplied value has the wrong shape.
    #[error("invalid value for response property '{property}': {reason}")]
    InvalidPropertyValue {
        /// The property being assigned
        property: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Component settings could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An item operation was requested on a model without an id.
    #[error("model '{0}' has no id")]
    MissingId(String),

    /// The outbound HTTP call failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The remote API answered with something that is not JSON.
    #[error("failed to decode remote response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The response envelope could not be serialized.
    #[error("failed to serialize response envelope: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Writing the response failed.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_property_names_the_property() {
        let err = Error::UnknownProperty("responseCod".to_string());
        assert_eq!(err.to_string(), "response property doesn't exist: responseCod");
    }

    #[test]
    fn transport_error_is_transparent() {
        let err: Error = TransportError::new("connection refused").into();
        assert_eq!(err.to_string(), "transport error: connection refused");
    }
}
