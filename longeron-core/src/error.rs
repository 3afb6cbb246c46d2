/// Longeron Configuration Error Types
///
/// Error handling for endpoint URI parsing and configuration resolution.

use thiserror::Error;

/// Main error type for configuration resolution.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// URI could not be parsed into scheme/host/port
    #[error("Invalid endpoint URI: {0}")]
    InvalidUri(String),

    /// URI scheme not in the caller-supplied protocol allowlist
    #[error("Unrecognized protocol: {scheme} for uri: {uri}")]
    InvalidProtocol { scheme: String, uri: String },

    /// Configured character encoding is not recognized by the runtime
    #[error("The encoding: {0} is not supported")]
    UnsupportedEncoding(String),

    /// A parameter value could not be converted to the target field type
    #[error("Invalid value for parameter {name}: {value} (expected {expected})")]
    InvalidParameter {
        name: String,
        value: String,
        expected: &'static str,
    },

    /// A named registry reference could not be resolved
    #[error("No bean could be found in the registry for: {0}")]
    UnknownReference(String),

    /// Strict validation rejected a handler that is neither shareable
    /// nor produced by a factory
    #[error("The handler {0} is not shareable or a handler factory and cannot safely be used")]
    UnsafeHandler(String),
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
    /// Create an invalid parameter error with a message
    pub fn invalid_parameter(
        name: impl Into<String>,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value: value.into(),
            expected,
        }
    }

    /// Check if this error is fatal to resolution.
    ///
    /// All resolution-time errors abort the pass; only strict-mode
    /// validation findings are opt-in.
    #[must_use]
    pub const fn is_resolution_error(&self) -> bool {
        !matches!(self, Self::UnsafeHandler(_))
    }
}
