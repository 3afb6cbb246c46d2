//! Endpoint URI abstraction for transport-agnostic endpoint addressing.
//!
//! Splits `scheme://host:port` into its parts without judging the scheme;
//! scheme validation against the protocol allowlist happens during
//! configuration resolution.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// A parsed endpoint URI.
///
/// The scheme is kept verbatim; whether it names a supported protocol is
/// decided by [`EndpointConfig::parse_uri`](crate::config::EndpointConfig::parse_uri)
/// against the caller's allowlist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointUri {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl EndpointUri {
    /// Parse an endpoint URI from a string.
    ///
    /// Supported formats:
    /// - `tcp://127.0.0.1:5555`
    /// - `udp://broadcast.local:9000`
    /// - `tcp://[::1]:5555` (IPv6)
    /// - `tcp://localhost` (port left unset)
    ///
    /// # Examples
    ///
    /// ```
    /// use longeron_core::endpoint::EndpointUri;
    ///
    /// let uri = EndpointUri::parse("tcp://localhost:5000").unwrap();
    /// assert_eq!(uri.scheme(), "tcp");
    /// assert_eq!(uri.host(), "localhost");
    /// assert_eq!(uri.port(), Some(5000));
    /// ```
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        s.parse()
    }

    /// The URI scheme, verbatim.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The host part, with IPv6 brackets stripped.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The port, if one was given.
    pub fn port(&self) -> Option<u16> {
        self.port
    }
}

impl FromStr for EndpointUri {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scheme, rest) = s
            .split_once("://")
            .ok_or_else(|| ConfigError::InvalidUri(s.to_string()))?;
        if scheme.is_empty() || rest.is_empty() {
            return Err(ConfigError::InvalidUri(s.to_string()));
        }

        // Authority only; a query or path does not belong here. The caller
        // hands query parameters in through the parameter bag instead.
        if rest.contains('/') || rest.contains('?') {
            return Err(ConfigError::InvalidUri(s.to_string()));
        }

        let (host, port) = if let Some(bracketed) = rest.strip_prefix('[') {
            // IPv6 literal: [::1]:5555 or [::1]
            let (host, tail) = bracketed
                .split_once(']')
                .ok_or_else(|| ConfigError::InvalidUri(s.to_string()))?;
            match tail.strip_prefix(':') {
                Some(port) => (host, Some(port)),
                None if tail.is_empty() => (host, None),
                None => return Err(ConfigError::InvalidUri(s.to_string())),
            }
        } else {
            match rest.rsplit_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (rest, None),
            }
        };

        if host.is_empty() {
            return Err(ConfigError::InvalidUri(s.to_string()));
        }

        let port = match port {
            Some(p) => Some(
                p.parse::<u16>()
                    .map_err(|_| ConfigError::InvalidUri(s.to_string()))?,
            ),
            None => None,
        };

        Ok(EndpointUri {
            scheme: scheme.to_string(),
            host: host.to_string(),
            port,
        })
    }
}

impl fmt::Display for EndpointUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bracketed = self.host.contains(':');
        match (bracketed, self.port) {
            (true, Some(port)) => write!(f, "{}://[{}]:{}", self.scheme, self.host, port),
            (true, None) => write!(f, "{}://[{}]", self.scheme, self.host),
            (false, Some(port)) => write!(f, "{}://{}:{}", self.scheme, self.host, port),
            (false, None) => write!(f, "{}://{}", self.scheme, self.host),
        }
    }
}
