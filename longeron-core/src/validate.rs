//! Handler-safety validation.
//!
//! Pipeline handlers that hold per-connection mutable state must not be
//! shared verbatim across connections. A configured entry is safe when it
//! is a handler factory (fresh instance per connection) or an instance
//! explicitly declared shareable. Everything else gets a warning; the
//! default mode favors availability over strictness because plenty of
//! real-world handlers are safe without declaring it.

use std::fmt;

use tracing::warn;

use crate::config::EndpointConfig;
use crate::error::{ConfigError, Result};
use crate::handler::HandlerRef;

/// Where an unsafe handler was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerPosition {
    Encoder,
    Decoder,
    SslHandler,
}

impl HandlerPosition {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Encoder => "encoder",
            Self::Decoder => "decoder",
            Self::SslHandler => "sslHandler",
        }
    }
}

/// A non-fatal validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Which configured list the handler came from.
    pub position: HandlerPosition,
    /// Name of the offending handler.
    pub handler: String,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The {} {} is not shareable or a handler factory instance. The {} cannot safely be used.",
            self.position.as_str(),
            self.handler,
            self.position.as_str(),
        )
    }
}

impl EndpointConfig {
    /// Best-effort safety check on the configured handlers.
    ///
    /// Applied identically to every encoder, every decoder, and the TLS
    /// handler if present. Never fails; each unsafe entry yields one
    /// warning, logged and returned. The entry itself stays configured.
    pub fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        for encoder in &self.encoders {
            check(encoder, HandlerPosition::Encoder, &mut warnings);
        }
        for decoder in &self.decoders {
            check(decoder, HandlerPosition::Decoder, &mut warnings);
        }
        if let Some(ssl_handler) = &self.ssl_handler {
            check(ssl_handler, HandlerPosition::SslHandler, &mut warnings);
        }

        warnings
    }

    /// Opt-in reject mode: fail on the first unsafe handler instead of
    /// warning. Use when silent unsafe sharing is not an acceptable risk.
    pub fn validate_strict(&self) -> Result<()> {
        match self.validate().into_iter().next() {
            None => Ok(()),
            Some(warning) => Err(ConfigError::UnsafeHandler(warning.handler)),
        }
    }
}

fn check(entry: &HandlerRef, position: HandlerPosition, warnings: &mut Vec<ValidationWarning>) {
    if entry.is_safely_shareable() {
        return;
    }
    let warning = ValidationWarning {
        position,
        handler: entry.name().to_string(),
    };
    warn!("{warning}");
    warnings.push(warning);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::codec;
    use crate::handler::test_support::{NamedFactory, NamedHandler};

    #[test]
    fn test_compliant_handlers_produce_no_warnings() {
        let mut config = EndpointConfig::new();
        config.add_encoder(HandlerRef::factory(Arc::new(NamedFactory("enc"))));
        config.add_decoder(HandlerRef::shared(Arc::new(NamedHandler("dec"))));
        assert!(config.validate().is_empty());
        assert!(config.validate_strict().is_ok());
    }

    #[test]
    fn test_one_warning_per_unsafe_occurrence() {
        let mut config = EndpointConfig::new();
        config.add_encoder(HandlerRef::exclusive(Arc::new(NamedHandler("enc"))));
        config.add_decoder(HandlerRef::exclusive(Arc::new(NamedHandler("dec-a"))));
        config.add_decoder(HandlerRef::exclusive(Arc::new(NamedHandler("dec-b"))));

        let warnings = config.validate();
        assert_eq!(warnings.len(), 3);
        assert_eq!(warnings[0].position, HandlerPosition::Encoder);
        assert_eq!(warnings[1].handler, "dec-a");
        assert_eq!(warnings[2].handler, "dec-b");
    }

    #[test]
    fn test_ssl_handler_checked_independently() {
        let mut config = EndpointConfig::new();
        config.ssl_handler = Some(HandlerRef::exclusive(Arc::new(NamedHandler("tls"))));

        let warnings = config.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].position, HandlerPosition::SslHandler);
        assert_eq!(warnings[0].handler, "tls");
    }

    #[test]
    fn test_default_codec_passes_validation() {
        let mut config = EndpointConfig::new();
        config.add_encoder(codec::new_object_encoder());
        config.add_decoder(codec::new_object_decoder());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_strict_mode_rejects() {
        let mut config = EndpointConfig::new();
        config.add_decoder(HandlerRef::exclusive(Arc::new(NamedHandler("stateful"))));
        let err = config.validate_strict().unwrap_err();
        assert!(matches!(err, ConfigError::UnsafeHandler(name) if name == "stateful"));
    }

    #[test]
    fn test_warning_message_names_the_handler() {
        let warning = ValidationWarning {
            position: HandlerPosition::Decoder,
            handler: "my-decoder".to_string(),
        };
        let rendered = warning.to_string();
        assert!(rendered.contains("decoder"));
        assert!(rendered.contains("my-decoder"));
    }
}
