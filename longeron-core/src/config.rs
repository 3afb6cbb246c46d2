//! Endpoint configuration value object.
//!
//! This module provides the settings object consumed by the TCP/UDP
//! transport layer. An instance starts with scheme-appropriate defaults,
//! is populated in place by the resolver (see `resolver`), validated
//! (see `validate`) and then treated as immutable by all consumers.
//! Clone one before any per-connection override.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use hashbrown::HashMap;
use tracing::Level;

use crate::codec::{Charset, TextLineDelimiter};
use crate::error::Result;
use crate::handler::{HandlerRef, PipelineAssembler};
use crate::resolver::ParamValue;

/// Endpoint configuration.
///
/// Field defaults follow the option schema in [`crate::schema`]. The
/// encoder/decoder lists are pipeline-ordered; insertion order is the
/// order handlers run in.
///
/// # Examples
///
/// ```
/// use longeron_core::config::EndpointConfig;
///
/// let config = EndpointConfig::new()
///     .with_textline(true)
///     .with_decoder_max_line_length(512);
/// assert!(config.sync);
/// ```
#[derive(Debug)]
pub struct EndpointConfig {
    /// URI scheme, set once resolution has matched it against the
    /// caller's protocol allowlist.
    pub protocol: Option<String>,

    /// Remote or bind host from the URI.
    pub host: Option<String>,

    /// Remote or bind port from the URI.
    pub port: Option<u16>,

    /// Producer timeout when calling a remote server.
    ///
    /// Carried through to the transport layer, not enforced here.
    /// - `None`: no timeout (default)
    pub request_timeout: Option<Duration>,

    /// Request-reply (true) vs fire-and-forget (false).
    /// - Default: true
    pub sync: bool,

    /// Use the textline codec as the default codec. TCP only; when false,
    /// object serialization is assumed.
    /// - Default: false
    pub textline: bool,

    /// Delimiter for the textline codec.
    /// - Default: LINE
    pub delimiter: TextLineDelimiter,

    /// Append a missing end delimiter when sending with the textline codec.
    /// - Default: true
    pub auto_append_delimiter: bool,

    /// Max frame length in bytes for the textline codec.
    /// - Default: 1024
    pub decoder_max_line_length: usize,

    /// Charset name for the textline codec.
    ///
    /// Validated lazily, only when a charset is actually needed.
    /// - `None`: process default (UTF-8)
    pub encoding: Option<String>,

    /// Ordered outbound handler pipeline.
    pub encoders: Vec<HandlerRef>,

    /// Ordered inbound handler pipeline.
    pub decoders: Vec<HandlerRef>,

    /// Close the connection right after use.
    /// - Default: false
    pub disconnect: bool,

    /// Establish producer connections lazily so a down remote does not
    /// fail startup.
    /// - Default: true
    pub lazy_connect: bool,

    /// When sync is enabled, disconnect the consumer when there is no
    /// reply to send back.
    /// - Default: true
    pub disconnect_on_no_reply: bool,

    /// Log level used when there is no reply to send back.
    /// - Default: WARN
    pub no_reply_log_level: Level,

    /// Log level used when the server catches an exception.
    /// - Default: WARN
    pub server_exception_log_level: Level,

    /// Log level for closed-channel errors. Kept low so abrupt client
    /// disconnects do not flood the server log.
    /// - Default: DEBUG
    pub server_closed_channel_log_level: Level,

    /// Permit installing a default codec when both handler lists are
    /// empty after resolution.
    /// - Default: true
    pub allow_default_codec: bool,

    /// Custom client-side pipeline assembler.
    pub client_assembler: Option<Arc<dyn PipelineAssembler>>,

    /// Custom server-side pipeline assembler.
    pub server_assembler: Option<Arc<dyn PipelineAssembler>>,

    /// Core pool size for the ordered executor, if in use.
    /// - Default: 16
    pub maximum_pool_size: usize,

    /// Process events in order per connection via the ordered executor.
    /// - Default: true
    pub ordered_executor: bool,

    /// Max queued bytes per connection for the ordered executor.
    /// - Default: 10 MiB; 0 disables
    pub max_channel_memory_size: u64,

    /// Max queued bytes across the ordered executor.
    /// - Default: 200 MiB; 0 disables
    pub max_total_memory_size: u64,

    /// Pool producer connections. Needed for concurrency and reliable
    /// request-reply; do not turn off lightly.
    /// - Default: true
    pub producer_pool_enabled: bool,

    /// Cap on pooled producers, checked out or idle.
    /// - Default: -1 (negative means no limit)
    pub producer_pool_max_active: i32,

    /// Minimum idle instances before the evictor spawns new objects.
    /// - Default: 0
    pub producer_pool_min_idle: usize,

    /// Cap on idle instances in the producer pool.
    /// - Default: 100
    pub producer_pool_max_idle: usize,

    /// Time an instance may sit idle in the pool before it is eligible
    /// for eviction.
    /// - Default: 5 minutes
    pub producer_pool_min_evictable_idle: Duration,

    /// Fire-and-forget UDP send without a connected socket. A connected
    /// UDP send surfaces port-unreachable errors; connectionless does not.
    /// - Default: false
    pub udp_connectionless_sending: bool,

    /// Consumer connects to the address as a TCP client instead of
    /// binding.
    /// - Default: false
    pub client_mode: bool,

    /// Enable TLS on the endpoint.
    /// - Default: false
    pub ssl: bool,

    /// Pre-built TLS handler, usually resolved from the registry.
    pub ssl_handler: Option<HandlerRef>,

    /// Passphrase for the key/trust store.
    pub passphrase: Option<String>,

    /// Key store format.
    /// - Default: "JKS"
    pub key_store_format: String,

    /// Security provider used for payload encryption.
    /// - Default: "SunX509"
    pub security_provider: String,

    /// Client-side certificate key store path.
    pub key_store_file: Option<PathBuf>,

    /// Server-side certificate key store path.
    pub trust_store_file: Option<PathBuf>,

    /// Named resource reference for the key store.
    pub key_store_resource: Option<String>,

    /// Named resource reference for the trust store.
    pub trust_store_resource: Option<String>,

    /// Passthrough options forwarded opaquely to the transport layer.
    ///
    /// `None` when no `option.` parameters were supplied; never an empty
    /// but present map. The transport layer relies on that distinction.
    pub options: Option<Arc<HashMap<String, ParamValue>>>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            protocol: None,
            host: None,
            port: None,
            request_timeout: None,
            sync: true,
            textline: false,
            delimiter: TextLineDelimiter::Line,
            auto_append_delimiter: true,
            decoder_max_line_length: 1024,
            encoding: None,
            encoders: Vec::new(),
            decoders: Vec::new(),
            disconnect: false,
            lazy_connect: true,
            disconnect_on_no_reply: true,
            no_reply_log_level: Level::WARN,
            server_exception_log_level: Level::WARN,
            server_closed_channel_log_level: Level::DEBUG,
            allow_default_codec: true,
            client_assembler: None,
            server_assembler: None,
            maximum_pool_size: 16,
            ordered_executor: true,
            max_channel_memory_size: 10 * 1024 * 1024,
            max_total_memory_size: 200 * 1024 * 1024,
            producer_pool_enabled: true,
            producer_pool_max_active: -1,
            producer_pool_min_idle: 0,
            producer_pool_max_idle: 100,
            producer_pool_min_evictable_idle: Duration::from_secs(5 * 60),
            udp_connectionless_sending: false,
            client_mode: false,
            ssl: false,
            ssl_handler: None,
            passphrase: None,
            key_store_format: "JKS".to_string(),
            security_provider: "SunX509".to_string(),
            key_store_file: None,
            trust_store_file: None,
            key_store_resource: None,
            trust_store_resource: None,
            options: None,
        }
    }
}

// A hand-written copy over the known field set: total, never fails.
// The two handler lists get their own backing storage; scalar fields are
// value-copied; Arc-typed fields (assemblers, TLS handler contents,
// passthrough options) share identity with the original.
impl Clone for EndpointConfig {
    fn clone(&self) -> Self {
        Self {
            protocol: self.protocol.clone(),
            host: self.host.clone(),
            port: self.port,
            request_timeout: self.request_timeout,
            sync: self.sync,
            textline: self.textline,
            delimiter: self.delimiter,
            auto_append_delimiter: self.auto_append_delimiter,
            decoder_max_line_length: self.decoder_max_line_length,
            encoding: self.encoding.clone(),
            encoders: self.encoders.clone(),
            decoders: self.decoders.clone(),
            disconnect: self.disconnect,
            lazy_connect: self.lazy_connect,
            disconnect_on_no_reply: self.disconnect_on_no_reply,
            no_reply_log_level: self.no_reply_log_level,
            server_exception_log_level: self.server_exception_log_level,
            server_closed_channel_log_level: self.server_closed_channel_log_level,
            allow_default_codec: self.allow_default_codec,
            client_assembler: self.client_assembler.clone(),
            server_assembler: self.server_assembler.clone(),
            maximum_pool_size: self.maximum_pool_size,
            ordered_executor: self.ordered_executor,
            max_channel_memory_size: self.max_channel_memory_size,
            max_total_memory_size: self.max_total_memory_size,
            producer_pool_enabled: self.producer_pool_enabled,
            producer_pool_max_active: self.producer_pool_max_active,
            producer_pool_min_idle: self.producer_pool_min_idle,
            producer_pool_max_idle: self.producer_pool_max_idle,
            producer_pool_min_evictable_idle: self.producer_pool_min_evictable_idle,
            udp_connectionless_sending: self.udp_connectionless_sending,
            client_mode: self.client_mode,
            ssl: self.ssl,
            ssl_handler: self.ssl_handler.clone(),
            passphrase: self.passphrase.clone(),
            key_store_format: self.key_store_format.clone(),
            security_provider: self.security_provider.clone(),
            key_store_file: self.key_store_file.clone(),
            trust_store_file: self.trust_store_file.clone(),
            key_store_resource: self.key_store_resource.clone(),
            trust_store_resource: self.trust_store_resource.clone(),
            options: self.options.clone(),
        }
    }
}

impl EndpointConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set request-reply vs fire-and-forget mode.
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Enable or disable the textline default codec.
    pub fn with_textline(mut self, textline: bool) -> Self {
        self.textline = textline;
        self
    }

    /// Set the textline delimiter.
    pub fn with_delimiter(mut self, delimiter: TextLineDelimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the max frame length for the textline codec.
    pub fn with_decoder_max_line_length(mut self, length: usize) -> Self {
        self.decoder_max_line_length = length;
        self
    }

    /// Set the charset name for the textline codec.
    ///
    /// The name is validated lazily; see [`EndpointConfig::charset`].
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Permit or forbid default codec installation.
    pub fn with_allow_default_codec(mut self, allow: bool) -> Self {
        self.allow_default_codec = allow;
        self
    }

    /// Set the producer request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Enable or disable disconnect-after-use.
    pub fn with_disconnect(mut self, disconnect: bool) -> Self {
        self.disconnect = disconnect;
        self
    }

    /// Set consumer client mode.
    pub fn with_client_mode(mut self, client_mode: bool) -> Self {
        self.client_mode = client_mode;
        self
    }

    /// Enable TLS.
    pub fn with_ssl(mut self, ssl: bool) -> Self {
        self.ssl = ssl;
        self
    }

    /// Append an encoder to the outbound pipeline.
    pub fn add_encoder(&mut self, encoder: HandlerRef) {
        self.encoders.push(encoder);
    }

    /// Append a decoder to the inbound pipeline.
    pub fn add_decoder(&mut self, decoder: HandlerRef) {
        self.decoders.push(decoder);
    }

    /// Resolve the effective charset for the textline codec.
    ///
    /// Falls back to the process default (UTF-8) when no `encoding` was
    /// configured. Fails with `UnsupportedEncoding` when the configured
    /// name is not recognized.
    pub fn charset(&self) -> Result<Charset> {
        match &self.encoding {
            Some(name) => Charset::for_name(name),
            None => Ok(Charset::default()),
        }
    }

    /// The canonical name of the configured charset, or `None` when no
    /// encoding was configured.
    pub fn charset_name(&self) -> Result<Option<&'static str>> {
        match &self.encoding {
            None => Ok(None),
            Some(name) => Ok(Some(Charset::for_name(name)?.name())),
        }
    }

    /// The first configured encoder, if any.
    pub fn encoder(&self) -> Option<&HandlerRef> {
        self.encoders.first()
    }

    /// The first configured decoder, if any.
    pub fn decoder(&self) -> Option<&HandlerRef> {
        self.decoders.first()
    }

    /// Freeze the configuration for concurrent consumption.
    ///
    /// Consumers needing a per-instance override should clone before
    /// freezing, not mutate through the shared handle.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use crate::handler::test_support::NamedHandler;

    #[test]
    fn test_defaults() {
        let config = EndpointConfig::default();
        assert!(config.sync);
        assert!(!config.textline);
        assert_eq!(config.delimiter, TextLineDelimiter::Line);
        assert_eq!(config.decoder_max_line_length, 1024);
        assert!(config.allow_default_codec);
        assert!(config.lazy_connect);
        assert_eq!(config.key_store_format, "JKS");
        assert_eq!(config.security_provider, "SunX509");
        assert_eq!(config.producer_pool_max_active, -1);
        assert_eq!(config.producer_pool_max_idle, 100);
        assert_eq!(
            config.producer_pool_min_evictable_idle,
            Duration::from_secs(300)
        );
        assert_eq!(config.max_channel_memory_size, 10 * 1024 * 1024);
        assert_eq!(config.max_total_memory_size, 200 * 1024 * 1024);
        assert!(config.options.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EndpointConfig::new()
            .with_textline(true)
            .with_delimiter(TextLineDelimiter::Null)
            .with_decoder_max_line_length(512)
            .with_encoding("ISO-8859-1");

        assert!(config.textline);
        assert_eq!(config.delimiter, TextLineDelimiter::Null);
        assert_eq!(config.decoder_max_line_length, 512);
        assert_eq!(config.encoding.as_deref(), Some("ISO-8859-1"));
    }

    #[test]
    fn test_charset_defaults_to_utf8() {
        let config = EndpointConfig::default();
        assert_eq!(config.charset().unwrap(), Charset::Utf8);
        assert_eq!(config.charset_name().unwrap(), None);
    }

    #[test]
    fn test_charset_lazy_validation() {
        // An unsupported encoding is only an error once the charset is
        // actually requested.
        let config = EndpointConfig::new().with_encoding("KOI8-R");
        assert!(config.charset().is_err());
        assert!(config.charset_name().is_err());
    }

    #[test]
    fn test_clone_gives_independent_handler_lists() {
        let mut original = EndpointConfig::new();
        original.add_encoder(codec::new_object_encoder());

        let mut copy = original.clone();
        copy.add_encoder(codec::new_object_encoder());
        copy.add_decoder(codec::new_object_decoder());

        assert_eq!(original.encoders.len(), 1);
        assert_eq!(copy.encoders.len(), 2);
        assert!(original.decoders.is_empty());
        assert_eq!(copy.decoders.len(), 1);

        // And the other direction.
        original.encoders.clear();
        assert_eq!(copy.encoders.len(), 2);
    }

    #[test]
    fn test_clone_is_structurally_idempotent() {
        let mut config = EndpointConfig::new()
            .with_sync(false)
            .with_textline(true)
            .with_decoder_max_line_length(2048);
        config.host = Some("localhost".to_string());
        config.port = Some(5000);

        let once = config.clone();
        let twice = once.clone();

        assert_eq!(twice.host, config.host);
        assert_eq!(twice.port, config.port);
        assert_eq!(twice.sync, config.sync);
        assert_eq!(twice.textline, config.textline);
        assert_eq!(twice.decoder_max_line_length, config.decoder_max_line_length);
    }

    #[test]
    fn test_clone_shares_handler_identity() {
        let handler: Arc<dyn crate::handler::ChannelHandler> =
            Arc::new(NamedHandler("shared"));
        let mut config = EndpointConfig::new();
        config.ssl_handler = Some(HandlerRef::shared(Arc::clone(&handler)));

        let copy = config.clone();
        match (&config.ssl_handler, &copy.ssl_handler) {
            (
                Some(HandlerRef::Instance { handler: a, .. }),
                Some(HandlerRef::Instance { handler: b, .. }),
            ) => assert!(Arc::ptr_eq(a, b)),
            _ => panic!("expected shared instances"),
        }
    }

    #[test]
    fn test_first_encoder_decoder_accessors() {
        let mut config = EndpointConfig::new();
        assert!(config.encoder().is_none());
        config.add_encoder(codec::new_object_encoder());
        assert_eq!(config.encoder().unwrap().name(), "object-encoder");
    }
}
