//! URI-to-configuration resolution.
//!
//! Populates an [`EndpointConfig`] from a parsed URI and a parameter bag:
//! protocol allowlist check, fixed reference-typed parameters, ordered
//! encoder/decoder lists, schema-driven scalar binding, `option.`
//! passthrough extraction, and finally the default-codec selection policy.
//!
//! Consumed keys are removed from the bag as resolution proceeds, so a
//! later pass by the caller sees only what this module did not recognize.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use hashbrown::HashMap;
use tracing::debug;

use crate::codec;
use crate::config::EndpointConfig;
use crate::endpoint::EndpointUri;
use crate::error::{ConfigError, Result};
use crate::handler::{HandlerRef, PipelineAssembler};
use crate::schema;

/// A parameter-bag value.
///
/// Strings come straight from the caller's URI query or property source;
/// the object variants are live references the caller resolved up front
/// instead of going through the `#name` registry convention.
#[derive(Debug, Clone)]
pub enum ParamValue {
    /// Plain string value.
    Str(String),
    /// A directly-supplied handler.
    Handler(HandlerRef),
    /// A directly-supplied ordered handler list.
    Handlers(Vec<HandlerRef>),
    /// A directly-supplied pipeline assembler.
    Assembler(Arc<dyn PipelineAssembler>),
}

impl ParamValue {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Handler(_) => "handler",
            Self::Handlers(_) => "handler list",
            Self::Assembler(_) => "pipeline assembler",
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<HandlerRef> for ParamValue {
    fn from(h: HandlerRef) -> Self {
        Self::Handler(h)
    }
}

/// Named-object lookup service supplied by the caller.
///
/// String parameter values of the form `#name` dereference through this
/// registry into live handlers or pipeline assemblers.
pub trait HandlerRegistry {
    /// Look up a handler by registry name.
    fn lookup_handler(&self, name: &str) -> Option<HandlerRef>;

    /// Look up a pipeline assembler by registry name.
    fn lookup_assembler(&self, name: &str) -> Option<Arc<dyn PipelineAssembler>>;
}

/// In-memory [`HandlerRegistry`], also usable empty.
#[derive(Default)]
pub struct SimpleRegistry {
    handlers: HashMap<String, HandlerRef>,
    assemblers: HashMap<String, Arc<dyn PipelineAssembler>>,
}

impl SimpleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under a name.
    pub fn register_handler(&mut self, name: impl Into<String>, handler: HandlerRef) {
        self.handlers.insert(name.into(), handler);
    }

    /// Register a pipeline assembler under a name.
    pub fn register_assembler(
        &mut self,
        name: impl Into<String>,
        assembler: Arc<dyn PipelineAssembler>,
    ) {
        self.assemblers.insert(name.into(), assembler);
    }
}

impl HandlerRegistry for SimpleRegistry {
    fn lookup_handler(&self, name: &str) -> Option<HandlerRef> {
        self.handlers.get(name).cloned()
    }

    fn lookup_assembler(&self, name: &str) -> Option<Arc<dyn PipelineAssembler>> {
        self.assemblers.get(name).cloned()
    }
}

/// The mutable parameter bag handed to resolution.
///
/// Keys are treated literally (no case folding). Resolution removes each
/// key it consumes; whatever is left afterwards belongs to the caller.
#[derive(Debug, Default, Clone)]
pub struct Parameters {
    entries: HashMap<String, ParamValue>,
}

impl Parameters {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Insert a directly-supplied handler list.
    pub fn insert_handlers(&mut self, name: impl Into<String>, handlers: Vec<HandlerRef>) {
        self.entries.insert(name.into(), ParamValue::Handlers(handlers));
    }

    /// Insert a directly-supplied pipeline assembler.
    pub fn insert_assembler(
        &mut self,
        name: impl Into<String>,
        assembler: Arc<dyn PipelineAssembler>,
    ) {
        self.entries
            .insert(name.into(), ParamValue::Assembler(assembler));
    }

    /// Remove and return a parameter.
    pub fn take(&mut self, name: &str) -> Option<ParamValue> {
        self.entries.remove(name)
    }

    /// Whether the bag still holds the given key.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of unconsumed parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unconsumed parameter names.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Remove and return a string parameter.
    fn take_string(&mut self, name: &str) -> Result<Option<String>> {
        match self.take(name) {
            None => Ok(None),
            Some(ParamValue::Str(s)) => Ok(Some(s)),
            Some(other) => Err(ConfigError::invalid_parameter(
                name,
                other.type_name(),
                "string",
            )),
        }
    }

    /// Remove and parse a parameter via `FromStr`.
    fn take_parse<T: FromStr>(&mut self, name: &str, expected: &'static str) -> Result<Option<T>> {
        match self.take_string(name)? {
            None => Ok(None),
            Some(raw) => raw
                .parse::<T>()
                .map(Some)
                .map_err(|_| ConfigError::invalid_parameter(name, raw, expected)),
        }
    }

    fn take_bool(&mut self, name: &str) -> Result<Option<bool>> {
        self.take_parse(name, "true or false")
    }

    fn take_path(&mut self, name: &str) -> Result<Option<PathBuf>> {
        Ok(self.take_string(name)?.map(PathBuf::from))
    }

    /// Remove a handler parameter, dereferencing `#name` through the
    /// registry.
    fn take_handler(
        &mut self,
        name: &str,
        registry: &dyn HandlerRegistry,
    ) -> Result<Option<HandlerRef>> {
        match self.take(name) {
            None => Ok(None),
            Some(ParamValue::Handler(handler)) => Ok(Some(handler)),
            Some(ParamValue::Str(s)) => lookup_handler_ref(name, &s, registry).map(Some),
            Some(other) => Err(ConfigError::invalid_parameter(
                name,
                other.type_name(),
                "handler or #<registry name>",
            )),
        }
    }

    /// Remove an ordered handler-list parameter. String values are a
    /// comma-separated list of `#name` references, resolved in order.
    fn take_handler_list(
        &mut self,
        name: &str,
        registry: &dyn HandlerRegistry,
    ) -> Result<Vec<HandlerRef>> {
        match self.take(name) {
            None => Ok(Vec::new()),
            Some(ParamValue::Handlers(handlers)) => Ok(handlers),
            Some(ParamValue::Handler(handler)) => Ok(vec![handler]),
            Some(ParamValue::Str(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| lookup_handler_ref(name, part, registry))
                .collect(),
            Some(other) => Err(ConfigError::invalid_parameter(
                name,
                other.type_name(),
                "handler list or comma-separated #<registry name> references",
            )),
        }
    }

    /// Remove a pipeline-assembler parameter, dereferencing `#name`
    /// through the registry.
    fn take_assembler(
        &mut self,
        name: &str,
        registry: &dyn HandlerRegistry,
    ) -> Result<Option<Arc<dyn PipelineAssembler>>> {
        match self.take(name) {
            None => Ok(None),
            Some(ParamValue::Assembler(assembler)) => Ok(Some(assembler)),
            Some(ParamValue::Str(s)) => {
                let reference = strip_reference(name, &s)?;
                registry
                    .lookup_assembler(reference)
                    .map(Some)
                    .ok_or_else(|| ConfigError::UnknownReference(reference.to_string()))
            }
            Some(other) => Err(ConfigError::invalid_parameter(
                name,
                other.type_name(),
                "pipeline assembler or #<registry name>",
            )),
        }
    }

    /// Remove every key with the given prefix, returning the stripped
    /// key/value pairs.
    fn extract_prefixed(&mut self, prefix: &str) -> HashMap<String, ParamValue> {
        let matching: Vec<String> = self
            .entries
            .keys()
            .filter(|key| key.starts_with(prefix) && key.len() > prefix.len())
            .cloned()
            .collect();

        let mut extracted = HashMap::with_capacity(matching.len());
        for key in matching {
            if let Some(value) = self.entries.remove(&key) {
                extracted.insert(key[prefix.len()..].to_string(), value);
            }
        }
        extracted
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

fn strip_reference<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    value.strip_prefix('#').ok_or_else(|| {
        ConfigError::invalid_parameter(name, value, "#<registry name> reference")
    })
}

fn lookup_handler_ref(
    name: &str,
    value: &str,
    registry: &dyn HandlerRegistry,
) -> Result<HandlerRef> {
    let reference = strip_reference(name, value)?;
    registry
        .lookup_handler(reference)
        .ok_or_else(|| ConfigError::UnknownReference(reference.to_string()))
}

impl EndpointConfig {
    /// Resolve a configuration from scratch.
    ///
    /// Convenience over [`EndpointConfig::parse_uri`] starting from
    /// default values.
    pub fn resolve(
        uri: &EndpointUri,
        parameters: &mut Parameters,
        registry: &dyn HandlerRegistry,
        supported_protocols: &[&str],
    ) -> Result<Self> {
        let mut config = Self::default();
        config.parse_uri(uri, parameters, registry, supported_protocols)?;
        Ok(config)
    }

    /// Populate this configuration from a URI and a parameter bag.
    ///
    /// The scheme is matched case-insensitively against
    /// `supported_protocols` before anything else is touched; on a
    /// mismatch the configuration is left exactly as it was. Consumed
    /// parameters are removed from the bag; unrecognized keys (other than
    /// `option.` passthrough) are left in place for the caller.
    pub fn parse_uri(
        &mut self,
        uri: &EndpointUri,
        parameters: &mut Parameters,
        registry: &dyn HandlerRegistry,
        supported_protocols: &[&str],
    ) -> Result<()> {
        let scheme = uri.scheme();
        let supported = supported_protocols
            .iter()
            .any(|candidate| scheme.eq_ignore_ascii_case(candidate));
        if !supported {
            return Err(ConfigError::InvalidProtocol {
                scheme: scheme.to_string(),
                uri: uri.to_string(),
            });
        }

        self.protocol = Some(scheme.to_string());
        self.host = Some(uri.host().to_string());
        self.port = uri.port();

        // Fixed reference-typed parameters first.
        self.ssl = parameters.take_bool("ssl")?.unwrap_or(false);
        if let Some(handler) = parameters.take_handler("sslHandler", registry)? {
            self.ssl_handler = Some(handler);
        }
        if let Some(passphrase) = parameters.take_string("passphrase")? {
            self.passphrase = Some(passphrase);
        }
        if let Some(format) = parameters.take_string("keyStoreFormat")? {
            self.key_store_format = format;
        }
        if let Some(provider) = parameters.take_string("securityProvider")? {
            self.security_provider = provider;
        }
        if let Some(path) = parameters.take_path("keyStoreFile")? {
            self.key_store_file = Some(path);
        }
        if let Some(path) = parameters.take_path("trustStoreFile")? {
            self.trust_store_file = Some(path);
        }
        if let Some(resource) = parameters.take_string("keyStoreResource")? {
            self.key_store_resource = Some(resource);
        }
        if let Some(resource) = parameters.take_string("trustStoreResource")? {
            self.trust_store_resource = Some(resource);
        }
        if let Some(assembler) = parameters.take_assembler("clientInitializer", registry)? {
            self.client_assembler = Some(assembler);
        }
        if let Some(assembler) = parameters.take_assembler("serverInitializer", registry)? {
            self.server_assembler = Some(assembler);
        }

        // Custom encoders and decoders, appended after anything set
        // programmatically, preserving resolution order.
        let referenced_encoders = parameters.take_handler_list("encoders", registry)?;
        self.encoders.extend(referenced_encoders);
        let referenced_decoders = parameters.take_handler_list("decoders", registry)?;
        self.decoders.extend(referenced_decoders);

        // Scalar options the schema knows about.
        self.bind_scalar_options(parameters)?;

        // Passthrough options; never store an empty-but-present map.
        let extracted = parameters.extract_prefixed("option.");
        self.options = if extracted.is_empty() {
            None
        } else {
            Some(Arc::new(extracted))
        };

        self.apply_default_codec()
    }

    /// Consume every remaining parameter the option schema recognizes.
    fn bind_scalar_options(&mut self, parameters: &mut Parameters) -> Result<()> {
        let known: Vec<String> = parameters
            .keys()
            .filter(|key| schema::option_spec(key).is_some())
            .map(str::to_string)
            .collect();

        for name in known {
            self.bind_option(&name, parameters)?;
        }
        Ok(())
    }

    fn bind_option(&mut self, name: &str, parameters: &mut Parameters) -> Result<()> {
        match name {
            "requestTimeout" => {
                let millis: Option<u64> = parameters.take_parse(name, "milliseconds")?;
                self.request_timeout = match millis {
                    None | Some(0) => None,
                    Some(ms) => Some(Duration::from_millis(ms)),
                };
            }
            "sync" => bind(parameters, name, "true or false", &mut self.sync)?,
            "textline" => bind(parameters, name, "true or false", &mut self.textline)?,
            "delimiter" => bind(parameters, name, "LINE or NULL", &mut self.delimiter)?,
            "autoAppendDelimiter" => {
                bind(parameters, name, "true or false", &mut self.auto_append_delimiter)?
            }
            "decoderMaxLineLength" => {
                bind(parameters, name, "byte count", &mut self.decoder_max_line_length)?
            }
            "encoding" => self.encoding = parameters.take_string(name)?,
            "allowDefaultCodec" => {
                bind(parameters, name, "true or false", &mut self.allow_default_codec)?
            }
            "disconnect" => bind(parameters, name, "true or false", &mut self.disconnect)?,
            "lazyChannelCreation" => {
                bind(parameters, name, "true or false", &mut self.lazy_connect)?
            }
            "disconnectOnNoReply" => {
                bind(parameters, name, "true or false", &mut self.disconnect_on_no_reply)?
            }
            "noReplyLogLevel" => {
                bind(parameters, name, "log level", &mut self.no_reply_log_level)?
            }
            "serverExceptionCaughtLogLevel" => {
                bind(parameters, name, "log level", &mut self.server_exception_log_level)?
            }
            "serverClosedChannelExceptionCaughtLogLevel" => bind(
                parameters,
                name,
                "log level",
                &mut self.server_closed_channel_log_level,
            )?,
            "maximumPoolSize" => {
                bind(parameters, name, "pool size", &mut self.maximum_pool_size)?
            }
            "orderedThreadPoolExecutor" => {
                bind(parameters, name, "true or false", &mut self.ordered_executor)?
            }
            "maxChannelMemorySize" => {
                bind(parameters, name, "byte count", &mut self.max_channel_memory_size)?
            }
            "maxTotalMemorySize" => {
                bind(parameters, name, "byte count", &mut self.max_total_memory_size)?
            }
            "producerPoolEnabled" => {
                bind(parameters, name, "true or false", &mut self.producer_pool_enabled)?
            }
            "producerPoolMaxActive" => {
                bind(parameters, name, "count (negative for no limit)", &mut self.producer_pool_max_active)?
            }
            "producerPoolMinIdle" => {
                bind(parameters, name, "count", &mut self.producer_pool_min_idle)?
            }
            "producerPoolMaxIdle" => {
                bind(parameters, name, "count", &mut self.producer_pool_max_idle)?
            }
            "producerPoolMinEvictableIdle" => {
                let millis: Option<u64> = parameters.take_parse(name, "milliseconds")?;
                if let Some(ms) = millis {
                    self.producer_pool_min_evictable_idle = Duration::from_millis(ms);
                }
            }
            "udpConnectionlessSending" => bind(
                parameters,
                name,
                "true or false",
                &mut self.udp_connectionless_sending,
            )?,
            "clientMode" => bind(parameters, name, "true or false", &mut self.client_mode)?,
            // ssl/passphrase/key-store options are consumed by the fixed
            // pass before binding runs; reaching here means the key was
            // re-inserted, so just consume the raw string again.
            "ssl" => {
                if let Some(flag) = parameters.take_bool(name)? {
                    self.ssl = flag;
                }
            }
            "passphrase" => self.passphrase = parameters.take_string(name)?,
            "keyStoreFormat" => {
                if let Some(format) = parameters.take_string(name)? {
                    self.key_store_format = format;
                }
            }
            "securityProvider" => {
                if let Some(provider) = parameters.take_string(name)? {
                    self.security_provider = provider;
                }
            }
            "keyStoreFile" => self.key_store_file = parameters.take_path(name)?,
            "trustStoreFile" => self.trust_store_file = parameters.take_path(name)?,
            "keyStoreResource" => self.key_store_resource = parameters.take_string(name)?,
            "trustStoreResource" => {
                self.trust_store_resource = parameters.take_string(name)?
            }
            _ => {}
        }
        Ok(())
    }

    /// Install default encoders/decoders when none were configured.
    ///
    /// The configured encoding is only validated here, on the textline
    /// path, because this is the first point a charset is actually needed.
    fn apply_default_codec(&mut self) -> Result<()> {
        if !self.encoders.is_empty() || !self.decoders.is_empty() {
            debug!("Using configured encoders and/or decoders");
            return Ok(());
        }
        if !self.allow_default_codec {
            debug!("No encoders and decoders will be used");
            return Ok(());
        }

        if self.textline {
            let charset = self.charset()?;
            let delimiters = self.delimiter.delimiter_bytes();
            self.encoders.push(codec::new_text_encoder(charset));
            self.decoders.push(codec::new_frame_decoder(
                self.decoder_max_line_length,
                delimiters,
            ));
            self.decoders.push(codec::new_text_decoder(charset));
            debug!(
                %charset,
                delimiter = %self.delimiter,
                decoder_max_line_length = self.decoder_max_line_length,
                "Using textline encoders and decoders"
            );
        } else {
            self.encoders.push(codec::new_object_encoder());
            self.decoders.push(codec::new_object_decoder());
            debug!("Using object encoders and decoders");
        }
        Ok(())
    }
}

fn bind<T: FromStr>(
    parameters: &mut Parameters,
    name: &str,
    expected: &'static str,
    field: &mut T,
) -> Result<()> {
    if let Some(value) = parameters.take_parse(name, expected)? {
        *field = value;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test_support::{NamedAssembler, NamedFactory, NamedHandler};
    use tracing::Level;

    fn resolve_tcp(params: &mut Parameters) -> Result<EndpointConfig> {
        let uri = EndpointUri::parse("tcp://localhost:5000")?;
        EndpointConfig::resolve(&uri, params, &SimpleRegistry::new(), &["tcp"])
    }

    #[test]
    fn test_invalid_protocol_leaves_config_untouched() {
        let uri = EndpointUri::parse("http://localhost:5000").unwrap();
        let mut config = EndpointConfig::new();
        let mut params = Parameters::new();
        let err = config
            .parse_uri(&uri, &mut params, &SimpleRegistry::new(), &["tcp", "udp"])
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidProtocol { .. }));
        assert!(config.protocol.is_none());
        assert!(config.host.is_none());
        assert!(config.port.is_none());
    }

    #[test]
    fn test_scheme_match_is_case_insensitive() {
        let uri = EndpointUri::parse("TCP://localhost:5000").unwrap();
        let mut params = Parameters::new();
        let config =
            EndpointConfig::resolve(&uri, &mut params, &SimpleRegistry::new(), &["tcp"]).unwrap();
        assert_eq!(config.protocol.as_deref(), Some("TCP"));
        assert_eq!(config.host.as_deref(), Some("localhost"));
        assert_eq!(config.port, Some(5000));
    }

    #[test]
    fn test_scalar_binding() {
        let mut params: Parameters = [
            ("sync", "false"),
            ("disconnect", "true"),
            ("requestTimeout", "30000"),
            ("maximumPoolSize", "32"),
            ("noReplyLogLevel", "INFO"),
            ("producerPoolMaxActive", "-1"),
        ]
        .into_iter()
        .collect();

        let config = resolve_tcp(&mut params).unwrap();
        assert!(!config.sync);
        assert!(config.disconnect);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.maximum_pool_size, 32);
        assert_eq!(config.no_reply_log_level, Level::INFO);
        assert_eq!(config.producer_pool_max_active, -1);
        assert!(params.is_empty());
    }

    #[test]
    fn test_request_timeout_zero_means_none() {
        let mut params: Parameters = [("requestTimeout", "0")].into_iter().collect();
        let config = resolve_tcp(&mut params).unwrap();
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_malformed_scalar_is_rejected() {
        let mut params: Parameters = [("decoderMaxLineLength", "lots")].into_iter().collect();
        let err = resolve_tcp(&mut params).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { .. }));
    }

    #[test]
    fn test_unknown_keys_stay_in_the_bag() {
        let mut params: Parameters = [("sync", "false"), ("receiveBufferSize", "65536")]
            .into_iter()
            .collect();
        let config = resolve_tcp(&mut params).unwrap();
        assert!(!config.sync);
        assert_eq!(params.len(), 1);
        assert!(params.contains("receiveBufferSize"));
    }

    #[test]
    fn test_option_prefix_extraction() {
        let mut params: Parameters = [
            ("option.foo", "bar"),
            ("option.baz", "qux"),
            ("sync", "true"),
        ]
        .into_iter()
        .collect();

        let config = resolve_tcp(&mut params).unwrap();
        let options = config.options.as_ref().expect("options should be present");
        assert_eq!(options.len(), 2);
        assert!(matches!(options.get("foo"), Some(ParamValue::Str(v)) if v == "bar"));
        assert!(matches!(options.get("baz"), Some(ParamValue::Str(v)) if v == "qux"));
        assert!(!params.contains("option.foo"));
    }

    #[test]
    fn test_no_options_means_absent_not_empty() {
        let mut params = Parameters::new();
        let config = resolve_tcp(&mut params).unwrap();
        assert!(config.options.is_none());
    }

    #[test]
    fn test_default_object_codec() {
        let mut params = Parameters::new();
        let config = resolve_tcp(&mut params).unwrap();
        assert_eq!(config.encoders.len(), 1);
        assert_eq!(config.decoders.len(), 1);
        assert_eq!(config.encoders[0].name(), "object-encoder");
        assert_eq!(config.decoders[0].name(), "object-decoder");
    }

    #[test]
    fn test_default_textline_codec() {
        let mut params: Parameters = [("textline", "true")].into_iter().collect();
        let config = resolve_tcp(&mut params).unwrap();
        assert_eq!(config.encoders.len(), 1);
        assert_eq!(config.decoders.len(), 2);
        assert_eq!(config.encoders[0].name(), "text-encoder");
        assert_eq!(config.decoders[0].name(), "delimiter-frame-decoder");
        assert_eq!(config.decoders[1].name(), "text-decoder");
    }

    #[test]
    fn test_unsupported_encoding_fatal_only_when_textline_needs_it() {
        // Object codec path never touches the charset.
        let mut params: Parameters = [("encoding", "KOI8-R")].into_iter().collect();
        let config = resolve_tcp(&mut params).unwrap();
        assert_eq!(config.encoding.as_deref(), Some("KOI8-R"));

        // Textline path requests it and fails.
        let mut params: Parameters = [("encoding", "KOI8-R"), ("textline", "true")]
            .into_iter()
            .collect();
        let err = resolve_tcp(&mut params).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedEncoding(_)));
    }

    #[test]
    fn test_default_codec_disabled_leaves_lists_empty() {
        let mut params: Parameters = [("allowDefaultCodec", "false")].into_iter().collect();
        let config = resolve_tcp(&mut params).unwrap();
        assert!(config.encoders.is_empty());
        assert!(config.decoders.is_empty());
    }

    #[test]
    fn test_no_defaults_when_either_list_prepopulated() {
        let uri = EndpointUri::parse("tcp://localhost:5000").unwrap();
        let mut config = EndpointConfig::new().with_textline(true);
        config.add_encoder(HandlerRef::shared(Arc::new(NamedHandler("custom"))));

        let mut params = Parameters::new();
        config
            .parse_uri(&uri, &mut params, &SimpleRegistry::new(), &["tcp"])
            .unwrap();

        assert_eq!(config.encoders.len(), 1);
        assert_eq!(config.encoders[0].name(), "custom");
        assert!(config.decoders.is_empty());
    }

    #[test]
    fn test_reference_list_resolution_preserves_order() {
        let mut registry = SimpleRegistry::new();
        registry.register_handler(
            "first",
            HandlerRef::factory(Arc::new(NamedFactory("first"))),
        );
        registry.register_handler(
            "second",
            HandlerRef::factory(Arc::new(NamedFactory("second"))),
        );

        let uri = EndpointUri::parse("tcp://localhost:5000").unwrap();
        let mut params: Parameters = [("decoders", "#first,#second")].into_iter().collect();
        let config = EndpointConfig::resolve(&uri, &mut params, &registry, &["tcp"]).unwrap();

        assert_eq!(config.decoders.len(), 2);
        assert_eq!(config.decoders[0].name(), "first");
        assert_eq!(config.decoders[1].name(), "second");
        // Defaults stay out once custom decoders are installed.
        assert!(config.encoders.is_empty());
    }

    #[test]
    fn test_unknown_reference_fails() {
        let uri = EndpointUri::parse("tcp://localhost:5000").unwrap();
        let mut params: Parameters = [("encoders", "#missing")].into_iter().collect();
        let err = EndpointConfig::resolve(&uri, &mut params, &SimpleRegistry::new(), &["tcp"])
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownReference(name) if name == "missing"));
    }

    #[test]
    fn test_tls_parameters() {
        let mut registry = SimpleRegistry::new();
        registry.register_handler(
            "tls",
            HandlerRef::shared(Arc::new(NamedHandler("tls-handler"))),
        );

        let uri = EndpointUri::parse("tcp://localhost:5000").unwrap();
        let mut params: Parameters = [
            ("ssl", "true"),
            ("sslHandler", "#tls"),
            ("passphrase", "changeit"),
            ("keyStoreFile", "/etc/longeron/keystore.jks"),
            ("trustStoreResource", "classpath:truststore.jks"),
        ]
        .into_iter()
        .collect();

        let config = EndpointConfig::resolve(&uri, &mut params, &registry, &["tcp"]).unwrap();
        assert!(config.ssl);
        assert_eq!(config.ssl_handler.as_ref().unwrap().name(), "tls-handler");
        assert_eq!(config.passphrase.as_deref(), Some("changeit"));
        assert_eq!(config.key_store_format, "JKS");
        assert_eq!(config.security_provider, "SunX509");
        assert_eq!(
            config.key_store_file.as_deref(),
            Some(std::path::Path::new("/etc/longeron/keystore.jks"))
        );
        assert_eq!(
            config.trust_store_resource.as_deref(),
            Some("classpath:truststore.jks")
        );
    }

    #[test]
    fn test_assembler_resolution() {
        let mut registry = SimpleRegistry::new();
        registry.register_assembler("client", Arc::new(NamedAssembler("client-assembler")));

        let uri = EndpointUri::parse("tcp://localhost:5000").unwrap();
        let mut params = Parameters::new();
        params.insert("clientInitializer", "#client");
        params.insert_assembler("serverInitializer", Arc::new(NamedAssembler("inline")));

        let config = EndpointConfig::resolve(&uri, &mut params, &registry, &["tcp"]).unwrap();
        assert_eq!(
            config.client_assembler.as_ref().unwrap().name(),
            "client-assembler"
        );
        assert_eq!(config.server_assembler.as_ref().unwrap().name(), "inline");
    }

    #[test]
    fn test_bare_reference_string_is_rejected() {
        let uri = EndpointUri::parse("tcp://localhost:5000").unwrap();
        let mut params: Parameters = [("sslHandler", "tls")].into_iter().collect();
        let err = EndpointConfig::resolve(&uri, &mut params, &SimpleRegistry::new(), &["tcp"])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { .. }));
    }
}
