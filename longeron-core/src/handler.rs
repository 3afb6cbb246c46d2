//! Pipeline handler references and safety capabilities.
//!
//! A configured pipeline entry is either a live handler instance or a
//! factory that builds a fresh instance per connection. Sharing safety is
//! an explicit capability declared at construction, not something inferred
//! by inspecting the handler at runtime.

use std::fmt;
use std::sync::Arc;

/// A pipeline handler as seen by the configuration layer.
///
/// The configuration layer never invokes handlers; it only wires them into
/// ordered encoder/decoder lists. The transport layer drives the actual
/// encode/decode calls against the concrete handler types.
pub trait ChannelHandler: fmt::Debug + Send + Sync {
    /// Stable name used in logs and validation warnings.
    fn name(&self) -> &str;
}

/// A provider that constructs a fresh handler instance per connection.
///
/// Use a factory when the handler holds per-connection mutable state and
/// therefore must never be shared verbatim across connections.
pub trait HandlerFactory: fmt::Debug + Send + Sync {
    /// Stable name used in logs and validation warnings.
    fn name(&self) -> &str;

    /// Build a new handler instance for one connection.
    fn new_handler(&self) -> Arc<dyn ChannelHandler>;
}

/// Custom pipeline assembler installed on the client or server side.
///
/// Opaque to this crate; the transport layer calls it to build the full
/// channel pipeline when the default assembly is not enough.
pub trait PipelineAssembler: fmt::Debug + Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &str;
}

/// A reference to a configured handler.
///
/// The two variants make the sharing contract explicit:
/// - `Factory` builds a fresh instance per connection and is always safe.
/// - `Instance` is a single object installed into every pipeline; it is
///   only safe when constructed with `shareable: true`.
#[derive(Debug, Clone)]
pub enum HandlerRef {
    /// Per-connection construction via a factory.
    Factory(Arc<dyn HandlerFactory>),
    /// A single instance reused across connections.
    Instance {
        handler: Arc<dyn ChannelHandler>,
        /// Declared safe for concurrent reuse across connections.
        shareable: bool,
    },
}

impl HandlerRef {
    /// Wrap a handler factory.
    pub fn factory(factory: Arc<dyn HandlerFactory>) -> Self {
        Self::Factory(factory)
    }

    /// Wrap an instance declared safe for concurrent reuse.
    pub fn shared(handler: Arc<dyn ChannelHandler>) -> Self {
        Self::Instance {
            handler,
            shareable: true,
        }
    }

    /// Wrap an instance that holds per-connection state and must not be
    /// reused across connections.
    pub fn exclusive(handler: Arc<dyn ChannelHandler>) -> Self {
        Self::Instance {
            handler,
            shareable: false,
        }
    }

    /// Name of the underlying factory or instance.
    pub fn name(&self) -> &str {
        match self {
            Self::Factory(factory) => factory.name(),
            Self::Instance { handler, .. } => handler.name(),
        }
    }

    /// Returns true if this entry can be installed into pipelines shared
    /// across connections without a warning.
    #[must_use]
    pub fn is_safely_shareable(&self) -> bool {
        match self {
            Self::Factory(_) => true,
            Self::Instance { shareable, .. } => *shareable,
        }
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Factory(factory) => write!(f, "factory({})", factory.name()),
            Self::Instance { handler, .. } => write!(f, "{}", handler.name()),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Minimal handler doubles shared by the unit tests in this crate.

    use super::*;

    #[derive(Debug)]
    pub struct NamedHandler(pub &'static str);

    impl ChannelHandler for NamedHandler {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[derive(Debug)]
    pub struct NamedFactory(pub &'static str);

    impl HandlerFactory for NamedFactory {
        fn name(&self) -> &str {
            self.0
        }

        fn new_handler(&self) -> Arc<dyn ChannelHandler> {
            Arc::new(NamedHandler(self.0))
        }
    }

    #[derive(Debug)]
    pub struct NamedAssembler(pub &'static str);

    impl PipelineAssembler for NamedAssembler {
        fn name(&self) -> &str {
            self.0
        }
    }
}
