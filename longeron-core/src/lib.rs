//! Longeron Core
//!
//! This crate contains the endpoint-configuration layer of the Longeron
//! TCP/UDP transport:
//! - Endpoint URI parsing (`endpoint`)
//! - The configuration value object (`config`)
//! - Pipeline handler references and safety capabilities (`handler`)
//! - Default wire-codec selection (`codec`)
//! - The endpoint option schema (`schema`)
//! - URI + parameter-bag resolution (`resolver`)
//! - Handler-safety validation (`validate`)
//! - Error types (`error`)
//!
//! Resolution and validation perform no I/O and spawn no concurrent work;
//! the produced configuration is handed to the transport layer and must
//! be treated as immutable from then on. Clone it first when a pooled
//! producer needs a per-instance override.

#![deny(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod handler;
pub mod resolver;
pub mod schema;
pub mod validate;

// Optional: a small prelude to make downstream crates ergonomic.
// Keep it minimal to avoid API lock-in.
pub mod prelude {
    pub use crate::codec::{Charset, TextLineDelimiter};
    pub use crate::config::EndpointConfig;
    pub use crate::endpoint::EndpointUri;
    pub use crate::error::{ConfigError, Result};
    pub use crate::handler::{ChannelHandler, HandlerFactory, HandlerRef, PipelineAssembler};
    pub use crate::resolver::{HandlerRegistry, ParamValue, Parameters, SimpleRegistry};
    pub use crate::validate::ValidationWarning;
}
