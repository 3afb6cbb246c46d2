//! Endpoint option schema.
//!
//! The scalar endpoint options are described by an explicit table instead
//! of per-field metadata annotations. The resolver's property-binding pass
//! consults this table to decide which parameter-bag keys it owns; tooling
//! can render it as reference documentation.

/// Which endpoint role an option applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionRole {
    /// Meaningful for both producers and consumers.
    Common,
    /// Producer (client) side only.
    Producer,
    /// Consumer (server) side only.
    Consumer,
}

/// Schema entry for one scalar endpoint option.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    /// Parameter name as it appears in the parameter bag.
    pub name: &'static str,
    /// Default value rendered as a string, or `None` when unset by default.
    pub default: Option<&'static str>,
    /// Which endpoint role the option applies to.
    pub role: OptionRole,
    /// Tuning option most deployments never touch.
    pub advanced: bool,
    /// One-line reference description.
    pub description: &'static str,
}

/// The scalar options understood by the property-binding pass.
///
/// Reference-typed parameters (sslHandler, encoders, decoders, the
/// pipeline assemblers) are consumed by the fixed-parameter pass in the
/// resolver and deliberately do not appear here.
pub const OPTION_SCHEMA: &[OptionSpec] = &[
    OptionSpec {
        name: "requestTimeout",
        default: None,
        role: OptionRole::Producer,
        advanced: false,
        description: "Timeout in millis when calling a remote server; 0 or unset means no timeout",
    },
    OptionSpec {
        name: "sync",
        default: Some("true"),
        role: OptionRole::Common,
        advanced: false,
        description: "Whether the endpoint is request-reply (true) or fire-and-forget (false)",
    },
    OptionSpec {
        name: "textline",
        default: Some("false"),
        role: OptionRole::Common,
        advanced: false,
        description: "Use the text line codec as the default codec; TCP only",
    },
    OptionSpec {
        name: "delimiter",
        default: Some("LINE"),
        role: OptionRole::Common,
        advanced: false,
        description: "Delimiter for the textline codec: LINE or NULL",
    },
    OptionSpec {
        name: "autoAppendDelimiter",
        default: Some("true"),
        role: OptionRole::Common,
        advanced: false,
        description: "Append a missing end delimiter when sending with the textline codec",
    },
    OptionSpec {
        name: "decoderMaxLineLength",
        default: Some("1024"),
        role: OptionRole::Common,
        advanced: false,
        description: "Max frame length in bytes for the textline codec",
    },
    OptionSpec {
        name: "encoding",
        default: None,
        role: OptionRole::Common,
        advanced: false,
        description: "Charset name for the textline codec; process default when unset",
    },
    OptionSpec {
        name: "allowDefaultCodec",
        default: Some("true"),
        role: OptionRole::Common,
        advanced: false,
        description: "Permit installing a default codec when no encoders/decoders are configured",
    },
    OptionSpec {
        name: "disconnect",
        default: Some("false"),
        role: OptionRole::Common,
        advanced: false,
        description: "Close the connection right after use",
    },
    OptionSpec {
        name: "lazyChannelCreation",
        default: Some("true"),
        role: OptionRole::Producer,
        advanced: true,
        description: "Establish the connection lazily so a down remote does not fail startup",
    },
    OptionSpec {
        name: "disconnectOnNoReply",
        default: Some("true"),
        role: OptionRole::Consumer,
        advanced: false,
        description: "When sync is enabled, disconnect when there is no reply to send back",
    },
    OptionSpec {
        name: "noReplyLogLevel",
        default: Some("WARN"),
        role: OptionRole::Consumer,
        advanced: true,
        description: "Log level used when there is no reply to send back",
    },
    OptionSpec {
        name: "serverExceptionCaughtLogLevel",
        default: Some("WARN"),
        role: OptionRole::Consumer,
        advanced: true,
        description: "Log level used when the server catches an exception",
    },
    OptionSpec {
        name: "serverClosedChannelExceptionCaughtLogLevel",
        default: Some("DEBUG"),
        role: OptionRole::Consumer,
        advanced: true,
        description: "Log level for closed-channel errors, kept low to avoid log floods on abrupt disconnects",
    },
    OptionSpec {
        name: "maximumPoolSize",
        default: Some("16"),
        role: OptionRole::Common,
        advanced: false,
        description: "Core pool size for the ordered executor, if in use",
    },
    OptionSpec {
        name: "orderedThreadPoolExecutor",
        default: Some("true"),
        role: OptionRole::Consumer,
        advanced: true,
        description: "Process events in order per connection via the ordered executor",
    },
    OptionSpec {
        name: "maxChannelMemorySize",
        default: Some("10485760"),
        role: OptionRole::Consumer,
        advanced: true,
        description: "Max queued bytes per connection for the ordered executor; 0 disables",
    },
    OptionSpec {
        name: "maxTotalMemorySize",
        default: Some("209715200"),
        role: OptionRole::Consumer,
        advanced: true,
        description: "Max queued bytes across the ordered executor; 0 disables",
    },
    OptionSpec {
        name: "producerPoolEnabled",
        default: Some("true"),
        role: OptionRole::Producer,
        advanced: true,
        description: "Pool producer connections; required for concurrency and reliable request-reply",
    },
    OptionSpec {
        name: "producerPoolMaxActive",
        default: Some("-1"),
        role: OptionRole::Producer,
        advanced: true,
        description: "Cap on pooled producers, checked out or idle; negative means no limit",
    },
    OptionSpec {
        name: "producerPoolMinIdle",
        default: Some("0"),
        role: OptionRole::Producer,
        advanced: true,
        description: "Minimum idle instances before the evictor spawns new objects",
    },
    OptionSpec {
        name: "producerPoolMaxIdle",
        default: Some("100"),
        role: OptionRole::Producer,
        advanced: true,
        description: "Cap on idle instances in the producer pool",
    },
    OptionSpec {
        name: "producerPoolMinEvictableIdle",
        default: Some("300000"),
        role: OptionRole::Producer,
        advanced: true,
        description: "Millis an instance may sit idle before it is eligible for eviction",
    },
    OptionSpec {
        name: "udpConnectionlessSending",
        default: Some("false"),
        role: OptionRole::Producer,
        advanced: true,
        description: "Fire-and-forget UDP send without a connected socket",
    },
    OptionSpec {
        name: "clientMode",
        default: Some("false"),
        role: OptionRole::Consumer,
        advanced: false,
        description: "Consumer connects to the address as a TCP client instead of binding",
    },
    OptionSpec {
        name: "ssl",
        default: Some("false"),
        role: OptionRole::Common,
        advanced: false,
        description: "Enable TLS on the endpoint",
    },
    OptionSpec {
        name: "passphrase",
        default: None,
        role: OptionRole::Common,
        advanced: false,
        description: "Passphrase for the key/trust store",
    },
    OptionSpec {
        name: "keyStoreFormat",
        default: Some("JKS"),
        role: OptionRole::Common,
        advanced: false,
        description: "Key store format",
    },
    OptionSpec {
        name: "securityProvider",
        default: Some("SunX509"),
        role: OptionRole::Common,
        advanced: false,
        description: "Security provider used for payload encryption",
    },
    OptionSpec {
        name: "keyStoreFile",
        default: None,
        role: OptionRole::Common,
        advanced: false,
        description: "Client-side certificate key store path",
    },
    OptionSpec {
        name: "trustStoreFile",
        default: None,
        role: OptionRole::Common,
        advanced: false,
        description: "Server-side certificate key store path",
    },
    OptionSpec {
        name: "keyStoreResource",
        default: None,
        role: OptionRole::Common,
        advanced: false,
        description: "Named resource reference for the key store",
    },
    OptionSpec {
        name: "trustStoreResource",
        default: None,
        role: OptionRole::Common,
        advanced: false,
        description: "Named resource reference for the trust store",
    },
];

/// Look up the schema entry for a parameter name, if it is a scalar option.
pub fn option_spec(name: &str) -> Option<&'static OptionSpec> {
    OPTION_SCHEMA.iter().find(|spec| spec.name == name)
}
