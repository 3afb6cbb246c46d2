//! Default wire-codec selection building blocks.
//!
//! This module does not implement encoding or decoding. It provides the
//! charset and delimiter value types used by the textline codec options,
//! and the opaque factory constructors the resolver wires into a
//! configuration when no custom encoders/decoders were supplied. The
//! transport layer interprets the concrete factory products.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use bytes::Bytes;
use smallvec::{smallvec, SmallVec};

use crate::error::ConfigError;
use crate::handler::{ChannelHandler, HandlerFactory, HandlerRef};

/// Delimiter kind for the textline codec.
///
/// Corresponds to the `delimiter` endpoint option. Possible values are
/// `LINE` and `NULL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextLineDelimiter {
    /// Split frames on line terminators (`\r\n` or `\n`).
    #[default]
    Line,
    /// Split frames on a null byte.
    Null,
}

impl TextLineDelimiter {
    /// The byte sequences the frame decoder splits on, in match order.
    pub fn delimiter_bytes(&self) -> SmallVec<[Bytes; 2]> {
        match self {
            Self::Line => smallvec![Bytes::from_static(b"\r\n"), Bytes::from_static(b"\n")],
            Self::Null => smallvec![Bytes::from_static(b"\0")],
        }
    }

    /// The option value name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "LINE",
            Self::Null => "NULL",
        }
    }
}

impl FromStr for TextLineDelimiter {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("LINE") {
            Ok(Self::Line)
        } else if s.eq_ignore_ascii_case("NULL") {
            Ok(Self::Null)
        } else {
            Err(ConfigError::invalid_parameter(
                "delimiter",
                s,
                "LINE or NULL",
            ))
        }
    }
}

impl fmt::Display for TextLineDelimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Character encodings recognized by the textline codec.
///
/// The set matches what every runtime we target guarantees to provide.
/// Lookup is lazy: an unsupported `encoding` option only fails once a
/// charset is actually needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Charset {
    /// UTF-8, the process default.
    #[default]
    Utf8,
    /// 7-bit US-ASCII.
    Ascii,
    /// ISO-8859-1 (Latin-1).
    Latin1,
    /// UTF-16 with byte-order mark.
    Utf16,
    /// UTF-16 big-endian.
    Utf16Be,
    /// UTF-16 little-endian.
    Utf16Le,
}

impl Charset {
    /// Look up a charset by name, tolerating common aliases.
    pub fn for_name(name: &str) -> Result<Self, ConfigError> {
        let canonical = name.trim().to_ascii_lowercase().replace('_', "-");
        match canonical.as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "us-ascii" | "ascii" => Ok(Self::Ascii),
            "iso-8859-1" | "latin1" | "latin-1" => Ok(Self::Latin1),
            "utf-16" | "utf16" => Ok(Self::Utf16),
            "utf-16be" => Ok(Self::Utf16Be),
            "utf-16le" => Ok(Self::Utf16Le),
            _ => Err(ConfigError::UnsupportedEncoding(name.to_string())),
        }
    }

    /// The canonical charset name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Ascii => "US-ASCII",
            Self::Latin1 => "ISO-8859-1",
            Self::Utf16 => "UTF-16",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf16Le => "UTF-16LE",
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Text-to-bytes encoder descriptor built by the default textline codec.
#[derive(Debug, Clone, Copy)]
pub struct TextEncoder {
    pub charset: Charset,
}

impl ChannelHandler for TextEncoder {
    fn name(&self) -> &str {
        "text-encoder"
    }
}

/// Frame decoder descriptor: splits the byte stream on a delimiter set,
/// bounded by `max_frame_length` bytes per frame. Exceeding the bound
/// before a delimiter is found is the transport layer's framing error.
#[derive(Debug, Clone)]
pub struct DelimiterFrameDecoder {
    pub max_frame_length: usize,
    pub delimiters: SmallVec<[Bytes; 2]>,
}

impl ChannelHandler for DelimiterFrameDecoder {
    fn name(&self) -> &str {
        "delimiter-frame-decoder"
    }
}

/// Bytes-to-text decoder descriptor, the second stage of the textline pair.
#[derive(Debug, Clone, Copy)]
pub struct TextDecoder {
    pub charset: Charset,
}

impl ChannelHandler for TextDecoder {
    fn name(&self) -> &str {
        "text-decoder"
    }
}

/// Generic object-serialization encoder descriptor.
#[derive(Debug, Clone, Copy)]
pub struct ObjectEncoder;

impl ChannelHandler for ObjectEncoder {
    fn name(&self) -> &str {
        "object-encoder"
    }
}

/// Generic object-serialization decoder descriptor.
#[derive(Debug, Clone, Copy)]
pub struct ObjectDecoder;

impl ChannelHandler for ObjectDecoder {
    fn name(&self) -> &str {
        "object-decoder"
    }
}

// The factories below hold only value-typed parameters, so building a
// handler per connection is trivially cheap.

#[derive(Debug, Clone)]
struct TextEncoderFactory {
    charset: Charset,
}

impl HandlerFactory for TextEncoderFactory {
    fn name(&self) -> &str {
        "text-encoder"
    }

    fn new_handler(&self) -> Arc<dyn ChannelHandler> {
        Arc::new(TextEncoder {
            charset: self.charset,
        })
    }
}

#[derive(Debug, Clone)]
struct DelimiterFrameDecoderFactory {
    max_frame_length: usize,
    delimiters: SmallVec<[Bytes; 2]>,
}

impl HandlerFactory for DelimiterFrameDecoderFactory {
    fn name(&self) -> &str {
        "delimiter-frame-decoder"
    }

    fn new_handler(&self) -> Arc<dyn ChannelHandler> {
        Arc::new(DelimiterFrameDecoder {
            max_frame_length: self.max_frame_length,
            delimiters: self.delimiters.clone(),
        })
    }
}

#[derive(Debug, Clone)]
struct TextDecoderFactory {
    charset: Charset,
}

impl HandlerFactory for TextDecoderFactory {
    fn name(&self) -> &str {
        "text-decoder"
    }

    fn new_handler(&self) -> Arc<dyn ChannelHandler> {
        Arc::new(TextDecoder {
            charset: self.charset,
        })
    }
}

#[derive(Debug, Clone)]
struct ObjectEncoderFactory;

impl HandlerFactory for ObjectEncoderFactory {
    fn name(&self) -> &str {
        "object-encoder"
    }

    fn new_handler(&self) -> Arc<dyn ChannelHandler> {
        Arc::new(ObjectEncoder)
    }
}

#[derive(Debug, Clone)]
struct ObjectDecoderFactory;

impl HandlerFactory for ObjectDecoderFactory {
    fn name(&self) -> &str {
        "object-decoder"
    }

    fn new_handler(&self) -> Arc<dyn ChannelHandler> {
        Arc::new(ObjectDecoder)
    }
}

/// Build a text encoder factory for the given charset.
pub fn new_text_encoder(charset: Charset) -> HandlerRef {
    HandlerRef::factory(Arc::new(TextEncoderFactory { charset }))
}

/// Build a delimiter-based frame decoder factory.
pub fn new_frame_decoder(
    max_frame_length: usize,
    delimiters: SmallVec<[Bytes; 2]>,
) -> HandlerRef {
    HandlerRef::factory(Arc::new(DelimiterFrameDecoderFactory {
        max_frame_length,
        delimiters,
    }))
}

/// Build a text decoder factory for the given charset.
pub fn new_text_decoder(charset: Charset) -> HandlerRef {
    HandlerRef::factory(Arc::new(TextDecoderFactory { charset }))
}

/// Build an object-serialization encoder factory.
pub fn new_object_encoder() -> HandlerRef {
    HandlerRef::factory(Arc::new(ObjectEncoderFactory))
}

/// Build an object-serialization decoder factory.
pub fn new_object_decoder() -> HandlerRef {
    HandlerRef::factory(Arc::new(ObjectDecoderFactory))
}
