// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Ippwerk.

use thiserror::Error;

use crate::tag::{Tag, ValueType};

/// A field descriptor string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("missed attribute name")]
    MissedName,

    #[error("{0:?}: unknown keyword")]
    UnknownKeyword(String),

    #[error("{0:?}: invalid limit")]
    InvalidLimit(String),

    #[error("{0:?}: limit out of range")]
    LimitOutOfRange(String),

    #[error("{token:?}: {bound} out of range")]
    BoundOutOfRange { token: String, bound: String },

    #[error("{0:?}: range min>max")]
    RangeInverted(String),
}

/// A record type cannot be turned into a codec.
///
/// These are programming errors in the record declaration; they are
/// reported when the codec is first requested and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("{record}.{field}: {err}")]
    Descriptor {
        record: &'static str,
        field: &'static str,
        #[source]
        err: DescriptorError,
    },

    #[error("{record}.{field}: can't represent {native} as {tag}")]
    TagMismatch {
        record: &'static str,
        field: &'static str,
        native: &'static str,
        tag: Tag,
    },

    #[error("{record}.{field}: attribute {name:?} already used by {previous}")]
    DuplicateName {
        record: &'static str,
        field: &'static str,
        name: String,
        previous: &'static str,
    },

    #[error("{record}: contains no IPP fields")]
    NoFields { record: &'static str },

    #[error("{record}: collection contains itself")]
    Recursive { record: &'static str },
}

/// What went wrong while decoding one value or attribute.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeErrorKind {
    // -- Type mismatch --
    #[error("can't convert {from} to {to}")]
    TypeMismatch { from: Tag, to: ValueType },

    // -- Arity --
    #[error("at least 1 value required")]
    NoValues,

    #[error("1 value expected, {0} present")]
    TooManyValues(usize),

    // -- Range --
    #[error("value {value} out of range {min}...{max}")]
    Range { value: i64, min: i64, max: i64 },

    // -- Conversion --
    #[error("{0}")]
    Conversion(String),
}

impl DecodeErrorKind {
    /// Warnings are recorded but never abort a decode.
    pub fn is_warning(&self) -> bool {
        matches!(self, DecodeErrorKind::TooManyValues(_))
    }
}

/// A decode error, located by record type and attribute path.
///
/// The path names the attribute and, inside collections and multi-valued
/// attributes, the member and value index, as in `media-col/media-size`
/// or `media-size-supported[1]/x-dimension`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("IPP decode {record}: {path:?}: {kind}")]
pub struct DecodeError {
    pub record: &'static str,
    pub path: String,
    pub kind: DecodeErrorKind,
}

/// Top-level error type for Ippwerk operations that cross the codec
/// boundary: message framing, record encode/decode and configuration.
#[derive(Debug, Error)]
pub enum IppwerkError {
    // -- Wire framing --
    #[error("malformed IPP message: {0}")]
    Malformed(String),

    #[error("IPP message too large: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },

    #[error("missing attribute group: {0}")]
    MissingGroup(String),

    // -- Codec --
    #[error("IPP schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, IppwerkError>;
