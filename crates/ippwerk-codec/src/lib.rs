// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ippwerk codec: maps Rust records onto IPP attributes and back.
//
// A record declares its fields once (see `schema`); the registry turns
// the declaration into a `Codec` on first use and caches it. Encoding
// produces attributes in declaration order. Decoding applies attributes
// in the same order, either failing on the first bad attribute or
// collecting errors and carrying on.

mod codec;
mod decoder;
mod descriptor;
pub mod dispatch;
mod encoder;
mod macros;
mod maybe;
mod object;
mod raw;
mod registry;
mod schema;

#[cfg(test)]
mod fixtures;

pub use codec::{AttrInfo, Codec, CodecStep};
pub use decoder::Decoder;
pub use descriptor::{Conformance, Descriptor, keyword_tag};
pub use dispatch::{EnumValue, KeywordValue, Scalar};
pub use maybe::Maybe;
pub use object::Object;
pub use raw::RawAttrs;
pub use registry::CodecRegistry;
pub use schema::{Element, ElementMethods, Field, Record, Schema, ShapeMut, ShapeRef};

pub use ippwerk_core::{
    Attribute, Attributes, DecodeError, DecodeErrorKind, DecodePolicy, DescriptorError, IntegerOrRange, Range,
    Resolution, SchemaError, Tag, TextWithLang, Value, ValueType, Values, Version,
};
