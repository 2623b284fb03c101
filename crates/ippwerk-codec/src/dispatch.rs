// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scalar dispatch: how each native value type maps to a wire value and
// back, and which tag it is sent with by default.
//
// Exact types implement `Scalar` directly. Types that are only an
// integer or a string underneath (enums, keyword sets) implement
// `EnumValue` or `KeywordValue` instead and get integer or keyword
// semantics through `ipp_enum!` / `ipp_keyword!`.

use chrono::{DateTime, FixedOffset};
use ippwerk_core::{
    DecodeErrorKind, IntegerOrRange, Range, Resolution, Tag, TextWithLang, Value, ValueType, Version,
};
use uuid::Uuid;

/// A native type that is carried by a single wire value.
pub trait Scalar: Clone + Default + Send + Sync + 'static {
    /// Tag used when the field descriptor does not name one.
    const DEFAULT_TAG: Tag;

    /// Encode into a value. A returned tag of [`Tag::Zero`] means "use the
    /// field's tag".
    fn encode(&self) -> (Tag, Value);

    /// Decode from a value received with `tag`.
    fn decode(tag: Tag, value: &Value) -> Result<Self, DecodeErrorKind>;
}

/// Integer-backed enumeration (IPP `enum` syntax).
pub trait EnumValue: Copy + Default + Send + Sync + 'static {
    fn to_i32(self) -> i32;
    fn from_i32(v: i32) -> Self;
}

/// Keyword-backed enumeration. Unrecognised keywords must still be
/// representable, so `from_keyword` is total.
pub trait KeywordValue: Clone + Default + Send + Sync + 'static {
    fn as_keyword(&self) -> &str;
    fn from_keyword(s: &str) -> Self;
}

fn mismatch(from: Tag, to: ValueType) -> DecodeErrorKind {
    DecodeErrorKind::TypeMismatch { from, to }
}

/// Short name of a native type, for schema diagnostics.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

// ---------------------------------------------------------------------------
// Coarse kinds
// ---------------------------------------------------------------------------

#[doc(hidden)]
pub fn encode_enum<T: EnumValue>(v: &T) -> (Tag, Value) {
    (Tag::Zero, Value::Integer(v.to_i32()))
}

#[doc(hidden)]
pub fn decode_enum<T: EnumValue>(tag: Tag, value: &Value) -> Result<T, DecodeErrorKind> {
    match value {
        Value::Integer(v) => Ok(T::from_i32(*v)),
        _ => Err(mismatch(tag, ValueType::Integer)),
    }
}

#[doc(hidden)]
pub fn encode_keyword<T: KeywordValue>(v: &T) -> (Tag, Value) {
    (Tag::Zero, Value::String(v.as_keyword().to_owned()))
}

#[doc(hidden)]
pub fn decode_keyword<T: KeywordValue>(tag: Tag, value: &Value) -> Result<T, DecodeErrorKind> {
    match value {
        Value::String(s) => Ok(T::from_keyword(s)),
        _ => Err(mismatch(tag, ValueType::String)),
    }
}

// ---------------------------------------------------------------------------
// Integer family
// ---------------------------------------------------------------------------

impl Scalar for i32 {
    const DEFAULT_TAG: Tag = Tag::Integer;

    fn encode(&self) -> (Tag, Value) {
        (Tag::Zero, Value::Integer(*self))
    }

    fn decode(tag: Tag, value: &Value) -> Result<Self, DecodeErrorKind> {
        match value {
            Value::Integer(v) => Ok(*v),
            _ => Err(mismatch(tag, ValueType::Integer)),
        }
    }
}

impl Scalar for u16 {
    const DEFAULT_TAG: Tag = Tag::Integer;

    fn encode(&self) -> (Tag, Value) {
        (Tag::Zero, Value::Integer(i32::from(*self)))
    }

    fn decode(tag: Tag, value: &Value) -> Result<Self, DecodeErrorKind> {
        match value {
            Value::Integer(v) => u16::try_from(*v).map_err(|_| DecodeErrorKind::Range {
                value: i64::from(*v),
                min: 0,
                max: i64::from(u16::MAX),
            }),
            _ => Err(mismatch(tag, ValueType::Integer)),
        }
    }
}

impl Scalar for bool {
    const DEFAULT_TAG: Tag = Tag::Boolean;

    fn encode(&self) -> (Tag, Value) {
        (Tag::Zero, Value::Boolean(*self))
    }

    fn decode(tag: Tag, value: &Value) -> Result<Self, DecodeErrorKind> {
        match value {
            Value::Boolean(v) => Ok(*v),
            _ => Err(mismatch(tag, ValueType::Boolean)),
        }
    }
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

impl Scalar for String {
    const DEFAULT_TAG: Tag = Tag::Text;

    fn encode(&self) -> (Tag, Value) {
        (Tag::Zero, Value::String(self.clone()))
    }

    fn decode(tag: Tag, value: &Value) -> Result<Self, DecodeErrorKind> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Binary(b) => {
                String::from_utf8(b.clone()).map_err(|e| DecodeErrorKind::Conversion(e.to_string()))
            }
            _ => Err(mismatch(tag, ValueType::String)),
        }
    }
}

impl Scalar for Version {
    const DEFAULT_TAG: Tag = Tag::Keyword;

    fn encode(&self) -> (Tag, Value) {
        (Tag::Zero, Value::String(self.to_string()))
    }

    fn decode(tag: Tag, value: &Value) -> Result<Self, DecodeErrorKind> {
        match value {
            Value::String(s) => s.parse().map_err(DecodeErrorKind::Conversion),
            _ => Err(mismatch(tag, ValueType::String)),
        }
    }
}

/// UUIDs travel as `urn:uuid:` URIs (RFC 4122 §3).
impl Scalar for Uuid {
    const DEFAULT_TAG: Tag = Tag::Uri;

    fn encode(&self) -> (Tag, Value) {
        (Tag::Zero, Value::String(self.urn().to_string()))
    }

    fn decode(tag: Tag, value: &Value) -> Result<Self, DecodeErrorKind> {
        let Value::String(s) = value else {
            return Err(mismatch(tag, ValueType::String));
        };
        let bare = s
            .get(..9)
            .filter(|p| p.eq_ignore_ascii_case("urn:uuid:"))
            .map_or(s.as_str(), |_| &s[9..]);
        Uuid::parse_str(bare).map_err(|e| DecodeErrorKind::Conversion(format!("{s:?}: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Composite types
// ---------------------------------------------------------------------------

impl Scalar for DateTime<FixedOffset> {
    const DEFAULT_TAG: Tag = Tag::DateTime;

    fn encode(&self) -> (Tag, Value) {
        (Tag::Zero, Value::DateTime(*self))
    }

    fn decode(tag: Tag, value: &Value) -> Result<Self, DecodeErrorKind> {
        match value {
            Value::DateTime(v) => Ok(*v),
            _ => Err(mismatch(tag, ValueType::DateTime)),
        }
    }
}

impl Scalar for Resolution {
    const DEFAULT_TAG: Tag = Tag::Resolution;

    fn encode(&self) -> (Tag, Value) {
        (Tag::Zero, Value::Resolution(*self))
    }

    fn decode(tag: Tag, value: &Value) -> Result<Self, DecodeErrorKind> {
        match value {
            Value::Resolution(v) => Ok(*v),
            _ => Err(mismatch(tag, ValueType::Resolution)),
        }
    }
}

impl Scalar for Range {
    const DEFAULT_TAG: Tag = Tag::Range;

    fn encode(&self) -> (Tag, Value) {
        (Tag::Zero, Value::Range(*self))
    }

    fn decode(tag: Tag, value: &Value) -> Result<Self, DecodeErrorKind> {
        match value {
            Value::Range(v) => Ok(*v),
            _ => Err(mismatch(tag, ValueType::Range)),
        }
    }
}

impl Scalar for TextWithLang {
    const DEFAULT_TAG: Tag = Tag::TextLang;

    fn encode(&self) -> (Tag, Value) {
        (Tag::Zero, Value::TextWithLang(self.clone()))
    }

    fn decode(tag: Tag, value: &Value) -> Result<Self, DecodeErrorKind> {
        match value {
            Value::TextWithLang(v) => Ok(v.clone()),
            _ => Err(mismatch(tag, ValueType::TextWithLang)),
        }
    }
}

/// Sent as `integer` or `rangeOfInteger` depending on the variant, so it
/// has no default tag of its own.
impl Scalar for IntegerOrRange {
    const DEFAULT_TAG: Tag = Tag::Zero;

    fn encode(&self) -> (Tag, Value) {
        match self {
            IntegerOrRange::Integer(v) => (Tag::Integer, Value::Integer(*v)),
            IntegerOrRange::Range(r) => (Tag::Range, Value::Range(*r)),
        }
    }

    fn decode(tag: Tag, value: &Value) -> Result<Self, DecodeErrorKind> {
        match value {
            Value::Integer(v) => Ok(IntegerOrRange::Integer(*v)),
            Value::Range(r) => Ok(IntegerOrRange::Range(*r)),
            _ => Err(mismatch(tag, ValueType::Integer)),
        }
    }
}

crate::ipp_scalar!(
    i32,
    u16,
    bool,
    String,
    Version,
    Uuid,
    DateTime<FixedOffset>,
    Resolution,
    Range,
    TextWithLang,
    IntegerOrRange,
);
