// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Wire values and the composite types they carry.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::tag::ValueType;

/// A single IPP attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    /// No value. Used with out-of-band tags and collection delimiters.
    Void,
    Integer(i32),
    Boolean(bool),
    /// Any character-string syntax (text, keyword, uri, charset, ...).
    String(String),
    /// octetString.
    Binary(Vec<u8>),
    DateTime(DateTime<FixedOffset>),
    Resolution(Resolution),
    Range(Range),
    TextWithLang(TextWithLang),
    /// Member attributes of a collection, in wire order.
    Collection(Vec<Attribute>),
}

impl Value {
    /// Value family of this variant.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Void => ValueType::Void,
            Value::Integer(_) => ValueType::Integer,
            Value::Boolean(_) => ValueType::Boolean,
            Value::String(_) => ValueType::String,
            Value::Binary(_) => ValueType::Binary,
            Value::DateTime(_) => ValueType::DateTime,
            Value::Resolution(_) => ValueType::Resolution,
            Value::Range(_) => ValueType::Range,
            Value::TextWithLang(_) => ValueType::TextWithLang,
            Value::Collection(_) => ValueType::Collection,
        }
    }
}

/// Units of a [`Resolution`] (RFC 8010 §3.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Units {
    #[default]
    PerInch,
    PerCm,
}

impl Units {
    pub fn code(self) -> i8 {
        match self {
            Units::PerInch => 3,
            Units::PerCm => 4,
        }
    }

    pub fn from_code(code: i8) -> Option<Units> {
        match code {
            3 => Some(Units::PerInch),
            4 => Some(Units::PerCm),
            _ => None,
        }
    }
}

/// Cross-feed and feed resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Resolution {
    pub xres: i32,
    pub yres: i32,
    pub units: Units,
}

impl Resolution {
    pub fn dpi(xres: i32, yres: i32) -> Self {
        Self {
            xres,
            yres,
            units: Units::PerInch,
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let units = match self.units {
            Units::PerInch => "dpi",
            Units::PerCm => "dpcm",
        };
        write!(f, "{}x{}{}", self.xres, self.yres, units)
    }
}

/// rangeOfInteger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    pub lower: i32,
    pub upper: i32,
}

impl Range {
    pub fn new(lower: i32, upper: i32) -> Self {
        Self { lower, upper }
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.lower, self.upper)
    }
}

/// textWithLanguage / nameWithLanguage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextWithLang {
    pub lang: String,
    pub text: String,
}

/// An attribute that may hold either a single integer or a range, such as
/// the members of `media-size-supported`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntegerOrRange {
    Integer(i32),
    Range(Range),
}

impl Default for IntegerOrRange {
    fn default() -> Self {
        IntegerOrRange::Integer(0)
    }
}

impl IntegerOrRange {
    /// Whether `v` falls within this value.
    pub fn contains(&self, v: i32) -> bool {
        match self {
            IntegerOrRange::Integer(i) => *i == v,
            IntegerOrRange::Range(r) => r.lower <= v && v <= r.upper,
        }
    }
}

/// IPP protocol version, carried on the wire either in the message
/// header or as a "major.minor" keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    pub const V1_0: Version = Version::new(1, 0);
    pub const V1_1: Version = Version::new(1, 1);
    pub const V2_0: Version = Version::new(2, 0);

    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl std::str::FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || format!("{s:?}: invalid version string");
        let (major, minor) = s.split_once('.').ok_or_else(invalid)?;
        let major = major.parse::<u8>().map_err(|_| invalid())?;
        let minor = minor.parse::<u8>().map_err(|_| invalid())?;
        Ok(Version::new(major, minor))
    }
}
