// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// IPP value tags (RFC 8010 §3.5.2) and the value families they belong to.

use serde::{Deserialize, Serialize};

/// An IPP value tag.
///
/// `Zero` is not a wire tag. It marks "no tag chosen yet" in descriptors
/// and encoder output, where the step's default tag is substituted later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tag {
    #[default]
    Zero,

    // -- Out-of-band --
    Unsupported,
    Unknown,
    NoValue,

    // -- Integer family --
    Integer,
    Boolean,
    Enum,

    // -- Octet-string family --
    String,
    DateTime,
    Resolution,
    Range,
    BeginCollection,
    TextLang,
    NameLang,
    EndCollection,

    // -- Character-string family --
    Text,
    Name,
    Keyword,
    Uri,
    UriScheme,
    Charset,
    Language,
    MimeType,
    MemberName,
}

/// The kind of [`crate::Value`] a tag carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Invalid,
    Void,
    Integer,
    Boolean,
    String,
    DateTime,
    Resolution,
    Range,
    TextWithLang,
    Binary,
    Collection,
}

impl Tag {
    /// Every tag that can appear on the wire, in code order.
    pub const ALL: [Tag; 23] = [
        Tag::Unsupported,
        Tag::Unknown,
        Tag::NoValue,
        Tag::Integer,
        Tag::Boolean,
        Tag::Enum,
        Tag::String,
        Tag::DateTime,
        Tag::Resolution,
        Tag::Range,
        Tag::BeginCollection,
        Tag::TextLang,
        Tag::NameLang,
        Tag::EndCollection,
        Tag::Text,
        Tag::Name,
        Tag::Keyword,
        Tag::Uri,
        Tag::UriScheme,
        Tag::Charset,
        Tag::Language,
        Tag::MimeType,
        Tag::MemberName,
    ];

    /// Wire code of the tag. `Zero` maps to 0x00.
    pub fn code(self) -> u8 {
        match self {
            Tag::Zero => 0x00,
            Tag::Unsupported => 0x10,
            Tag::Unknown => 0x12,
            Tag::NoValue => 0x13,
            Tag::Integer => 0x21,
            Tag::Boolean => 0x22,
            Tag::Enum => 0x23,
            Tag::String => 0x30,
            Tag::DateTime => 0x31,
            Tag::Resolution => 0x32,
            Tag::Range => 0x33,
            Tag::BeginCollection => 0x34,
            Tag::TextLang => 0x35,
            Tag::NameLang => 0x36,
            Tag::EndCollection => 0x37,
            Tag::Text => 0x41,
            Tag::Name => 0x42,
            Tag::Keyword => 0x44,
            Tag::Uri => 0x45,
            Tag::UriScheme => 0x46,
            Tag::Charset => 0x47,
            Tag::Language => 0x48,
            Tag::MimeType => 0x49,
            Tag::MemberName => 0x4a,
        }
    }

    /// Look up a value tag by wire code.
    pub fn from_code(code: u8) -> Option<Tag> {
        Tag::ALL.iter().copied().find(|t| t.code() == code)
    }

    /// Name of the tag as written in RFC 8011 attribute syntaxes.
    pub fn name(self) -> &'static str {
        match self {
            Tag::Zero => "zero",
            Tag::Unsupported => "unsupported",
            Tag::Unknown => "unknown",
            Tag::NoValue => "no-value",
            Tag::Integer => "integer",
            Tag::Boolean => "boolean",
            Tag::Enum => "enum",
            Tag::String => "octetString",
            Tag::DateTime => "dateTime",
            Tag::Resolution => "resolution",
            Tag::Range => "rangeOfInteger",
            Tag::BeginCollection => "collection",
            Tag::TextLang => "textWithLanguage",
            Tag::NameLang => "nameWithLanguage",
            Tag::EndCollection => "endCollection",
            Tag::Text => "textWithoutLanguage",
            Tag::Name => "nameWithoutLanguage",
            Tag::Keyword => "keyword",
            Tag::Uri => "uri",
            Tag::UriScheme => "uriScheme",
            Tag::Charset => "charset",
            Tag::Language => "naturalLanguage",
            Tag::MimeType => "mimeMediaType",
            Tag::MemberName => "memberAttrName",
        }
    }

    /// Out-of-band tags carry no value, only the reason it is missing.
    pub fn is_out_of_band(self) -> bool {
        matches!(self, Tag::Unsupported | Tag::Unknown | Tag::NoValue)
    }

    /// Value family carried by this tag.
    pub fn value_type(self) -> ValueType {
        match self {
            Tag::Zero => ValueType::Invalid,
            Tag::Unsupported | Tag::Unknown | Tag::NoValue | Tag::EndCollection => ValueType::Void,
            Tag::Integer | Tag::Enum => ValueType::Integer,
            Tag::Boolean => ValueType::Boolean,
            Tag::String => ValueType::Binary,
            Tag::DateTime => ValueType::DateTime,
            Tag::Resolution => ValueType::Resolution,
            Tag::Range => ValueType::Range,
            Tag::BeginCollection => ValueType::Collection,
            Tag::TextLang | Tag::NameLang => ValueType::TextWithLang,
            Tag::Text
            | Tag::Name
            | Tag::Keyword
            | Tag::Uri
            | Tag::UriScheme
            | Tag::Charset
            | Tag::Language
            | Tag::MimeType
            | Tag::MemberName => ValueType::String,
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValueType::Invalid => "Invalid",
            ValueType::Void => "Void",
            ValueType::Integer => "Integer",
            ValueType::Boolean => "Boolean",
            ValueType::String => "String",
            ValueType::DateTime => "DateTime",
            ValueType::Resolution => "Resolution",
            ValueType::Range => "Range",
            ValueType::TextWithLang => "TextWithLang",
            ValueType::Binary => "Binary",
            ValueType::Collection => "Collection",
        };
        f.write_str(s)
    }
}
