// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Field descriptors: the per-field annotation that names an IPP attribute
// and constrains how it is represented on the wire.
//
// Syntax:
//
//   [?|!]name[,modifier...]
//
//   ?name, !name      optional / required (default: recommended)
//   keyword           value tag: integer, enum, keyword, text, uri, ...
//   keyword|no-value  out-of-band tag to send when the field is empty
//   keyword|name      alternative value tags
//   1setOf keyword    the attribute is a set (informational)
//   keyword(MIN:MAX)  inclusive range attached to the keyword
//   >N, <N            exclusive bounds
//   (MIN:MAX), (MAX)  inclusive bounds; MIN and MAX mean unbounded
//   MIN:MAX           same, without parentheses

use ippwerk_core::{DescriptorError, Tag};
use serde::Serialize;

/// Conformance of an attribute as declared by the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Conformance {
    Required,
    Optional,
    #[default]
    Recommended,
}

/// Parsed field descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    /// Wire attribute name.
    pub name: String,
    pub conformance: Conformance,
    /// Explicit value tag, or [`Tag::Zero`] to use the field type's default.
    pub tag: Tag,
    /// Further tags the attribute may be sent with.
    pub alt_tags: Vec<Tag>,
    /// Out-of-band tag emitted instead of an empty attribute.
    pub zero_tag: Tag,
    /// Inclusive lower bound.
    pub min: i32,
    /// Inclusive upper bound.
    pub max: i32,
    /// Declared as `1setOf`.
    pub set_of: bool,
}

impl Descriptor {
    /// Parse a descriptor string.
    pub fn parse(s: &str) -> Result<Self, DescriptorError> {
        let mut parts = s.split(',').map(str::trim);
        let head = parts.next().unwrap_or_default();

        let (conformance, name) = if let Some(name) = head.strip_prefix('?') {
            (Conformance::Optional, name)
        } else if let Some(name) = head.strip_prefix('!') {
            (Conformance::Required, name)
        } else {
            (Conformance::Recommended, head)
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(DescriptorError::MissedName);
        }

        let mut desc = Descriptor {
            name: name.to_owned(),
            conformance,
            tag: Tag::Zero,
            alt_tags: Vec::new(),
            zero_tag: Tag::Zero,
            min: i32::MIN,
            max: i32::MAX,
            set_of: false,
        };

        for part in parts.filter(|p| !p.is_empty()) {
            desc.apply(part)?;
        }

        Ok(desc)
    }

    /// Whether the descriptor narrows the integer range.
    pub fn is_bounded(&self) -> bool {
        self.min != i32::MIN || self.max != i32::MAX
    }

    fn apply(&mut self, part: &str) -> Result<(), DescriptorError> {
        if let Some(n) = part.strip_prefix('>') {
            self.min = parse_limit(part, n, 1)?;
        } else if let Some(n) = part.strip_prefix('<') {
            self.max = parse_limit(part, n, -1)?;
        } else if part.starts_with('(') {
            self.apply_range(part, part)?;
        } else if looks_like_range(part) {
            self.apply_range(part, part)
                .map_err(|err| match err {
                    DescriptorError::InvalidLimit(_) => DescriptorError::UnknownKeyword(part.to_owned()),
                    err => err,
                })?;
        } else {
            self.apply_keyword(part)?;
        }

        if self.min > self.max {
            return Err(DescriptorError::RangeInverted(part.to_owned()));
        }

        Ok(())
    }

    fn apply_keyword(&mut self, part: &str) -> Result<(), DescriptorError> {
        let mut kw = part;
        if let Some(rest) = strip_prefix_ignore_case(kw, "1setOf") {
            self.set_of = true;
            kw = rest.trim_start();
        }

        // integer(1:MAX)
        if let Some(open) = kw.find('(') {
            self.apply_range(part, &kw[open..])?;
            kw = kw[..open].trim_end();
        }

        let mut alternatives = kw.split('|').map(str::trim);
        let primary = alternatives.next().unwrap_or_default();
        let tag = keyword_tag(primary).ok_or_else(|| DescriptorError::UnknownKeyword(part.to_owned()))?;

        for alt in alternatives {
            match alt {
                "unknown" => self.zero_tag = Tag::Unknown,
                "no-value" => self.zero_tag = Tag::NoValue,
                _ => {
                    let alt_tag = keyword_tag(alt).ok_or_else(|| DescriptorError::UnknownKeyword(part.to_owned()))?;
                    self.alt_tags.push(alt_tag);
                }
            }
        }

        self.tag = tag;
        Ok(())
    }

    fn apply_range(&mut self, part: &str, range: &str) -> Result<(), DescriptorError> {
        let inner = match range.strip_prefix('(') {
            Some(rest) => rest
                .strip_suffix(')')
                .ok_or_else(|| DescriptorError::InvalidLimit(part.to_owned()))?,
            None => range,
        };

        match inner.split_once(':') {
            Some((lo, hi)) => {
                self.min = parse_bound(part, lo.trim())?;
                self.max = parse_bound(part, hi.trim())?;
            }
            None => {
                self.max = parse_bound(part, inner.trim())?;
            }
        }

        Ok(())
    }
}

impl std::str::FromStr for Descriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Descriptor::parse(s)
    }
}

/// Resolve a type keyword (case-insensitive) to its value tag.
pub fn keyword_tag(kw: &str) -> Option<Tag> {
    let tag = match kw.to_ascii_lowercase().as_str() {
        "boolean" => Tag::Boolean,
        "charset" => Tag::Charset,
        "collection" => Tag::BeginCollection,
        "datetime" => Tag::DateTime,
        "enum" => Tag::Enum,
        "integer" => Tag::Integer,
        "keyword" => Tag::Keyword,
        "memberattrname" => Tag::MemberName,
        "mimemediatype" => Tag::MimeType,
        "name" | "namewithoutlanguage" => Tag::Name,
        "namewithlanguage" => Tag::NameLang,
        "naturallanguage" => Tag::Language,
        "octetstring" | "string" => Tag::String,
        "rangeofinteger" => Tag::Range,
        "resolution" => Tag::Resolution,
        "text" | "textwithoutlanguage" => Tag::Text,
        "textwithlanguage" => Tag::TextLang,
        "uri" => Tag::Uri,
        "urischeme" => Tag::UriScheme,
        _ => return None,
    };
    Some(tag)
}

// `>N` / `<N`: the bound is exclusive, so shift it by `delta`.
fn parse_limit(part: &str, n: &str, delta: i64) -> Result<i32, DescriptorError> {
    let v = n
        .trim()
        .parse::<i64>()
        .map_err(|_| DescriptorError::InvalidLimit(part.to_owned()))?;
    v.checked_add(delta)
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| DescriptorError::LimitOutOfRange(part.to_owned()))
}

fn parse_bound(part: &str, s: &str) -> Result<i32, DescriptorError> {
    if s.eq_ignore_ascii_case("MIN") {
        return Ok(i32::MIN);
    }
    if s.eq_ignore_ascii_case("MAX") {
        return Ok(i32::MAX);
    }

    let v = s
        .parse::<i64>()
        .map_err(|_| DescriptorError::InvalidLimit(part.to_owned()))?;
    i32::try_from(v).map_err(|_| DescriptorError::BoundOutOfRange {
        token: part.to_owned(),
        bound: s.to_owned(),
    })
}

fn looks_like_range(part: &str) -> bool {
    part.contains(':')
        && !part.contains('(')
        && part
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit() || c == '-' || c == 'M' || c == 'm')
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}
