// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Binary IPP message framing (RFC 8010 SS3).
//
// A message is an 8-byte header followed by attribute groups, an
// end-of-attributes tag and optional document data:
//
// ```text
// version-number:  2 bytes (major, minor)
// operation-id / status-code: 2 bytes (big-endian u16)
// request-id:      4 bytes (big-endian u32)
// attribute-groups: variable
//   delimiter-tag: 1 byte
//   attributes:    variable
//     value-tag:    1 byte
//     name-length:  2 bytes (big-endian u16)
//     name:         name-length bytes
//     value-length: 2 bytes (big-endian u16)
//     value:        value-length bytes
// end-of-attributes-tag: 1 byte (0x03)
// document-data: remainder
// ```
//
// An attribute with an empty name is an additional value of the previous
// attribute. Collections (RFC 8010 SS3.1.6) are a begCollection value
// followed by memberAttrName/value pairs and an endCollection.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike};
use serde::Serialize;
use tracing::{debug, instrument};

use ippwerk_core::{
    Attribute, Attributes, IppwerkError, Range, Resolution, Result, Tag, TextWithLang, Units, Value, ValueType,
    Version,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default cap on the size of a message accepted by [`Message::decode`].
pub const MAX_MESSAGE_BYTES: usize = 64 * 1024 * 1024; // 64 MiB

/// End-of-attributes-tag: terminates the attribute section.
const TAG_END_OF_ATTRIBUTES: u8 = 0x03;

/// Highest delimiter tag value (RFC 8010 SS3.5.1).
const TAG_DELIMITER_MAX: u8 = 0x0F;

/// Extension value tag; the real tag follows in the value.
const TAG_EXTENSION: u8 = 0x7F;

/// Collections nested deeper than this are rejected.
const MAX_COLLECTION_DEPTH: usize = 32;

// ---------------------------------------------------------------------------
// IPP status codes (RFC 8011 SS4.1.8)
// ---------------------------------------------------------------------------

/// Successful completion.
pub const STATUS_OK: u16 = 0x0000;

/// Successful completion; some attributes were ignored or substituted.
pub const STATUS_OK_IGNORED_OR_SUBSTITUTED: u16 = 0x0001;

// ---------------------------------------------------------------------------
// Attribute groups
// ---------------------------------------------------------------------------

/// Delimiter tag opening an attribute group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GroupTag {
    Operation,
    Job,
    Printer,
    Unsupported,
    Subscription,
    EventNotification,
    Resource,
    Document,
    System,
}

impl GroupTag {
    pub fn code(self) -> u8 {
        match self {
            GroupTag::Operation => 0x01,
            GroupTag::Job => 0x02,
            GroupTag::Printer => 0x04,
            GroupTag::Unsupported => 0x05,
            GroupTag::Subscription => 0x06,
            GroupTag::EventNotification => 0x07,
            GroupTag::Resource => 0x08,
            GroupTag::Document => 0x09,
            GroupTag::System => 0x0A,
        }
    }

    pub fn from_code(code: u8) -> Option<GroupTag> {
        Some(match code {
            0x01 => GroupTag::Operation,
            0x02 => GroupTag::Job,
            0x04 => GroupTag::Printer,
            0x05 => GroupTag::Unsupported,
            0x06 => GroupTag::Subscription,
            0x07 => GroupTag::EventNotification,
            0x08 => GroupTag::Resource,
            0x09 => GroupTag::Document,
            0x0A => GroupTag::System,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            GroupTag::Operation => "operation-attributes",
            GroupTag::Job => "job-attributes",
            GroupTag::Printer => "printer-attributes",
            GroupTag::Unsupported => "unsupported-attributes",
            GroupTag::Subscription => "subscription-attributes",
            GroupTag::EventNotification => "event-notification-attributes",
            GroupTag::Resource => "resource-attributes",
            GroupTag::Document => "document-attributes",
            GroupTag::System => "system-attributes",
        }
    }
}

impl std::fmt::Display for GroupTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A group of attributes delimited by a group tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub tag: GroupTag,
    pub attrs: Attributes,
}

impl Group {
    pub fn new(tag: GroupTag, attrs: Attributes) -> Self {
        Self { tag, attrs }
    }

    /// First attribute with the given name.
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|a| a.name == name)
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// An IPP request or response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub version: Version,
    /// Operation id (requests) or status code (responses).
    pub code: u16,
    pub request_id: u32,
    pub groups: Vec<Group>,
    /// Document data following the attributes.
    #[serde(skip)]
    pub data: Vec<u8>,
}

impl Message {
    pub fn new(version: Version, code: u16, request_id: u32) -> Self {
        Self {
            version,
            code,
            request_id,
            groups: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Append an attribute group.
    pub fn add_group(&mut self, tag: GroupTag, attrs: Attributes) -> &mut Self {
        self.groups.push(Group::new(tag, attrs));
        self
    }

    /// First group with the given tag.
    pub fn group(&self, tag: GroupTag) -> Option<&Group> {
        self.groups.iter().find(|g| g.tag == tag)
    }

    /// First group with the given tag, or [`IppwerkError::MissingGroup`].
    pub fn require_group(&self, tag: GroupTag) -> Result<&Group> {
        self.group(tag)
            .ok_or_else(|| IppwerkError::MissingGroup(tag.name().to_owned()))
    }

    /// Parse a message, rejecting anything over [`MAX_MESSAGE_BYTES`].
    pub fn decode(data: &[u8]) -> Result<Message> {
        Self::decode_with_limit(data, MAX_MESSAGE_BYTES)
    }

    /// Parse a message no larger than `limit` bytes.
    #[instrument(level = "debug", skip(data), fields(len = data.len()))]
    pub fn decode_with_limit(data: &[u8], limit: usize) -> Result<Message> {
        if data.len() > limit {
            return Err(IppwerkError::TooLarge {
                size: data.len(),
                limit,
            });
        }

        let mut r = Reader::new(data);
        let version = Version::new(r.u8("version-number")?, r.u8("version-number")?);
        let code = r.u16("operation-id")?;
        let request_id = r.u32("request-id")?;

        let mut msg = Message::new(version, code, request_id);
        let mut current: Option<Group> = None;

        loop {
            let tag = r
                .u8("delimiter-tag")
                .map_err(|_| malformed("missing end-of-attributes-tag"))?;

            // Delimiter tags are in the range 0x00..=0x0F.
            if tag <= TAG_DELIMITER_MAX {
                if let Some(group) = current.take() {
                    msg.groups.push(group);
                }
                if tag == TAG_END_OF_ATTRIBUTES {
                    break;
                }
                let group_tag =
                    GroupTag::from_code(tag).ok_or_else(|| malformed(format!("unknown group tag 0x{tag:02x}")))?;
                current = Some(Group::new(group_tag, Attributes::new()));
                continue;
            }

            let name = r.string("attribute name")?;
            let group = current
                .as_mut()
                .ok_or_else(|| malformed(format!("{name:?}: attribute outside of any group")))?;
            let (tag, value) = read_value(&mut r, tag, &name, 0)?;

            if name.is_empty() {
                let last = group
                    .attrs
                    .last_mut()
                    .ok_or_else(|| malformed("additional value without attribute"))?;
                last.push(tag, value);
            } else {
                group.attrs.push(Attribute::new(name, tag, value));
            }
        }

        msg.data = r.rest().to_vec();
        debug!(
            code = msg.code,
            request_id = msg.request_id,
            groups = msg.groups.len(),
            data = msg.data.len(),
            "parsed IPP message"
        );
        Ok(msg)
    }

    /// Serialise the message.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut w = Writer::with_capacity(256 + self.data.len());
        w.buf.push(self.version.major);
        w.buf.push(self.version.minor);
        w.buf.extend_from_slice(&self.code.to_be_bytes());
        w.buf.extend_from_slice(&self.request_id.to_be_bytes());

        for group in &self.groups {
            w.buf.push(group.tag.code());
            for attr in &group.attrs {
                w.attribute(attr)?;
            }
        }

        w.buf.push(TAG_END_OF_ATTRIBUTES);
        w.buf.extend_from_slice(&self.data);
        Ok(w.buf)
    }
}

fn malformed(msg: impl Into<String>) -> IppwerkError {
    IppwerkError::Malformed(msg.into())
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn bytes(&mut self, n: usize, what: &str) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| malformed(format!("truncated {what}")))?;
        let out = &self.data[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    fn u8(&mut self, what: &str) -> Result<u8> {
        Ok(self.bytes(1, what)?[0])
    }

    fn u16(&mut self, what: &str) -> Result<u16> {
        let b = self.bytes(2, what)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self, what: &str) -> Result<u32> {
        let b = self.bytes(4, what)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// A length-prefixed byte string.
    fn counted(&mut self, what: &str) -> Result<&'a [u8]> {
        let len = self.u16(what)?;
        self.bytes(usize::from(len), what)
    }

    fn string(&mut self, what: &str) -> Result<String> {
        Ok(String::from_utf8_lossy(self.counted(what)?).into_owned())
    }

    fn rest(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or_default()
    }
}

/// Read the value part of an attribute whose tag byte and name were just
/// consumed.
fn read_value(r: &mut Reader<'_>, code: u8, name: &str, depth: usize) -> Result<(Tag, Value)> {
    if code == TAG_EXTENSION {
        return Err(malformed(format!("{name:?}: extension tags are not supported")));
    }
    let tag = Tag::from_code(code).ok_or_else(|| malformed(format!("{name:?}: unknown value tag 0x{code:02x}")))?;
    let bytes = r.counted("attribute value")?;

    if tag == Tag::BeginCollection {
        return Ok((tag, read_collection(r, name, depth + 1)?));
    }
    Ok((tag, decode_value(tag, bytes).map_err(|e| malformed(format!("{name:?}: {e}")))?))
}

/// Read collection members up to the matching endCollection.
fn read_collection(r: &mut Reader<'_>, name: &str, depth: usize) -> Result<Value> {
    if depth > MAX_COLLECTION_DEPTH {
        return Err(malformed(format!("{name:?}: collection nesting too deep")));
    }

    let mut members = Attributes::new();
    loop {
        let code = r.u8("collection member tag")?;
        // Member values carry an empty name; it is read and ignored.
        r.counted("collection member name")?;

        match Tag::from_code(code) {
            Some(Tag::EndCollection) => {
                r.counted("endCollection value")?;
                return Ok(Value::Collection(members));
            }
            Some(Tag::MemberName) => {
                let member = String::from_utf8_lossy(r.counted("memberAttrName value")?).into_owned();
                members.push(Attribute::with_values(member, Vec::new()));
            }
            _ => {
                let (tag, value) = read_value(r, code, name, depth)?;
                let last = members
                    .last_mut()
                    .ok_or_else(|| malformed(format!("{name:?}: collection value without memberAttrName")))?;
                last.push(tag, value);
            }
        }
    }
}

fn fixed<const N: usize>(bytes: &[u8], what: &str) -> std::result::Result<[u8; N], String> {
    bytes
        .try_into()
        .map_err(|_| format!("{what}: {} bytes, expected {N}", bytes.len()))
}

/// Decode a non-collection value of the given tag.
fn decode_value(tag: Tag, bytes: &[u8]) -> std::result::Result<Value, String> {
    Ok(match tag.value_type() {
        ValueType::Void => Value::Void,
        ValueType::Integer => Value::Integer(i32::from_be_bytes(fixed(bytes, "integer")?)),
        ValueType::Boolean => {
            let [b] = fixed::<1>(bytes, "boolean")?;
            Value::Boolean(b != 0)
        }
        ValueType::String => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueType::Binary => Value::Binary(bytes.to_vec()),
        ValueType::DateTime => Value::DateTime(decode_datetime(fixed(bytes, "dateTime")?)?),
        ValueType::Resolution => {
            let b: [u8; 9] = fixed(bytes, "resolution")?;
            let units = Units::from_code(b[8] as i8).ok_or_else(|| format!("resolution units {}", b[8]))?;
            Value::Resolution(Resolution {
                xres: i32::from_be_bytes([b[0], b[1], b[2], b[3]]),
                yres: i32::from_be_bytes([b[4], b[5], b[6], b[7]]),
                units,
            })
        }
        ValueType::Range => {
            let b: [u8; 8] = fixed(bytes, "rangeOfInteger")?;
            Value::Range(Range::new(
                i32::from_be_bytes([b[0], b[1], b[2], b[3]]),
                i32::from_be_bytes([b[4], b[5], b[6], b[7]]),
            ))
        }
        ValueType::TextWithLang => {
            let mut r = Reader::new(bytes);
            let lang = r.string("language").map_err(|e| e.to_string())?;
            let text = r.string("text").map_err(|e| e.to_string())?;
            Value::TextWithLang(TextWithLang { lang, text })
        }
        ValueType::Collection | ValueType::Invalid => return Err(format!("unexpected {tag} value")),
    })
}

/// RFC 2579 DateAndTime, 11 bytes.
fn decode_datetime(b: [u8; 11]) -> std::result::Result<DateTime<FixedOffset>, String> {
    let year = i32::from(u16::from_be_bytes([b[0], b[1]]));
    let offset_secs = (i32::from(b[9]) * 60 + i32::from(b[10])) * 60;
    let offset = match b[8] {
        b'+' => FixedOffset::east_opt(offset_secs),
        b'-' => FixedOffset::west_opt(offset_secs),
        other => return Err(format!("dateTime: bad UTC direction {other:#04x}")),
    }
    .ok_or("dateTime: UTC offset out of range")?;

    NaiveDate::from_ymd_opt(year, u32::from(b[2]), u32::from(b[3]))
        .and_then(|d| d.and_hms_milli_opt(u32::from(b[4]), u32::from(b[5]), u32::from(b[6]), u32::from(b[7]) * 100))
        .and_then(|t| t.and_local_timezone(offset).single())
        .ok_or_else(|| "dateTime: invalid date or time".to_owned())
}

fn encode_datetime(t: &DateTime<FixedOffset>) -> std::result::Result<[u8; 11], String> {
    let year = u16::try_from(t.year()).map_err(|_| format!("dateTime: year {} out of range", t.year()))?;
    let offset = t.offset().local_minus_utc();
    let minutes = offset.unsigned_abs() / 60;
    let [y0, y1] = year.to_be_bytes();

    Ok([
        y0,
        y1,
        t.month() as u8,
        t.day() as u8,
        t.hour() as u8,
        t.minute() as u8,
        t.second() as u8,
        (t.nanosecond() % 1_000_000_000 / 100_000_000) as u8,
        if offset < 0 { b'-' } else { b'+' },
        (minutes / 60) as u8,
        (minutes % 60) as u8,
    ])
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn with_capacity(n: usize) -> Self {
        Self {
            buf: Vec::with_capacity(n),
        }
    }

    fn attribute(&mut self, attr: &Attribute) -> Result<()> {
        if attr.values.is_empty() {
            return Err(malformed(format!("{:?}: attribute has no values", attr.name)));
        }
        for (i, (tag, value)) in attr.values.iter().enumerate() {
            // Additional values have name-length = 0.
            let name = if i == 0 { attr.name.as_str() } else { "" };
            self.value(*tag, name, value)?;
        }
        Ok(())
    }

    fn value(&mut self, tag: Tag, name: &str, value: &Value) -> Result<()> {
        if let Value::Collection(members) = value {
            self.tlv(Tag::BeginCollection, name, &[])?;
            for member in members {
                self.tlv(Tag::MemberName, "", member.name.as_bytes())?;
                for (tag, value) in &member.values {
                    self.value(*tag, "", value)?;
                }
            }
            return self.tlv(Tag::EndCollection, "", &[]);
        }

        let bytes = encode_value(tag, value).map_err(|e| malformed(format!("{name:?}: {e}")))?;
        self.tlv(tag, name, &bytes)
    }

    fn tlv(&mut self, tag: Tag, name: &str, value: &[u8]) -> Result<()> {
        let name_len = u16::try_from(name.len()).map_err(|_| malformed(format!("{name:?}: name too long")))?;
        let value_len =
            u16::try_from(value.len()).map_err(|_| malformed(format!("{name:?}: value longer than 65535 bytes")))?;

        self.buf.push(tag.code());
        self.buf.extend_from_slice(&name_len.to_be_bytes());
        self.buf.extend_from_slice(name.as_bytes());
        self.buf.extend_from_slice(&value_len.to_be_bytes());
        self.buf.extend_from_slice(value);
        Ok(())
    }
}

/// Encode a non-collection value. The value must belong to the tag's
/// family.
fn encode_value(tag: Tag, value: &Value) -> std::result::Result<Vec<u8>, String> {
    let expected = tag.value_type();
    let fits = expected == value.value_type() || (expected == ValueType::Binary && value.value_type() == ValueType::String);
    if !fits || expected == ValueType::Invalid {
        return Err(format!("can't send {} value as {tag}", value.value_type()));
    }

    Ok(match value {
        Value::Void => Vec::new(),
        Value::Integer(v) => v.to_be_bytes().to_vec(),
        Value::Boolean(v) => vec![u8::from(*v)],
        Value::String(s) => s.as_bytes().to_vec(),
        Value::Binary(b) => b.clone(),
        Value::DateTime(t) => encode_datetime(t)?.to_vec(),
        Value::Resolution(r) => {
            let mut out = Vec::with_capacity(9);
            out.extend_from_slice(&r.xres.to_be_bytes());
            out.extend_from_slice(&r.yres.to_be_bytes());
            out.push(r.units.code() as u8);
            out
        }
        Value::Range(r) => {
            let mut out = Vec::with_capacity(8);
            out.extend_from_slice(&r.lower.to_be_bytes());
            out.extend_from_slice(&r.upper.to_be_bytes());
            out
        }
        Value::TextWithLang(t) => {
            let mut out = Vec::with_capacity(4 + t.lang.len() + t.text.len());
            for part in [&t.lang, &t.text] {
                let len = u16::try_from(part.len()).map_err(|_| "textWithLanguage part too long".to_owned())?;
                out.extend_from_slice(&len.to_be_bytes());
                out.extend_from_slice(part.as_bytes());
            }
            out
        }
        Value::Collection(_) => return Err("collection outside of attribute".to_owned()),
    })
}
