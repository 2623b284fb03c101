// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JSON reports printed by the `ippwerk` subcommands.

use serde::Serialize;

use ippwerk_codec::{AttrInfo, Attribute, Conformance, DecodePolicy, Object};
use ippwerk_core::Result;
use ippwerk_print::{GetPrinterAttributesRequest, GroupTag, JobAttributes, Message, PrinterAttributes};

/// Result of `ippwerk dump`.
#[derive(Debug, Serialize)]
pub struct DumpReport {
    pub version: String,
    pub code: u16,
    pub request_id: u32,
    pub groups: Vec<GroupSummary>,
    /// Printer attributes that map onto a record field, as received.
    pub known: Vec<Attribute>,
    /// Names of printer attributes no record field covers.
    pub unknown: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub document_bytes: usize,
}

#[derive(Debug, Serialize)]
pub struct GroupSummary {
    pub tag: GroupTag,
    pub attributes: usize,
}

/// Decode the printer group of `msg` and describe what was found.
pub fn dump(msg: &Message, policy: DecodePolicy) -> Result<DumpReport> {
    let group = msg.require_group(GroupTag::Printer)?;
    let printer = PrinterAttributes::decode_new(&group.attrs, policy)?;
    let codec = PrinterAttributes::codec()?;

    let (known, unknown): (Vec<&Attribute>, Vec<&Attribute>) =
        printer.raw.all().iter().partition(|attr| codec.step(&attr.name).is_some());
    let (warnings, errors): (Vec<_>, Vec<_>) = printer
        .decode_errors()
        .iter()
        .partition(|err| err.kind.is_warning());

    Ok(DumpReport {
        version: msg.version.to_string(),
        code: msg.code,
        request_id: msg.request_id,
        groups: msg
            .groups
            .iter()
            .map(|g| GroupSummary {
                tag: g.tag,
                attributes: g.attrs.len(),
            })
            .collect(),
        known: known.into_iter().cloned().collect(),
        unknown: unknown.into_iter().map(|a| a.name.clone()).collect(),
        errors: errors.iter().map(ToString::to_string).collect(),
        warnings: warnings.iter().map(ToString::to_string).collect(),
        document_bytes: msg.data.len(),
    })
}

/// One attribute in `ippwerk schema` output.
#[derive(Debug, Serialize)]
pub struct SchemaEntry {
    pub name: String,
    pub tag: &'static str,
    pub repeated: bool,
    pub conformance: Conformance,
}

impl From<AttrInfo> for SchemaEntry {
    fn from(info: AttrInfo) -> Self {
        Self {
            name: info.name,
            tag: info.tag.name(),
            repeated: info.repeated,
            conformance: info.conformance,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SchemaReport {
    pub record: &'static str,
    pub attributes: Vec<SchemaEntry>,
}

fn schema_of<R: Object>(record: &'static str) -> Result<SchemaReport> {
    Ok(SchemaReport {
        record,
        attributes: R::known_attrs()?.into_iter().map(SchemaEntry::from).collect(),
    })
}

/// Known attributes of the printer, job and request records.
pub fn schemas() -> Result<Vec<SchemaReport>> {
    Ok(vec![
        schema_of::<PrinterAttributes>("PrinterAttributes")?,
        schema_of::<JobAttributes>("JobAttributes")?,
        schema_of::<GetPrinterAttributesRequest>("GetPrinterAttributesRequest")?,
    ])
}

/// Serialise a report.
pub fn to_json<T: Serialize>(report: &T, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ippwerk_codec::{Tag, Value, Version};
    use ippwerk_core::IppwerkError;

    fn response(printer_attrs: Vec<Attribute>) -> Message {
        let mut msg = Message::new(Version::V2_0, 0, 9);
        msg.add_group(
            GroupTag::Operation,
            vec![Attribute::new("attributes-charset", Tag::Charset, Value::String("utf-8".into()))],
        )
        .add_group(GroupTag::Printer, printer_attrs);
        msg
    }

    #[test]
    fn dump_splits_known_and_unknown() {
        let msg = response(vec![
            Attribute::new("printer-name", Tag::Name, Value::String("Office".into())),
            Attribute::new("x-vendor-secret", Tag::Keyword, Value::String("42".into())),
            Attribute::new("printer-state", Tag::Enum, Value::Integer(3)),
        ]);
        let report = dump(&msg, DecodePolicy::KeepTrying).expect("dump");

        assert_eq!(report.version, "2.0");
        assert_eq!(report.request_id, 9);
        assert_eq!(report.groups.len(), 2);
        assert_eq!(report.groups[1].attributes, 3);
        let known: Vec<&str> = report.known.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(known, ["printer-name", "printer-state"]);
        assert_eq!(report.unknown, ["x-vendor-secret"]);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn dump_separates_warnings() {
        let mut name = Attribute::new("printer-name", Tag::Name, Value::String("a".into()));
        name.push(Tag::Name, Value::String("b".into()));
        let msg = response(vec![
            name,
            Attribute::new("printer-state", Tag::Keyword, Value::String("idle".into())),
        ]);
        let report = dump(&msg, DecodePolicy::KeepTrying).expect("dump");

        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("1 value expected, 2 present"));
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("printer-state"));
    }

    #[test]
    fn dump_fail_fast_propagates() {
        let msg = response(vec![Attribute::new("printer-state", Tag::Keyword, Value::String("idle".into()))]);
        let err = dump(&msg, DecodePolicy::FailFast).expect_err("fail fast");
        assert!(matches!(err, IppwerkError::Decode(_)));
    }

    #[test]
    fn dump_needs_printer_group() {
        let msg = Message::new(Version::V1_1, 0, 1);
        assert!(matches!(dump(&msg, DecodePolicy::KeepTrying), Err(IppwerkError::MissingGroup(_))));
    }

    #[test]
    fn schema_lists_records() {
        let schemas = schemas().expect("schemas");
        assert_eq!(schemas.len(), 3);

        let printer = &schemas[0];
        let name = printer
            .attributes
            .iter()
            .find(|e| e.name == "printer-name")
            .expect("printer-name listed");
        assert_eq!(name.tag, "nameWithoutLanguage");
        assert!(!name.repeated);

        let json = to_json(&schemas, false).expect("json");
        assert!(json.contains(r#""record":"JobAttributes""#));
    }
}
