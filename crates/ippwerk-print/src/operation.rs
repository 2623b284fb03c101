// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Operation attributes and the Get-Printer-Attributes exchange.
//
// Requests and responses are records whose IPP fields make up the
// operation attributes group. The message header (version, request id,
// operation or status code) lives in plain fields next to them.

use std::collections::HashSet;

use ippwerk_codec::{
    Attribute, DecodePolicy, Maybe, Object, RawAttrs, Record, Schema, Tag, Value, Version, ipp_fields,
};
use ippwerk_core::Result;
use tracing::debug;

use crate::message::{GroupTag, Message, STATUS_OK, STATUS_OK_IGNORED_OR_SUBSTITUTED};
use crate::printer::{JobTemplateSupport, PrinterAttributes};
use crate::values::Operation;

/// Name of the operation attribute listing the requested attributes.
pub const ATTR_REQUESTED_ATTRIBUTES: &str = "requested-attributes";

/// Standard attribute group names for "requested-attributes".
pub const REQUESTED_ALL: &str = "all";
pub const REQUESTED_JOB_TEMPLATE: &str = "job-template";
pub const REQUESTED_PRINTER_DESCRIPTION: &str = "printer-description";
/// Not included in "all"; printers only return it on explicit request.
pub const REQUESTED_MEDIA_COL_DATABASE: &str = "media-col-database";

/// Attributes that open every operation group (RFC 8011 SS4.1.4).
#[derive(Debug, Clone, PartialEq)]
pub struct OperationAttributes {
    pub attributes_charset: String,
    pub attributes_natural_language: String,
}

impl Default for OperationAttributes {
    fn default() -> Self {
        Self {
            attributes_charset: "utf-8".into(),
            attributes_natural_language: "en-us".into(),
        }
    }
}

impl Record for OperationAttributes {
    fn schema(s: &mut Schema<'_, Self>) {
        ipp_fields!(s {
            "!attributes-charset,charset" => attributes_charset,
            "!attributes-natural-language,naturalLanguage" => attributes_natural_language,
        });
    }
}

// ---------------------------------------------------------------------------
// Get-Printer-Attributes request
// ---------------------------------------------------------------------------

/// Get-Printer-Attributes request (operation 0x000B).
#[derive(Debug, Default)]
pub struct GetPrinterAttributesRequest {
    pub version: Version,
    pub request_id: u32,

    pub raw: RawAttrs,
    pub operation: OperationAttributes,
    pub printer_uri: String,
    pub requesting_user_name: Maybe<String>,
    pub requested_attributes: Vec<String>,
    pub document_format: Maybe<String>,
}

impl Record for GetPrinterAttributesRequest {
    fn schema(s: &mut Schema<'_, Self>) {
        s.raw_attrs(|r| &r.raw, |r| &mut r.raw);
        s.embed(|r| &r.operation, |r| &mut r.operation);
        ipp_fields!(s {
            "!printer-uri,uri" => printer_uri,
            "requesting-user-name,name" => requesting_user_name,
            "requested-attributes,1setOf keyword" => requested_attributes,
            "document-format,mimeMediaType" => document_format,
        });
    }
}

impl GetPrinterAttributesRequest {
    pub fn new(printer_uri: &str, request_id: u32) -> Self {
        Self {
            version: Version::V2_0,
            request_id,
            printer_uri: printer_uri.to_owned(),
            ..Self::default()
        }
    }

    pub fn op() -> Operation {
        Operation::GET_PRINTER_ATTRIBUTES
    }

    /// Resolve "requested-attributes" against the attributes a printer
    /// has. Group keywords expand to their members, and an empty list
    /// selects "all". Names that are neither a group nor one of
    /// `supported` are collected as unsupported, once each.
    pub fn select(&self, supported: &[Attribute]) -> Result<AttrSelection> {
        let job_template: HashSet<String> = JobTemplateSupport::known_attrs()?.into_iter().map(|a| a.name).collect();
        let all = supported
            .iter()
            .map(|a| a.name.as_str())
            .filter(|name| *name != REQUESTED_MEDIA_COL_DATABASE);

        let requested: Vec<&str> = if self.requested_attributes.is_empty() {
            vec![REQUESTED_ALL]
        } else {
            self.requested_attributes.iter().map(String::as_str).collect()
        };

        let mut selection = AttrSelection::default();
        for name in requested {
            match name {
                REQUESTED_ALL => selection.extend(all.clone()),
                REQUESTED_JOB_TEMPLATE => selection.extend(all.clone().filter(|n| job_template.contains(*n))),
                REQUESTED_PRINTER_DESCRIPTION => {
                    selection.extend(all.clone().filter(|n| !job_template.contains(*n)));
                }
                _ if supported.iter().any(|a| a.name == name) => selection.extend([name]),
                _ if !selection.unsupported.iter().any(|u| u == name) => selection.unsupported.push(name.to_owned()),
                _ => {}
            }
        }
        Ok(selection)
    }

    pub fn encode(&self) -> Result<Message> {
        let mut msg = Message::new(self.version, Self::op().0, self.request_id);
        msg.add_group(GroupTag::Operation, self.encode_attrs()?);
        Ok(msg)
    }

    pub fn decode(msg: &Message, policy: DecodePolicy) -> Result<Self> {
        let op = msg.require_group(GroupTag::Operation)?;

        let mut rq = Self::default();
        rq.decode_attrs(&op.attrs, policy)?;
        rq.version = msg.version;
        rq.request_id = msg.request_id;
        Ok(rq)
    }
}

/// Printer attributes picked by a request's "requested-attributes".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrSelection {
    names: HashSet<String>,
    /// Requested names the printer does not support, in request order.
    pub unsupported: Vec<String>,
}

impl AttrSelection {
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    fn extend<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        self.names.extend(names.into_iter().map(str::to_owned));
    }
}

// ---------------------------------------------------------------------------
// Get-Printer-Attributes response
// ---------------------------------------------------------------------------

/// Get-Printer-Attributes response.
#[derive(Debug, Default)]
pub struct GetPrinterAttributesResponse {
    pub version: Version,
    pub request_id: u32,
    pub status: u16,

    pub raw: RawAttrs,
    pub operation: OperationAttributes,
    pub status_message: Maybe<String>,

    /// Requested attributes the printer does not support.
    pub unsupported_attributes: Vec<String>,
    pub printer: Option<PrinterAttributes>,
}

impl Record for GetPrinterAttributesResponse {
    fn schema(s: &mut Schema<'_, Self>) {
        s.raw_attrs(|r| &r.raw, |r| &mut r.raw);
        s.embed(|r| &r.operation, |r| &mut r.operation);
        ipp_fields!(s { "status-message,text(255)" => status_message });
    }
}

impl GetPrinterAttributesResponse {
    /// Successful response to `rq`.
    pub fn ok(rq: &GetPrinterAttributesRequest, printer: PrinterAttributes) -> Self {
        Self {
            version: rq.version,
            request_id: rq.request_id,
            status: STATUS_OK,
            operation: rq.operation.clone(),
            printer: Some(printer),
            ..Self::default()
        }
    }

    /// Answer `rq` from `printer`. Only the selected attributes go into the
    /// printer group. Unsupported names are listed in their own group and
    /// downgrade the status to "ok, ignored or substituted".
    pub fn answer(rq: &GetPrinterAttributesRequest, printer: &PrinterAttributes) -> Result<Message> {
        let attrs = printer.encode_attrs()?;
        let selection = rq.select(&attrs)?;

        let status = if selection.unsupported.is_empty() {
            STATUS_OK
        } else {
            STATUS_OK_IGNORED_OR_SUBSTITUTED
        };
        let rsp = Self {
            version: rq.version,
            request_id: rq.request_id,
            status,
            operation: rq.operation.clone(),
            unsupported_attributes: selection.unsupported.clone(),
            ..Self::default()
        };

        let returned: Vec<Attribute> = attrs.into_iter().filter(|a| selection.contains(&a.name)).collect();
        debug!(
            request_id = rq.request_id,
            returned = returned.len(),
            unsupported = selection.unsupported.len(),
            "answering Get-Printer-Attributes"
        );

        let mut msg = rsp.encode()?;
        msg.add_group(GroupTag::Printer, returned);
        Ok(msg)
    }

    pub fn encode(&self) -> Result<Message> {
        let mut msg = Message::new(self.version, self.status, self.request_id);
        msg.add_group(GroupTag::Operation, self.encode_attrs()?);

        if !self.unsupported_attributes.is_empty() {
            let values = self
                .unsupported_attributes
                .iter()
                .map(|name| (Tag::Keyword, Value::String(name.clone())))
                .collect();
            msg.add_group(
                GroupTag::Unsupported,
                vec![Attribute::with_values(ATTR_REQUESTED_ATTRIBUTES, values)],
            );
        }

        if let Some(printer) = &self.printer {
            msg.add_group(GroupTag::Printer, printer.encode_attrs()?);
        }
        Ok(msg)
    }

    /// Decode a response. The printer attributes group is required.
    pub fn decode(msg: &Message, policy: DecodePolicy) -> Result<Self> {
        let op = msg.require_group(GroupTag::Operation)?;
        let printer = msg.require_group(GroupTag::Printer)?;

        let mut rsp = Self::default();
        rsp.decode_attrs(&op.attrs, policy)?;
        rsp.version = msg.version;
        rsp.request_id = msg.request_id;
        rsp.status = msg.code;
        rsp.printer = Some(PrinterAttributes::decode_new(&printer.attrs, policy)?);

        if let Some(unsupported) = msg.group(GroupTag::Unsupported) {
            rsp.unsupported_attributes = unsupported_names(&unsupported.attrs);
        }

        debug!(
            request_id = rsp.request_id,
            status = rsp.status,
            unsupported = rsp.unsupported_attributes.len(),
            "decoded Get-Printer-Attributes response"
        );
        Ok(rsp)
    }
}

/// Names listed in an unsupported-attributes group. Printers either echo
/// "requested-attributes" with the offending names as values, or send
/// each offending attribute with an out-of-band value.
fn unsupported_names(attrs: &[Attribute]) -> Vec<String> {
    let mut names = Vec::new();
    for attr in attrs {
        if attr.name == ATTR_REQUESTED_ATTRIBUTES {
            names.extend(attr.values.iter().filter_map(|(_, v)| match v {
                Value::String(s) => Some(s.clone()),
                _ => None,
            }));
        } else {
            names.push(attr.name.clone());
        }
    }
    names
}
