// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printer description and status attributes.

use chrono::{DateTime, FixedOffset};
use ippwerk_codec::{
    IntegerOrRange, Maybe, Range, RawAttrs, Record, Resolution, Schema, Version, ipp_fields,
};
use uuid::Uuid;

use crate::job::JobPreset;
use crate::media::{MediaCol, MediaColDatabase, MediaSize};
use crate::values::{Operation, PrinterState, Sides};

/// Printer description and status attributes (RFC 8011 SS5.4,
/// PWG 5100.7 SS6.9, PWG 5100.13 SS6.5-6.6).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrinterDescription {
    pub charset_configured: Maybe<String>,
    pub charset_supported: Vec<String>,
    pub color_supported: Maybe<bool>,
    pub document_format_default: Maybe<String>,
    pub document_format_supported: Vec<String>,
    pub generated_natural_language_supported: Vec<String>,
    pub ipp_versions_supported: Vec<Version>,
    pub job_presets_supported: Vec<JobPreset>,
    pub media_col_default: Maybe<MediaCol>,
    pub media_col_ready: Vec<MediaCol>,
    pub media_size_supported: Vec<MediaSize>,
    pub media_type_supported: Vec<String>,
    pub natural_language_configured: Maybe<String>,
    pub operations_supported: Vec<Operation>,
    pub pages_per_minute: Maybe<i32>,
    pub pages_per_minute_color: Maybe<i32>,
    pub printer_current_time: Maybe<DateTime<FixedOffset>>,
    pub printer_device_id: Maybe<String>,
    pub printer_geo_location: Maybe<String>,
    pub printer_info: Maybe<String>,
    pub printer_is_accepting_jobs: Maybe<bool>,
    pub printer_location: Maybe<String>,
    pub printer_make_and_model: Maybe<String>,
    pub printer_name: Maybe<String>,
    pub printer_state: Maybe<PrinterState>,
    pub printer_state_message: Maybe<String>,
    pub printer_state_reasons: Vec<String>,
    pub printer_up_time: Maybe<i32>,
    pub printer_uri_supported: Vec<String>,
    pub printer_uuid: Maybe<Uuid>,
    pub queued_job_count: Maybe<i32>,
    pub marker_levels: Vec<i32>,
    pub marker_names: Vec<String>,
}

impl Record for PrinterDescription {
    fn schema(s: &mut Schema<'_, Self>) {
        ipp_fields!(s {
            "charset-configured,charset" => charset_configured,
            "charset-supported,1setOf charset" => charset_supported,
            "color-supported" => color_supported,
            "document-format-default,mimeMediaType" => document_format_default,
            "document-format-supported,1setOf mimeMediaType" => document_format_supported,
            "generated-natural-language-supported,1setOf naturalLanguage" => generated_natural_language_supported,
            "ipp-versions-supported" => ipp_versions_supported,
            "job-presets-supported" => job_presets_supported,
            "media-col-default" => media_col_default,
            "media-col-ready" => media_col_ready,
            "media-size-supported" => media_size_supported,
            "media-type-supported,1setOf keyword|name" => media_type_supported,
            "natural-language-configured,naturalLanguage" => natural_language_configured,
            "operations-supported,1setOf enum" => operations_supported,
            "pages-per-minute,integer(0:MAX)" => pages_per_minute,
            "pages-per-minute-color,integer(0:MAX)" => pages_per_minute_color,
            "printer-current-time,dateTime|unknown" => printer_current_time,
            "printer-device-id,text(1023)" => printer_device_id,
            "printer-geo-location,uri|unknown" => printer_geo_location,
            "printer-info,text(127)" => printer_info,
            "printer-is-accepting-jobs" => printer_is_accepting_jobs,
            "printer-location,text(127)" => printer_location,
            "printer-make-and-model,text(127)" => printer_make_and_model,
            "printer-name,name(127)" => printer_name,
            "printer-state" => printer_state,
            "printer-state-message,text" => printer_state_message,
            "printer-state-reasons,1setOf keyword" => printer_state_reasons,
            "printer-up-time,integer(1:MAX)" => printer_up_time,
            "printer-uri-supported,1setOf uri" => printer_uri_supported,
            "printer-uuid,uri" => printer_uuid,
            "queued-job-count,integer(0:MAX)" => queued_job_count,
            "marker-levels,1setOf integer(-3:100)" => marker_levels,
            "marker-names,1setOf name" => marker_names,
        });
    }
}

/// Job template defaults and supported values the printer advertises
/// ("xxx-default" / "xxx-supported", RFC 8011 SS5.2).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobTemplateSupport {
    pub copies_default: Maybe<i32>,
    pub copies_supported: Maybe<Range>,
    pub finishings_default: Vec<i32>,
    pub finishings_supported: Vec<i32>,
    pub job_priority_default: Maybe<i32>,
    pub job_priority_supported: Maybe<i32>,
    pub media_default: Maybe<String>,
    pub media_ready: Vec<String>,
    pub media_supported: Vec<String>,
    pub number_up_default: Maybe<i32>,
    pub number_up_supported: Vec<IntegerOrRange>,
    pub orientation_requested_default: Maybe<i32>,
    pub orientation_requested_supported: Vec<i32>,
    pub output_bin_default: Maybe<String>,
    pub output_bin_supported: Vec<String>,
    pub page_ranges_supported: Maybe<bool>,
    pub print_color_mode_default: Maybe<String>,
    pub print_color_mode_supported: Vec<String>,
    pub print_quality_default: Maybe<i32>,
    pub print_quality_supported: Vec<i32>,
    pub printer_resolution_default: Maybe<Resolution>,
    pub printer_resolution_supported: Vec<Resolution>,
    pub sides_default: Maybe<Sides>,
    pub sides_supported: Vec<Sides>,
}

impl Record for JobTemplateSupport {
    fn schema(s: &mut Schema<'_, Self>) {
        ipp_fields!(s {
            "copies-default,integer(1:MAX)" => copies_default,
            "copies-supported,rangeOfInteger(1:MAX)" => copies_supported,
            "finishings-default,1setOf enum" => finishings_default,
            "finishings-supported,1setOf enum" => finishings_supported,
            "job-priority-default,integer(1:100)" => job_priority_default,
            "job-priority-supported,integer(1:100)" => job_priority_supported,
            "media-default,keyword|name|no-value" => media_default,
            "media-ready,1setOf keyword|name" => media_ready,
            "media-supported,1setOf keyword|name" => media_supported,
            "number-up-default,integer(1:MAX)" => number_up_default,
            "number-up-supported,1setOf integer|rangeOfInteger(1:MAX)" => number_up_supported,
            "orientation-requested-default,enum|no-value" => orientation_requested_default,
            "orientation-requested-supported,1setOf enum" => orientation_requested_supported,
            "output-bin-default,keyword|name" => output_bin_default,
            "output-bin-supported,1setOf keyword|name" => output_bin_supported,
            "page-ranges-supported" => page_ranges_supported,
            "print-color-mode-default,keyword" => print_color_mode_default,
            "print-color-mode-supported,1setOf keyword" => print_color_mode_supported,
            "print-quality-default,enum(3:5)" => print_quality_default,
            "print-quality-supported,1setOf enum(3:5)" => print_quality_supported,
            "printer-resolution-default" => printer_resolution_default,
            "printer-resolution-supported" => printer_resolution_supported,
            "sides-default" => sides_default,
            "sides-supported" => sides_supported,
        });
    }
}

/// Everything a printer reports in its printer attributes group.
/// Attributes with no field here are kept in `raw`.
#[derive(Debug, Default)]
pub struct PrinterAttributes {
    pub raw: RawAttrs,
    pub description: PrinterDescription,
    pub job_template: JobTemplateSupport,
    pub media_col_database: MediaColDatabase,
}

impl PrinterAttributes {
    pub fn is_charset_supported(&self, charset: &str) -> bool {
        self.description
            .charset_supported
            .iter()
            .any(|cs| cs.eq_ignore_ascii_case(charset))
    }

    pub fn is_operation_supported(&self, op: Operation) -> bool {
        self.description.operations_supported.contains(&op)
    }

    /// Highest IPP version the printer claims to support.
    pub fn max_version(&self) -> Option<Version> {
        self.description.ipp_versions_supported.iter().copied().max()
    }
}

impl Record for PrinterAttributes {
    fn schema(s: &mut Schema<'_, Self>) {
        s.raw_attrs(|r| &r.raw, |r| &mut r.raw);
        s.embed(|r| &r.description, |r| &mut r.description);
        s.embed(|r| &r.job_template, |r| &mut r.job_template);
        s.embed(|r| &r.media_col_database, |r| &mut r.media_col_database);
    }
}
