// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Job attributes and the job template settings shared with job presets.

use chrono::{DateTime, FixedOffset};
use ippwerk_codec::{Maybe, Range, RawAttrs, Record, Resolution, Schema, ipp_collection, ipp_fields};

use crate::media::MediaCol;
use crate::values::Sides;

/// Job template settings (RFC 8011 SS5.2, PWG 5100.7 SS6.8). Supplied with
/// a job, or grouped under a name in "job-presets-supported".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobTemplate {
    pub copies: Maybe<i32>,
    pub finishings: Vec<i32>,
    pub job_hold_until: Maybe<String>,
    pub job_priority: Maybe<i32>,
    pub media: Maybe<String>,
    pub media_col: Maybe<MediaCol>,
    pub number_up: Maybe<i32>,
    pub orientation_requested: Maybe<i32>,
    pub output_bin: Maybe<String>,
    pub page_ranges: Vec<Range>,
    pub print_color_mode: Maybe<String>,
    pub print_quality: Maybe<i32>,
    pub print_scaling: Maybe<String>,
    pub printer_resolution: Maybe<Resolution>,
    pub sides: Maybe<Sides>,
}

impl Record for JobTemplate {
    fn schema(s: &mut Schema<'_, Self>) {
        ipp_fields!(s {
            "copies,integer(1:MAX)" => copies,
            "finishings,1setOf enum(3:MAX)" => finishings,
            "job-hold-until,keyword|name" => job_hold_until,
            "job-priority,integer(1:100)" => job_priority,
            "media,keyword|name" => media,
            "media-col" => media_col,
            "number-up,integer(1:MAX)" => number_up,
            "orientation-requested,enum(3:7)" => orientation_requested,
            "output-bin,keyword|name" => output_bin,
            "page-ranges,1setOf rangeOfInteger(1:MAX)" => page_ranges,
            "print-color-mode,keyword" => print_color_mode,
            "print-quality,enum(3:5)" => print_quality,
            "print-scaling,keyword" => print_scaling,
            "printer-resolution" => printer_resolution,
            "sides" => sides,
        });
    }
}

/// Attributes supplied with a job creation request. Attributes this
/// record does not model are kept in `raw`.
#[derive(Debug, Default)]
pub struct JobAttributes {
    pub raw: RawAttrs,
    pub job_name: Maybe<String>,
    pub job_hold_until_time: Maybe<DateTime<FixedOffset>>,
    pub job_account_id: Maybe<String>,
    pub template: JobTemplate,
}

impl Record for JobAttributes {
    fn schema(s: &mut Schema<'_, Self>) {
        s.raw_attrs(|r| &r.raw, |r| &mut r.raw);
        ipp_fields!(s {
            "job-name,name" => job_name,
            "job-hold-until-time,dateTime" => job_hold_until_time,
            "job-account-id,name" => job_account_id,
        });
        s.embed(|r| &r.template, |r| &mut r.template);
    }
}

/// Named set of job template settings ("job-presets-supported").
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobPreset {
    pub preset_category: Maybe<String>,
    pub preset_name: String,
    pub template: JobTemplate,
}

impl Record for JobPreset {
    fn schema(s: &mut Schema<'_, Self>) {
        ipp_fields!(s {
            "preset-category,keyword" => preset_category,
            "!preset-name,keyword|name" => preset_name,
        });
        s.embed(|r| &r.template, |r| &mut r.template);
    }
}

ipp_collection!(JobPreset);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaSize;
    use ippwerk_codec::{Attribute, DecodeErrorKind, DecodePolicy, Object, Tag, Value};

    fn sample_job() -> Vec<Attribute> {
        let mut ranges = Attribute::new("page-ranges", Tag::Range, Value::Range(Range::new(1, 3)));
        ranges.push(Tag::Range, Value::Range(Range::new(7, 7)));

        vec![
            Attribute::new("job-name", Tag::Name, Value::String("quarterly.pdf".into())),
            Attribute::new("copies", Tag::Integer, Value::Integer(2)),
            Attribute::new("sides", Tag::Keyword, Value::String("two-sided-long-edge".into())),
            ranges,
            Attribute::new("print-quality", Tag::Enum, Value::Integer(5)),
            Attribute::new("job-hold-until", Tag::NoValue, Value::Void),
            Attribute::new("x-vendor-tray", Tag::Keyword, Value::String("tray-9".into())),
        ]
    }

    #[test]
    fn decode_job_attributes() {
        let job = JobAttributes::decode_new(&sample_job(), DecodePolicy::FailFast).expect("decode");

        assert_eq!(job.job_name.get().map(String::as_str), Some("quarterly.pdf"));
        assert_eq!(job.template.copies, Maybe::set(2));
        assert_eq!(job.template.sides, Maybe::set(Sides::TwoSidedLongEdge));
        assert_eq!(job.template.page_ranges, vec![Range::new(1, 3), Range::new(7, 7)]);
        assert_eq!(job.template.print_quality, Maybe::set(5));
        assert_eq!(job.template.job_hold_until, Maybe::absent(Tag::NoValue));
        assert!(job.template.media_col.is_unset());
    }

    #[test]
    fn unknown_job_attributes_stay_in_raw_store() {
        let job = JobAttributes::decode_new(&sample_job(), DecodePolicy::FailFast).expect("decode");

        assert_eq!(job.raw.all().len(), 7);
        assert_eq!(
            job.get_attr("x-vendor-tray").and_then(|a| a.first().cloned()),
            Some((Tag::Keyword, Value::String("tray-9".into())))
        );
    }

    #[test]
    fn zero_copies_rejected() {
        let attrs = vec![Attribute::new("copies", Tag::Integer, Value::Integer(0))];
        let err = JobAttributes::decode_new(&attrs, DecodePolicy::FailFast).expect_err("zero copies");

        assert_eq!(err.to_string(), r#"IPP decode JobAttributes: "copies": value 0 out of range 1...2147483647"#);
    }

    #[test]
    fn keep_trying_records_errors() {
        let attrs = vec![
            Attribute::new("copies", Tag::Integer, Value::Integer(0)),
            Attribute::new("print-quality", Tag::Keyword, Value::String("high".into())),
            Attribute::new("job-name", Tag::Name, Value::String("ok".into())),
        ];
        let mut job = JobAttributes::default();
        job.decode_attrs(&attrs, DecodePolicy::KeepTrying).expect("keep trying");

        assert_eq!(job.job_name, Maybe::set("ok".to_owned()));
        assert!(job.template.copies.is_unset());
        let kinds: Vec<&DecodeErrorKind> = job.decode_errors().iter().map(|e| &e.kind).collect();
        assert_eq!(kinds.len(), 2);
        assert!(matches!(kinds[0], DecodeErrorKind::Range { value: 0, .. }));
        assert!(matches!(kinds[1], DecodeErrorKind::TypeMismatch { from: Tag::Keyword, .. }));
    }

    #[test]
    fn presets_embed_the_template() {
        let preset = JobPreset {
            preset_category: Maybe::set("quality".into()),
            preset_name: "best".into(),
            template: JobTemplate {
                print_quality: Maybe::set(5),
                media_col: Maybe::set(MediaCol::sized(MediaSize::a4(), "photographic")),
                ..JobTemplate::default()
            },
        };
        let attrs = preset.encode_attrs().expect("encode");

        let names: Vec<&str> = attrs.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["preset-category", "preset-name", "media-col", "print-quality"]);

        let back = JobPreset::decode_new(&attrs, DecodePolicy::FailFast).expect("decode");
        assert_eq!(back, preset);
    }
}
