// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Records shared by the unit tests.

use chrono::{DateTime, FixedOffset};
use ippwerk_core::{IntegerOrRange, Range, Resolution, TextWithLang, Version};
use uuid::Uuid;

use crate::dispatch::{EnumValue, KeywordValue};
use crate::maybe::Maybe;
use crate::raw::RawAttrs;
use crate::schema::{Record, Schema};
use crate::{ipp_collection, ipp_enum, ipp_fields, ipp_keyword};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scenario {
    pub fld_boolean_f: bool,
    pub fld_integer: i32,
    pub fld_integer_slice: Vec<i32>,
}

impl Record for Scenario {
    fn schema(s: &mut Schema<'_, Self>) {
        ipp_fields!(s {
            "fld-boolean-f" => fld_boolean_f,
            "fld-integer" => fld_integer,
            "fld-integer-slice" => fld_integer_slice,
        });
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaSize {
    pub x_dimension: i32,
    pub y_dimension: i32,
}

impl Record for MediaSize {
    fn schema(s: &mut Schema<'_, Self>) {
        ipp_fields!(s {
            "x-dimension,integer(0:MAX)" => x_dimension,
            "y-dimension,integer(0:MAX)" => y_dimension,
        });
    }
}

ipp_collection!(MediaSize);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaDatabase {
    pub media_size_supported: Vec<MediaSize>,
}

impl MediaDatabase {
    pub fn letter_and_a4() -> Self {
        Self {
            media_size_supported: vec![
                MediaSize {
                    x_dimension: 21590,
                    y_dimension: 27940,
                },
                MediaSize {
                    x_dimension: 21000,
                    y_dimension: 29700,
                },
            ],
        }
    }
}

impl Record for MediaDatabase {
    fn schema(s: &mut Schema<'_, Self>) {
        ipp_fields!(s { "media-size-supported" => media_size_supported });
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bounded {
    pub job_priority: i32,
    pub job_hold_until: Option<String>,
}

impl Record for Bounded {
    fn schema(s: &mut Schema<'_, Self>) {
        ipp_fields!(s {
            "job-priority,integer(1:100)" => job_priority,
            "job-hold-until,keyword|no-value" => job_hold_until,
        });
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateMessage {
    pub printer_state_message: String,
}

impl Record for StateMessage {
    fn schema(s: &mut Schema<'_, Self>) {
        ipp_fields!(s {
            "printer-state-message,text|unknown" => printer_state_message,
        });
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Optionals {
    pub printer_info: Maybe<String>,
    pub printer_location: Maybe<String>,
    pub job_password: Option<String>,
}

impl Record for Optionals {
    fn schema(s: &mut Schema<'_, Self>) {
        ipp_fields!(s {
            "?printer-info,text" => printer_info,
            "?printer-location,text" => printer_location,
            "?job-password,octetString" => job_password,
        });
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inner {
    pub a: i32,
    pub b: String,
}

impl Record for Inner {
    fn schema(s: &mut Schema<'_, Self>) {
        ipp_fields!(s {
            "inner-a" => a,
            "inner-b" => b,
        });
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outer {
    pub first: i32,
    pub inner: Inner,
    pub last: bool,
}

impl Record for Outer {
    fn schema(s: &mut Schema<'_, Self>) {
        ipp_fields!(s { "outer-first" => first });
        s.embed(|r| &r.inner, |r| &mut r.inner);
        ipp_fields!(s { "outer-last" => last });
    }
}

#[derive(Debug, Default)]
pub struct WithRaw {
    pub copies: i32,
    pub pages: i32,
    pub raw: RawAttrs,
}

impl Record for WithRaw {
    fn schema(s: &mut Schema<'_, Self>) {
        ipp_fields!(s {
            "copies,integer(1:MAX)" => copies,
            "pages" => pages,
        });
        s.raw_attrs(|r| &r.raw, |r| &mut r.raw);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct State(pub i32);

impl EnumValue for State {
    fn to_i32(self) -> i32 {
        self.0
    }

    fn from_i32(v: i32) -> Self {
        State(v)
    }
}

ipp_enum!(State);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ColorMode {
    #[default]
    Auto,
    Monochrome,
    Other(String),
}

impl KeywordValue for ColorMode {
    fn as_keyword(&self) -> &str {
        match self {
            ColorMode::Auto => "auto",
            ColorMode::Monochrome => "monochrome",
            ColorMode::Other(s) => s,
        }
    }

    fn from_keyword(s: &str) -> Self {
        match s {
            "auto" => ColorMode::Auto,
            "monochrome" => ColorMode::Monochrome,
            other => ColorMode::Other(other.to_owned()),
        }
    }
}

ipp_keyword!(ColorMode);

/// One field of every shape and scalar kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Everything {
    pub flag: bool,
    pub count: u16,
    pub name: String,
    pub version: Version,
    pub uuid: Uuid,
    pub when: DateTime<FixedOffset>,
    pub resolution: Resolution,
    pub range: Range,
    pub greeting: TextWithLang,
    pub pages: Vec<IntegerOrRange>,
    pub state: State,
    pub color: Vec<ColorMode>,
    pub levels: Vec<i32>,
    pub size: MediaSize,
    pub sizes: Vec<MediaSize>,
    pub info: Maybe<String>,
    pub note: Option<String>,
    pub secret: Option<String>,
}

impl Everything {
    pub fn sample() -> Self {
        Self {
            flag: true,
            count: 65535,
            name: "report.pdf".into(),
            version: Version::V2_0,
            uuid: Uuid::from_u128(0x4509_a320_00a0_008f_00b6_0025_0751_0eca),
            when: DateTime::parse_from_rfc3339("2026-03-01T10:20:30+03:00").unwrap_or_default(),
            resolution: Resolution::dpi(600, 300),
            range: Range::new(1, 99),
            greeting: TextWithLang {
                lang: "en-us".into(),
                text: "hello".into(),
            },
            pages: vec![IntegerOrRange::Integer(1), IntegerOrRange::Range(Range::new(3, 5))],
            state: State(4),
            color: vec![ColorMode::Monochrome, ColorMode::Other("process-monochrome".into())],
            levels: vec![3, 4],
            size: MediaSize {
                x_dimension: 10,
                y_dimension: 20,
            },
            sizes: MediaDatabase::letter_and_a4().media_size_supported,
            info: Maybe::set("front desk".into()),
            note: Some("note".into()),
            secret: Some("hunter2".into()),
        }
    }
}

impl Record for Everything {
    fn schema(s: &mut Schema<'_, Self>) {
        ipp_fields!(s {
            "flag" => flag,
            "count" => count,
            "job-name,name" => name,
            "ipp-version,keyword" => version,
            "printer-uuid,uri" => uuid,
            "when,dateTime" => when,
            "printer-resolution" => resolution,
            "copies-supported" => range,
            "greeting" => greeting,
            "pages,integer|rangeOfInteger" => pages,
            "printer-state" => state,
            "print-color-mode" => color,
            "levels,1setOf enum" => levels,
            "media-size" => size,
            "media-size-supported" => sizes,
            "printer-info" => info,
            "note,text" => note,
            "secret,octetString" => secret,
        });
    }
}
