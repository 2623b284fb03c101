// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Media collections: "media-col" and friends (PWG 5100.7).

use ippwerk_codec::{IntegerOrRange, Maybe, Record, Schema, ipp_collection, ipp_fields};

/// Media dimensions in hundredths of a millimetre. Printers report
/// custom-size support as ranges, so each dimension is an integer or a
/// range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaSize {
    pub x_dimension: IntegerOrRange,
    pub y_dimension: IntegerOrRange,
}

impl MediaSize {
    /// Fixed size in hundredths of a millimetre.
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x_dimension: IntegerOrRange::Integer(x),
            y_dimension: IntegerOrRange::Integer(y),
        }
    }

    pub fn a4() -> Self {
        Self::new(21000, 29700)
    }

    pub fn letter() -> Self {
        Self::new(21590, 27940)
    }
}

impl Record for MediaSize {
    fn schema(s: &mut Schema<'_, Self>) {
        ipp_fields!(s {
            "x-dimension,(1:MAX)" => x_dimension,
            "y-dimension,(1:MAX)" => y_dimension,
        });
    }
}

/// "media-source-properties" member of a media collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaSourceProperties {
    pub feed_direction: String,
    pub feed_orientation: i32,
}

impl Record for MediaSourceProperties {
    fn schema(s: &mut Schema<'_, Self>) {
        ipp_fields!(s {
            "media-source-feed-direction,keyword" => feed_direction,
            "media-source-feed-orientation,enum(3:6)" => feed_orientation,
        });
    }
}

/// A "media-col" collection. Every member is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaCol {
    pub media_color: Maybe<String>,
    pub media_hole_count: Maybe<i32>,
    pub media_info: Maybe<String>,
    pub media_key: Maybe<String>,
    pub media_size: Maybe<MediaSize>,
    pub media_size_name: Maybe<String>,
    pub media_source: Maybe<String>,
    pub media_source_properties: Maybe<MediaSourceProperties>,
    pub media_type: Maybe<String>,
    pub media_weight_metric: Maybe<i32>,
    pub media_bottom_margin: Maybe<i32>,
    pub media_left_margin: Maybe<i32>,
    pub media_right_margin: Maybe<i32>,
    pub media_top_margin: Maybe<i32>,
}

impl MediaCol {
    /// Collection naming only a size and a type.
    pub fn sized(size: MediaSize, media_type: &str) -> Self {
        Self {
            media_size: Maybe::set(size),
            media_type: Maybe::set(media_type.to_owned()),
            ..Self::default()
        }
    }

    /// Set all four margins at once.
    pub fn with_margins(mut self, margin: i32) -> Self {
        self.media_bottom_margin = Maybe::set(margin);
        self.media_left_margin = Maybe::set(margin);
        self.media_right_margin = Maybe::set(margin);
        self.media_top_margin = Maybe::set(margin);
        self
    }
}

impl Record for MediaCol {
    fn schema(s: &mut Schema<'_, Self>) {
        ipp_fields!(s {
            "media-color,keyword" => media_color,
            "media-hole-count,(0:MAX)" => media_hole_count,
            "media-info,text" => media_info,
            "media-key,keyword" => media_key,
            "media-size" => media_size,
            "media-size-name,keyword" => media_size_name,
            "media-source,keyword" => media_source,
            "media-source-properties" => media_source_properties,
            "media-type,keyword" => media_type,
            "media-weight-metric,(0:MAX)" => media_weight_metric,
            "media-bottom-margin,(0:MAX)" => media_bottom_margin,
            "media-left-margin,(0:MAX)" => media_left_margin,
            "media-right-margin,(0:MAX)" => media_right_margin,
            "media-top-margin,(0:MAX)" => media_top_margin,
        });
    }
}

/// "media-col-database": every media combination the printer knows.
/// Only returned when explicitly requested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaColDatabase {
    pub media_col_database: Vec<MediaCol>,
}

impl Record for MediaColDatabase {
    fn schema(s: &mut Schema<'_, Self>) {
        ipp_fields!(s { "media-col-database" => media_col_database });
    }
}

ipp_collection!(MediaSize, MediaSourceProperties, MediaCol);

#[cfg(test)]
mod tests {
    use super::*;
    use ippwerk_codec::{Attribute, DecodePolicy, Object, Range, Tag, Value};

    fn dims(x: Value, y: Value) -> Vec<Attribute> {
        let tag = |v: &Value| if matches!(v, Value::Range(_)) { Tag::Range } else { Tag::Integer };
        vec![
            Attribute::new("x-dimension", tag(&x), x),
            Attribute::new("y-dimension", tag(&y), y),
        ]
    }

    #[test]
    fn media_size_accepts_integers_and_ranges() {
        let fixed = MediaSize::decode_new(&dims(Value::Integer(21000), Value::Integer(29700)), DecodePolicy::FailFast)
            .expect("fixed size");
        assert_eq!(fixed, MediaSize::a4());

        let custom = MediaSize::decode_new(
            &dims(Value::Range(Range::new(7620, 33020)), Value::Range(Range::new(12700, 50800))),
            DecodePolicy::FailFast,
        )
        .expect("custom size range");
        assert_eq!(custom.x_dimension, IntegerOrRange::Range(Range::new(7620, 33020)));
    }

    #[test]
    fn media_size_rejects_zero_dimension() {
        let err = MediaSize::decode_new(&dims(Value::Integer(0), Value::Integer(29700)), DecodePolicy::FailFast)
            .expect_err("zero width");
        assert!(err.to_string().contains("value 0 out of range 1...2147483647"));

        let err = MediaSize::decode_new(
            &dims(Value::Range(Range::new(0, 100)), Value::Integer(29700)),
            DecodePolicy::FailFast,
        )
        .expect_err("range starting at zero");
        assert!(err.to_string().contains("x-dimension"));
    }

    #[test]
    fn media_col_sends_only_set_members() {
        let col = MediaCol::sized(MediaSize::letter(), "stationery").with_margins(0);
        let attrs = col.encode_attrs().expect("encode");

        let names: Vec<&str> = attrs.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "media-size",
                "media-type",
                "media-bottom-margin",
                "media-left-margin",
                "media-right-margin",
                "media-top-margin"
            ]
        );
        assert!(matches!(attrs[0].values[0], (Tag::BeginCollection, Value::Collection(_))));
    }

    #[test]
    fn media_col_round_trips_nested_collections() {
        let mut col = MediaCol::sized(MediaSize::a4(), "photographic-glossy");
        col.media_source_properties = Maybe::set(MediaSourceProperties {
            feed_direction: "long-edge-first".into(),
            feed_orientation: 3,
        });

        let attrs = col.encode_attrs().expect("encode");
        let back = MediaCol::decode_new(&attrs, DecodePolicy::FailFast).expect("decode");
        assert_eq!(back, col);
    }
}
