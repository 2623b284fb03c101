// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Attributes -> record.
//
// A Decoder carries the state of one decode: the attribute path used in
// diagnostics and the errors collected under `DecodePolicy::KeepTrying`.
// It is borrowed mutably for the whole call, so one decode is in flight
// per Decoder.

use std::collections::HashMap;

use ippwerk_core::{Attribute, Attributes, DecodeError, DecodeErrorKind, DecodePolicy, Tag, Value};
use tracing::warn;

use crate::codec::{Bounds, Codec, CodecStep};
use crate::maybe::Maybe;
use crate::raw::dedup;
use crate::schema::{ElementMethods, Record, ShapeMut};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Name(String),
    Index(usize),
}

/// Decoding state for one call.
#[derive(Debug)]
pub struct Decoder {
    policy: DecodePolicy,
    record: &'static str,
    path: Vec<Segment>,
    errors: Vec<DecodeError>,
}

impl Decoder {
    pub fn new(policy: DecodePolicy) -> Self {
        Self {
            policy,
            record: "",
            path: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn policy(&self) -> DecodePolicy {
        self.policy
    }

    /// Errors and warnings collected so far.
    pub fn errors(&self) -> &[DecodeError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<DecodeError> {
        self.errors
    }

    /// Decode `attrs` into `obj`.
    ///
    /// Attributes are applied in step order. Duplicate names keep their
    /// first occurrence; names the codec does not know are kept only in
    /// the record's raw store. On success the raw store (if any) receives
    /// the deduplicated input and every error recorded along the way.
    pub fn decode<R: Record>(&mut self, codec: &Codec<R>, obj: &mut R, attrs: &[Attribute]) -> Result<(), DecodeError> {
        self.record = codec.record();
        self.path.clear();

        let attrs = dedup(attrs);
        let mark = self.errors.len();
        self.decode_steps(codec, obj, &attrs)?;

        let errors = self.errors_since(mark);
        if let Some(first) = errors.first() {
            warn!(
                record = self.record,
                errors = errors.len(),
                first = %first,
                "IPP decode completed with errors"
            );
        }
        if let Some(raw) = codec.raw_mut(obj) {
            raw.save(attrs, errors);
        }
        Ok(())
    }

    /// Decode one attribute into `obj` and record it in the raw store.
    /// Attributes the codec does not know only go to the raw store.
    pub fn decode_single<R: Record>(&mut self, codec: &Codec<R>, obj: &mut R, attr: &Attribute) -> Result<(), DecodeError> {
        self.record = codec.record();
        self.path.clear();

        if let Some(step) = codec.step(&attr.name) {
            self.path.push(Segment::Name(attr.name.clone()));
            let result = self.decode_step(step, obj, &attr.values);
            self.path.pop();
            result?;
        }

        if let Some(raw) = codec.raw_mut(obj) {
            raw.put(attr.clone());
        }
        Ok(())
    }

    // -- Internals --

    /// Error located at the current path.
    pub(crate) fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError {
            record: self.record,
            path: self.path_string(),
            kind,
        }
    }

    /// Decode a nested record from the members of a collection value.
    pub(crate) fn decode_collection<E: Record>(&mut self, codec: &Codec<E>, attrs: &[Attribute]) -> Result<E, DecodeError> {
        let attrs = dedup(attrs);
        let mark = self.errors.len();
        let mut obj = E::default();
        self.decode_steps(codec, &mut obj, &attrs)?;

        let errors = self.errors_since(mark);
        if let Some(raw) = codec.raw_mut(&mut obj) {
            raw.save(attrs, errors);
        }
        Ok(obj)
    }

    pub(crate) fn decode_shape<E>(
        &mut self,
        shape: ShapeMut<'_, E>,
        m: &ElementMethods<E>,
        bounds: Bounds,
        zero_tag: Tag,
        values: &[(Tag, Value)],
    ) -> Result<(), DecodeError>
    where
        E: Default,
    {
        let first = values.first().map_or(Tag::Zero, |(tag, _)| *tag);

        if first.is_out_of_band() {
            match shape {
                ShapeMut::Maybe(field) => *field = Maybe::absent(first),
                ShapeMut::Optional(field) => *field = None,
                ShapeMut::Repeated(field) => field.clear(),
                ShapeMut::Single(field) if zero_tag != Tag::Zero => *field = E::default(),
                ShapeMut::Single(_) => {
                    return Err(self.error(DecodeErrorKind::TypeMismatch {
                        from: first,
                        to: m.default_tag.value_type(),
                    }));
                }
            }
            return Ok(());
        }

        match shape {
            ShapeMut::Repeated(field) => *field = self.decode_each(m, bounds, values)?,
            ShapeMut::Single(field) => *field = self.decode_one(m, bounds, values)?.unwrap_or_default(),
            ShapeMut::Maybe(field) => {
                *field = self.decode_one(m, bounds, values)?.map_or_else(Maybe::default, Maybe::set);
            }
            ShapeMut::Optional(field) => *field = self.decode_one(m, bounds, values)?,
        }
        Ok(())
    }

    fn decode_steps<R>(&mut self, codec: &Codec<R>, obj: &mut R, attrs: &Attributes) -> Result<(), DecodeError> {
        let by_name: HashMap<&str, &Attribute> = attrs.iter().map(|a| (a.name.as_str(), a)).collect();

        for step in codec.steps() {
            let Some(attr) = by_name.get(step.name()) else {
                continue;
            };

            self.path.push(Segment::Name(step.name().to_owned()));
            let result = self.decode_step(step, obj, &attr.values);
            self.path.pop();

            if let Err(err) = result {
                self.recover(err)?;
                (step.zero)(obj);
            }
        }
        Ok(())
    }

    fn decode_step<R>(&mut self, step: &CodecStep<R>, obj: &mut R, values: &[(Tag, Value)]) -> Result<(), DecodeError> {
        if values.is_empty() {
            return Err(self.error(DecodeErrorKind::NoValues));
        }
        if !step.is_repeated() && values.len() > 1 {
            let warning = self.error(DecodeErrorKind::TooManyValues(values.len()));
            self.errors.push(warning);
        }
        (step.decode)(self, obj, values)
    }

    /// Decode a value list into a single element. With several values
    /// each is decoded (so bad ones are reported) and the first good one
    /// wins.
    fn decode_one<E>(&mut self, m: &ElementMethods<E>, bounds: Bounds, values: &[(Tag, Value)]) -> Result<Option<E>, DecodeError> {
        if let [(tag, value)] = values {
            return self.decode_value(m, bounds, *tag, value).map(Some);
        }

        let mut found = None;
        for (i, (tag, value)) in values.iter().enumerate() {
            self.path.push(Segment::Index(i));
            let result = self.decode_value(m, bounds, *tag, value);
            self.path.pop();

            match result {
                Ok(e) => {
                    found.get_or_insert(e);
                }
                Err(err) => self.recover(err)?,
            }
        }
        Ok(found)
    }

    /// Decode every value; under KeepTrying failing elements are skipped.
    fn decode_each<E>(&mut self, m: &ElementMethods<E>, bounds: Bounds, values: &[(Tag, Value)]) -> Result<Vec<E>, DecodeError> {
        let mut out = Vec::with_capacity(values.len());
        for (i, (tag, value)) in values.iter().enumerate() {
            self.path.push(Segment::Index(i));
            let result = self.decode_value(m, bounds, *tag, value);
            self.path.pop();

            match result {
                Ok(e) => out.push(e),
                Err(err) => self.recover(err)?,
            }
        }
        Ok(out)
    }

    fn decode_value<E>(&mut self, m: &ElementMethods<E>, bounds: Bounds, tag: Tag, value: &Value) -> Result<E, DecodeError> {
        bounds.check(value).map_err(|kind| self.error(kind))?;
        (m.decode)(self, tag, value)
    }

    /// Apply the policy to a failed step or element.
    fn recover(&mut self, err: DecodeError) -> Result<(), DecodeError> {
        match self.policy {
            DecodePolicy::FailFast => Err(err),
            DecodePolicy::KeepTrying => {
                self.errors.push(err);
                Ok(())
            }
        }
    }

    fn errors_since(&self, mark: usize) -> Vec<DecodeError> {
        self.errors.get(mark..).map(<[DecodeError]>::to_vec).unwrap_or_default()
    }

    fn path_string(&self) -> String {
        let mut path = String::new();
        for segment in &self.path {
            match segment {
                Segment::Name(name) => {
                    if !path.is_empty() {
                        path.push('/');
                    }
                    path.push_str(name);
                }
                Segment::Index(i) => path.push_str(&format!("[{i}]")),
            }
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use crate::registry::CodecRegistry;

    fn int(name: &str, v: i32) -> Attribute {
        Attribute::new(name, Tag::Integer, Value::Integer(v))
    }

    fn scenario_attrs() -> Attributes {
        let mut slice = int("fld-integer-slice", 1);
        slice.push(Tag::Integer, Value::Integer(2)).push(Tag::Integer, Value::Integer(3));
        vec![
            Attribute::new("fld-boolean-f", Tag::Boolean, Value::Boolean(false)),
            int("fld-integer", 1234),
            slice,
        ]
    }

    #[test]
    fn scenario_decodes_and_reencodes() {
        let codec = CodecRegistry::new().codec::<Scenario>().expect("codec");
        let mut obj = Scenario {
            fld_boolean_f: true,
            ..Scenario::default()
        };

        codec.decode(&mut obj, &scenario_attrs(), DecodePolicy::FailFast).expect("decode should succeed");

        assert_eq!(
            obj,
            Scenario {
                fld_boolean_f: false,
                fld_integer: 1234,
                fld_integer_slice: vec![1, 2, 3],
            }
        );
        assert_eq!(codec.encode(&obj), scenario_attrs());
    }

    #[test]
    fn media_sizes_keep_count_and_order() {
        let codec = CodecRegistry::new().codec::<MediaDatabase>().expect("codec");
        let original = MediaDatabase::letter_and_a4();
        let attrs = codec.encode(&original);

        let mut decoded = MediaDatabase::default();
        codec.decode(&mut decoded, &attrs, DecodePolicy::FailFast).expect("decode should succeed");

        assert_eq!(decoded, original);
        assert_eq!(codec.encode(&decoded), attrs);
    }

    #[test]
    fn round_trip_covers_every_shape() {
        let codec = CodecRegistry::new().codec::<Everything>().expect("codec");
        let original = Everything::sample();

        let mut decoded = Everything::default();
        codec
            .decode(&mut decoded, &codec.encode(&original), DecodePolicy::FailFast)
            .expect("decode should succeed");
        assert_eq!(decoded, original);
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let codec = CodecRegistry::new().codec::<Scenario>().expect("codec");
        let mut with_dup = scenario_attrs();
        with_dup.push(int("fld-integer", 9999));

        let mut a = Scenario::default();
        let mut b = Scenario::default();
        codec.decode(&mut a, &with_dup, DecodePolicy::FailFast).expect("decode");
        codec.decode(&mut b, &scenario_attrs(), DecodePolicy::FailFast).expect("decode");

        assert_eq!(a, b);
        assert_eq!(a.fld_integer, 1234);
    }

    #[test]
    fn out_of_band_reason_survives_round_trip() {
        let codec = CodecRegistry::new().codec::<Optionals>().expect("codec");

        for reason in [Tag::Unknown, Tag::NoValue, Tag::Unsupported] {
            let original = Optionals {
                printer_info: Maybe::absent(reason),
                ..Optionals::default()
            };
            let mut decoded = Optionals {
                printer_info: Maybe::set("stale".into()),
                ..Optionals::default()
            };
            codec
                .decode(&mut decoded, &codec.encode(&original), DecodePolicy::FailFast)
                .expect("decode should succeed");

            assert_eq!(decoded.printer_info.reason(), Some(reason));
            assert_eq!(decoded.printer_info, original.printer_info);
        }
    }

    #[test]
    fn out_of_band_clears_other_shapes() {
        let codec = CodecRegistry::new().codec::<Bounded>().expect("codec");
        let mut obj = Bounded {
            job_priority: 50,
            job_hold_until: Some("indefinite".into()),
        };

        codec
            .decode(&mut obj, &[Attribute::out_of_band("job-hold-until", Tag::NoValue)], DecodePolicy::FailFast)
            .expect("decode should succeed");
        assert_eq!(obj.job_hold_until, None);

        let err = codec
            .decode(&mut obj, &[Attribute::out_of_band("job-priority", Tag::Unknown)], DecodePolicy::FailFast)
            .expect_err("bare field without zero tag");
        assert_eq!(err.to_string(), r#"IPP decode Bounded: "job-priority": can't convert unknown to Integer"#);
    }

    #[test]
    fn out_of_band_resets_bare_field_with_zero_tag() {
        let codec = CodecRegistry::new().codec::<StateMessage>().expect("codec");

        // A bare field always has a value, so the zero tag never goes out.
        let empty = codec.encode(&StateMessage::default());
        assert_eq!(empty, [Attribute::new("printer-state-message", Tag::Text, Value::String(String::new()))]);

        // Coming in, the out-of-band value resets the field and the reason
        // is lost.
        let mut obj = StateMessage {
            printer_state_message: "toner low".into(),
        };
        codec
            .decode(&mut obj, &[Attribute::out_of_band("printer-state-message", Tag::Unknown)], DecodePolicy::FailFast)
            .expect("decode should succeed");
        assert_eq!(obj, StateMessage::default());
        assert_eq!(codec.encode(&obj), empty);
    }

    #[test]
    fn range_is_inclusive() {
        let codec = CodecRegistry::new().codec::<Bounded>().expect("codec");

        for ok in [1, 100] {
            let mut obj = Bounded::default();
            codec
                .decode(&mut obj, &[int("job-priority", ok)], DecodePolicy::FailFast)
                .expect("bound value should decode");
            assert_eq!(obj.job_priority, ok);
        }

        for bad in [0, 101] {
            let mut obj = Bounded::default();
            let err = codec
                .decode(&mut obj, &[int("job-priority", bad)], DecodePolicy::FailFast)
                .expect_err("out of range");
            assert_eq!(
                err.kind,
                DecodeErrorKind::Range {
                    value: i64::from(bad),
                    min: 1,
                    max: 100
                }
            );
        }
    }

    #[test]
    fn keep_trying_zeroes_only_the_bad_step() {
        let codec = CodecRegistry::new().codec::<Scenario>().expect("codec");
        let mut attrs = scenario_attrs();
        attrs[1] = Attribute::new("fld-integer", Tag::Keyword, Value::String("lots".into()));

        let mut obj = Scenario {
            fld_integer: 77,
            ..Scenario::default()
        };
        let mut dec = Decoder::new(DecodePolicy::KeepTrying);
        dec.decode(&codec, &mut obj, &attrs).expect("keep trying succeeds");

        assert!(!obj.fld_boolean_f);
        assert_eq!(obj.fld_integer, 0);
        assert_eq!(obj.fld_integer_slice, vec![1, 2, 3]);

        let errors = dec.into_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "fld-integer");
        assert!(errors[0].path.contains("fld-integer"));
    }

    #[test]
    fn fail_fast_returns_first_error() {
        let codec = CodecRegistry::new().codec::<Scenario>().expect("codec");
        let mut attrs = scenario_attrs();
        attrs[0] = int("fld-boolean-f", 1);
        attrs[1] = Attribute::new("fld-integer", Tag::Keyword, Value::String("lots".into()));

        let mut obj = Scenario::default();
        let err = codec.decode(&mut obj, &attrs, DecodePolicy::FailFast).expect_err("fail fast");
        assert_eq!(err.path, "fld-boolean-f");
        assert_eq!(
            err.kind,
            DecodeErrorKind::TypeMismatch {
                from: Tag::Integer,
                to: ippwerk_core::ValueType::Boolean
            }
        );
    }

    #[test]
    fn keep_trying_skips_bad_slice_elements() {
        let codec = CodecRegistry::new().codec::<Scenario>().expect("codec");
        let mut slice = int("fld-integer-slice", 1);
        slice.push(Tag::Keyword, Value::String("two".into())).push(Tag::Integer, Value::Integer(3));

        let mut dec = Decoder::new(DecodePolicy::KeepTrying);
        let mut obj = Scenario::default();
        dec.decode(&codec, &mut obj, &[slice]).expect("decode");

        assert_eq!(obj.fld_integer_slice, vec![1, 3]);
        assert_eq!(dec.errors().len(), 1);
        assert_eq!(dec.errors()[0].path, "fld-integer-slice[1]");
    }

    #[test]
    fn empty_values_are_rejected() {
        let codec = CodecRegistry::new().codec::<Scenario>().expect("codec");
        let mut obj = Scenario::default();
        let err = codec
            .decode(&mut obj, &[Attribute::with_values("fld-integer", Vec::new())], DecodePolicy::FailFast)
            .expect_err("no values");
        assert_eq!(err.kind, DecodeErrorKind::NoValues);
    }

    #[test]
    fn extra_values_warn_and_first_good_one_wins() {
        let codec = CodecRegistry::new().codec::<Scenario>().expect("codec");
        let mut attr = Attribute::new("fld-integer", Tag::Keyword, Value::String("bad".into()));
        attr.push(Tag::Integer, Value::Integer(5)).push(Tag::Integer, Value::Integer(6));

        let mut dec = Decoder::new(DecodePolicy::KeepTrying);
        let mut obj = Scenario::default();
        dec.decode(&codec, &mut obj, &[attr]).expect("decode");

        assert_eq!(obj.fld_integer, 5);
        let kinds: Vec<_> = dec.errors().iter().map(|e| (e.path.as_str(), &e.kind)).collect();
        assert_eq!(kinds.len(), 2);
        assert_eq!(kinds[0], ("fld-integer", &DecodeErrorKind::TooManyValues(3)));
        assert_eq!(kinds[1].0, "fld-integer[0]");
    }

    #[test]
    fn nested_errors_carry_full_path() {
        let codec = CodecRegistry::new().codec::<MediaDatabase>().expect("codec");
        let good = Value::Collection(vec![int("x-dimension", 21590), int("y-dimension", 27940)]);
        let bad = Value::Collection(vec![int("x-dimension", -1), int("y-dimension", 29700)]);
        let attr = Attribute::with_values(
            "media-size-supported",
            vec![(Tag::BeginCollection, good), (Tag::BeginCollection, bad)],
        );

        let mut obj = MediaDatabase::default();
        let err = codec.decode(&mut obj, &[attr.clone()], DecodePolicy::FailFast).expect_err("bad member");
        assert_eq!(
            err.to_string(),
            r#"IPP decode MediaDatabase: "media-size-supported[1]/x-dimension": value -1 out of range 0...2147483647"#
        );

        let mut dec = Decoder::new(DecodePolicy::KeepTrying);
        dec.decode(&codec, &mut obj, &[attr]).expect("keep trying");
        assert_eq!(obj.media_size_supported.len(), 2);
        assert_eq!(obj.media_size_supported[1].x_dimension, 0);
        assert_eq!(obj.media_size_supported[1].y_dimension, 29700);
    }

    #[test]
    fn collection_requires_collection_values() {
        let codec = CodecRegistry::new().codec::<MediaDatabase>().expect("codec");
        let mut obj = MediaDatabase::default();
        let err = codec
            .decode(&mut obj, &[int("media-size-supported", 5)], DecodePolicy::FailFast)
            .expect_err("not a collection");
        assert_eq!(err.path, "media-size-supported[0]");
        assert_eq!(
            err.kind,
            DecodeErrorKind::TypeMismatch {
                from: Tag::Integer,
                to: ippwerk_core::ValueType::Collection
            }
        );
    }

    #[test]
    fn raw_store_keeps_unknown_attributes_and_warnings() {
        let codec = CodecRegistry::new().codec::<WithRaw>().expect("codec");
        let mut copies = int("copies", 2);
        copies.push(Tag::Integer, Value::Integer(3));
        let attrs = vec![
            copies,
            Attribute::new("x-vendor", Tag::Keyword, Value::String("on".into())),
            int("copies", 9),
        ];

        let mut obj = WithRaw::default();
        codec.decode(&mut obj, &attrs, DecodePolicy::KeepTrying).expect("decode");

        assert_eq!(obj.copies, 2);
        assert_eq!(obj.raw.all().len(), 2);
        assert!(obj.raw.get("x-vendor").is_some());
        assert_eq!(obj.raw.errors().len(), 1);
        assert!(obj.raw.errors()[0].kind.is_warning());
    }

    #[test]
    fn decode_single_patches_one_field() {
        let codec = CodecRegistry::new().codec::<WithRaw>().expect("codec");
        let mut obj = WithRaw::default();
        codec
            .decode(&mut obj, &[int("copies", 2), int("pages", 10)], DecodePolicy::FailFast)
            .expect("decode");

        codec.decode_single(&mut obj, &int("copies", 4)).expect("patch");
        assert_eq!(obj.copies, 4);
        assert_eq!(obj.pages, 10);
        assert_eq!(obj.raw.get("copies"), Some(&int("copies", 4)));

        let err = codec
            .decode_single(&mut obj, &int("copies", 0))
            .expect_err("out of range");
        assert!(matches!(err.kind, DecodeErrorKind::Range { .. }));
        assert_eq!(obj.raw.get("copies"), Some(&int("copies", 4)));
    }
}
