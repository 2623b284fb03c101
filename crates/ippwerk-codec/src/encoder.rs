// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Record -> attributes.

use ippwerk_core::{Attribute, Attributes, Tag, Value, ValueType, Values};

use crate::codec::Codec;
use crate::schema::{ElementMethods, Record, ShapeRef};

impl<R: Record> Codec<R> {
    /// Encode `obj` into attributes, one per step, in step order.
    ///
    /// Fields with no value are omitted, unless the descriptor names an
    /// out-of-band tag for that case. `Maybe` fields absent for a reason
    /// encode as that reason.
    pub fn encode(&self, obj: &R) -> Attributes {
        let mut attrs = Attributes::with_capacity(self.steps().len());

        for step in self.steps() {
            let values = (step.encode)(obj);

            if values.is_empty() {
                if step.zero_tag() != Tag::Zero {
                    attrs.push(Attribute::out_of_band(step.name(), step.zero_tag()));
                }
                continue;
            }

            let values = values
                .into_iter()
                .map(|(tag, value)| {
                    let tag = if tag == Tag::Zero { step.tag() } else { tag };
                    (tag, fit_value(tag, value))
                })
                .collect();
            attrs.push(Attribute::with_values(step.name(), values));
        }

        attrs
    }
}

/// Strings sent under an `octetString` tag go out as raw bytes.
fn fit_value(tag: Tag, value: Value) -> Value {
    match (tag.value_type(), value) {
        (ValueType::Binary, Value::String(s)) => Value::Binary(s.into_bytes()),
        (_, value) => value,
    }
}

pub(crate) fn encode_shape<E: Default>(shape: ShapeRef<'_, E>, m: &ElementMethods<E>) -> Values {
    match shape {
        ShapeRef::Single(e) => vec![(m.encode)(e)],
        ShapeRef::Repeated(items) => items.iter().map(|e| (m.encode)(e)).collect(),
        ShapeRef::Maybe(maybe) => match (maybe.get(), maybe.reason()) {
            (Some(e), _) => vec![(m.encode)(e)],
            (None, Some(reason)) => vec![(reason, Value::Void)],
            (None, None) => Vec::new(),
        },
        ShapeRef::Optional(Some(e)) => vec![(m.encode)(e)],
        ShapeRef::Optional(None) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use crate::maybe::Maybe;
    use crate::registry::CodecRegistry;

    #[test]
    fn scenario_encodes_in_order() {
        let codec = CodecRegistry::new().codec::<Scenario>().expect("codec");
        let obj = Scenario {
            fld_boolean_f: false,
            fld_integer: 5,
            fld_integer_slice: vec![1, 2, 3],
        };

        let mut slice = Attribute::new("fld-integer-slice", Tag::Integer, Value::Integer(1));
        slice.push(Tag::Integer, Value::Integer(2)).push(Tag::Integer, Value::Integer(3));

        assert_eq!(
            codec.encode(&obj),
            vec![
                Attribute::new("fld-boolean-f", Tag::Boolean, Value::Boolean(false)),
                Attribute::new("fld-integer", Tag::Integer, Value::Integer(5)),
                slice,
            ]
        );
    }

    #[test]
    fn empty_fields_are_omitted_or_out_of_band() {
        let codec = CodecRegistry::new().codec::<Bounded>().expect("codec");
        let obj = Bounded {
            job_priority: 50,
            ..Bounded::default()
        };

        assert_eq!(
            codec.encode(&obj),
            vec![
                Attribute::new("job-priority", Tag::Integer, Value::Integer(50)),
                Attribute::out_of_band("job-hold-until", Tag::NoValue),
            ]
        );
    }

    #[test]
    fn maybe_encodes_its_reason() {
        let codec = CodecRegistry::new().codec::<Optionals>().expect("codec");
        let obj = Optionals {
            printer_info: Maybe::absent(Tag::Unknown),
            printer_location: Maybe::set("lab".into()),
            ..Optionals::default()
        };

        assert_eq!(
            codec.encode(&obj),
            vec![
                Attribute::out_of_band("printer-info", Tag::Unknown),
                Attribute::new("printer-location", Tag::Text, Value::String("lab".into())),
            ]
        );
    }

    #[test]
    fn strings_as_octet_string_become_bytes() {
        let codec = CodecRegistry::new().codec::<Optionals>().expect("codec");
        let obj = Optionals {
            job_password: Some("1234".into()),
            ..Optionals::default()
        };

        assert_eq!(
            codec.encode(&obj),
            vec![Attribute::new("job-password", Tag::String, Value::Binary(b"1234".to_vec()))]
        );
    }

    #[test]
    fn collections_nest() {
        let codec = CodecRegistry::new().codec::<MediaDatabase>().expect("codec");
        let attrs = codec.encode(&MediaDatabase::letter_and_a4());

        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].name, "media-size-supported");
        assert_eq!(attrs[0].values.len(), 2);
        assert_eq!(
            attrs[0].values[0],
            (
                Tag::BeginCollection,
                Value::Collection(vec![
                    Attribute::new("x-dimension", Tag::Integer, Value::Integer(21590)),
                    Attribute::new("y-dimension", Tag::Integer, Value::Integer(27940)),
                ])
            )
        );
    }
}
