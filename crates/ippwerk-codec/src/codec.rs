// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Generated codecs: one ordered list of steps per record type, each step
// binding a wire attribute to a record field.

use std::collections::HashMap;
use std::sync::Arc;

use ippwerk_core::{Attribute, DecodeError, DecodeErrorKind, DecodePolicy, SchemaError, Tag, Value, Values};
use serde::Serialize;
use tracing::debug;

use crate::decoder::Decoder;
use crate::descriptor::{Conformance, Descriptor};
use crate::dispatch::short_type_name;
use crate::encoder::encode_shape;
use crate::raw::RawAttrs;
use crate::registry::CodecRegistry;
use crate::schema::{ElementMethods, Field, Record, Schema};

pub(crate) type EncodeFn<R> = Arc<dyn Fn(&R) -> Values + Send + Sync>;
pub(crate) type DecodeFn<R> = Arc<dyn Fn(&mut Decoder, &mut R, &[(Tag, Value)]) -> Result<(), DecodeError> + Send + Sync>;
pub(crate) type ZeroFn<R> = Arc<dyn Fn(&mut R) + Send + Sync>;

/// Name and tag of an attribute a codec knows about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttrInfo {
    pub name: String,
    pub tag: Tag,
    pub conformance: Conformance,
    pub repeated: bool,
}

/// Inclusive integer bounds of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub min: i32,
    pub max: i32,
}

impl Bounds {
    fn contains(self, v: i32) -> bool {
        self.min <= v && v <= self.max
    }

    /// Integers and both ends of ranges must fall within the bounds.
    pub fn check(self, value: &Value) -> Result<(), DecodeErrorKind> {
        let out_of_range = |v: i32| DecodeErrorKind::Range {
            value: i64::from(v),
            min: i64::from(self.min),
            max: i64::from(self.max),
        };

        match value {
            Value::Integer(v) if !self.contains(*v) => Err(out_of_range(*v)),
            Value::Range(r) if !self.contains(r.lower) => Err(out_of_range(r.lower)),
            Value::Range(r) if !self.contains(r.upper) => Err(out_of_range(r.upper)),
            _ => Ok(()),
        }
    }
}

/// Accessors for the raw attribute store of a record.
pub(crate) struct RawLocator<R> {
    pub get: fn(&R) -> &RawAttrs,
    pub get_mut: fn(&mut R) -> &mut RawAttrs,
}

impl<R> Clone for RawLocator<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for RawLocator<R> {}

/// One attribute of a record: how to find its field and how to move it
/// to and from the wire.
pub struct CodecStep<R> {
    field: &'static str,
    name: String,
    tag: Tag,
    alt_tags: Vec<Tag>,
    zero_tag: Tag,
    conformance: Conformance,
    bounds: Bounds,
    repeated: bool,
    pub(crate) encode: EncodeFn<R>,
    pub(crate) decode: DecodeFn<R>,
    pub(crate) zero: ZeroFn<R>,
}

impl<R: 'static> CodecStep<R> {
    pub(crate) fn for_field<F: Field>(
        field: &'static str,
        desc: Descriptor,
        tag: Tag,
        methods: ElementMethods<F::Elem>,
        get: fn(&R) -> &F,
        get_mut: fn(&mut R) -> &mut F,
    ) -> Self {
        let bounds = Bounds {
            min: desc.min,
            max: desc.max,
        };
        let zero_tag = desc.zero_tag;
        let encoder = methods.clone();

        Self {
            field,
            name: desc.name,
            tag,
            alt_tags: desc.alt_tags,
            zero_tag,
            conformance: desc.conformance,
            bounds,
            repeated: F::REPEATED,
            encode: Arc::new(move |r: &R| encode_shape(get(r).shape(), &encoder)),
            decode: Arc::new(move |dec: &mut Decoder, r: &mut R, values: &[(Tag, Value)]| {
                dec.decode_shape(get_mut(r).shape_mut(), &methods, bounds, zero_tag, values)
            }),
            zero: Arc::new(move |r: &mut R| *get_mut(r) = F::default()),
        }
    }

    /// Re-target the step at a record embedding this one.
    pub(crate) fn reroute<O: 'static>(self, get: fn(&O) -> &R, get_mut: fn(&mut O) -> &mut R) -> CodecStep<O> {
        let (encode, decode, zero) = (self.encode, self.decode, self.zero);

        CodecStep {
            field: self.field,
            name: self.name,
            tag: self.tag,
            alt_tags: self.alt_tags,
            zero_tag: self.zero_tag,
            conformance: self.conformance,
            bounds: self.bounds,
            repeated: self.repeated,
            encode: Arc::new(move |o: &O| encode(get(o))),
            decode: Arc::new(move |dec: &mut Decoder, o: &mut O, values: &[(Tag, Value)]| {
                decode(dec, get_mut(o), values)
            }),
            zero: Arc::new(move |o: &mut O| zero(get_mut(o))),
        }
    }
}

impl<R> CodecStep<R> {
    /// Wire attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rust field name.
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn alt_tags(&self) -> &[Tag] {
        &self.alt_tags
    }

    pub fn zero_tag(&self) -> Tag {
        self.zero_tag
    }

    pub fn conformance(&self) -> Conformance {
        self.conformance
    }

    pub fn min(&self) -> i32 {
        self.bounds.min
    }

    pub fn max(&self) -> i32 {
        self.bounds.max
    }

    pub fn is_repeated(&self) -> bool {
        self.repeated
    }

    fn info(&self) -> AttrInfo {
        AttrInfo {
            name: self.name.clone(),
            tag: self.tag,
            conformance: self.conformance,
            repeated: self.repeated,
        }
    }
}

impl<R> std::fmt::Debug for CodecStep<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecStep")
            .field("field", &self.field)
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("zero_tag", &self.zero_tag)
            .field("bounds", &self.bounds)
            .field("repeated", &self.repeated)
            .finish_non_exhaustive()
    }
}

/// Generated codec for record type `R`. Immutable once built; obtain one
/// from a [`CodecRegistry`].
pub struct Codec<R> {
    record: &'static str,
    steps: Vec<CodecStep<R>>,
    by_name: HashMap<String, usize>,
    known: Vec<AttrInfo>,
    raw: Option<RawLocator<R>>,
}

impl<R: Record> Codec<R> {
    pub(crate) fn generate(registry: &CodecRegistry) -> Result<Self, SchemaError> {
        let record = short_type_name::<R>();
        let mut schema = Schema::<R>::new(registry);
        R::schema(&mut schema);
        let (steps, raw) = schema.finish()?;

        if steps.is_empty() && raw.is_none() {
            return Err(SchemaError::NoFields { record });
        }

        let by_name = steps
            .iter()
            .enumerate()
            .map(|(i, step)| (step.name.clone(), i))
            .collect();
        let known = steps.iter().map(CodecStep::info).collect();

        debug!(record, steps = steps.len(), raw = raw.is_some(), "generated IPP codec");

        Ok(Self {
            record,
            steps,
            by_name,
            known,
            raw,
        })
    }

    /// Decode `attrs` into `obj`.
    pub fn decode(&self, obj: &mut R, attrs: &[Attribute], policy: DecodePolicy) -> Result<(), DecodeError> {
        Decoder::new(policy).decode(self, obj, attrs)
    }

    /// Decode a single attribute into `obj`, leaving other fields alone.
    pub fn decode_single(&self, obj: &mut R, attr: &Attribute) -> Result<(), DecodeError> {
        Decoder::new(DecodePolicy::FailFast).decode_single(self, obj, attr)
    }
}

impl<R> Codec<R> {
    /// Short name of the record type.
    pub fn record(&self) -> &'static str {
        self.record
    }

    pub fn steps(&self) -> &[CodecStep<R>] {
        &self.steps
    }

    pub fn step(&self, name: &str) -> Option<&CodecStep<R>> {
        self.by_name.get(name).and_then(|i| self.steps.get(*i))
    }

    /// Attributes this codec maps, in step order.
    pub fn known_attrs(&self) -> &[AttrInfo] {
        &self.known
    }

    /// Whether the record keeps the attributes it was decoded from.
    pub fn is_attribute_bearing(&self) -> bool {
        self.raw.is_some()
    }

    /// The record's raw attribute store, if it has one.
    pub fn raw<'a>(&self, obj: &'a R) -> Option<&'a RawAttrs> {
        self.raw.map(|raw| (raw.get)(obj))
    }

    pub(crate) fn raw_mut<'a>(&self, obj: &'a mut R) -> Option<&'a mut RawAttrs> {
        self.raw.map(|raw| (raw.get_mut)(obj))
    }
}

impl<R> std::fmt::Debug for Codec<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec")
            .field("record", &self.record)
            .field("steps", &self.steps)
            .field("raw", &self.raw.is_some())
            .finish()
    }
}
