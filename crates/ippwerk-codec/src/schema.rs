// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Record schemas: the per-type field table a codec is generated from.
//
// A record lists its fields once, in declaration order, with a descriptor
// string and a pair of accessor functions for each:
//
//     impl Record for MediaSize {
//         fn schema(s: &mut Schema<'_, Self>) {
//             ipp_fields!(s {
//                 "x-dimension,integer(0:MAX)" => x_dimension,
//                 "y-dimension,integer(0:MAX)" => y_dimension,
//             });
//         }
//     }
//
// Field types are classified by shape (bare, `Vec`, `Maybe`, `Option`)
// and by element; element types are either scalars (see `dispatch`) or
// nested records registered with `ipp_collection!`.

use std::collections::HashMap;
use std::sync::Arc;

use ippwerk_core::{DecodeError, DecodeErrorKind, SchemaError, Tag, Value, ValueType};

use crate::codec::{CodecStep, RawLocator};
use crate::decoder::Decoder;
use crate::descriptor::Descriptor;
use crate::dispatch::{Scalar, short_type_name};
use crate::maybe::Maybe;
use crate::raw::RawAttrs;
use crate::registry::CodecRegistry;

/// A native record that maps onto a set of IPP attributes.
pub trait Record: Default + Send + Sync + 'static {
    /// Declare the record's fields.
    fn schema(schema: &mut Schema<'_, Self>);
}

/// A type that can be one value of an attribute.
pub trait Element: Clone + Default + Send + Sync + 'static {
    /// Encode/decode functions and default tag for this type.
    fn methods(registry: &CodecRegistry) -> Result<ElementMethods<Self>, SchemaError>;
}

pub(crate) type ElemEncodeFn<E> = Arc<dyn Fn(&E) -> (Tag, Value) + Send + Sync>;
pub(crate) type ElemDecodeFn<E> =
    Arc<dyn Fn(&mut Decoder, Tag, &Value) -> Result<E, DecodeError> + Send + Sync>;

/// Resolved encode/decode functions for one element type.
pub struct ElementMethods<E> {
    pub(crate) native: &'static str,
    pub(crate) default_tag: Tag,
    pub(crate) encode: ElemEncodeFn<E>,
    pub(crate) decode: ElemDecodeFn<E>,
}

impl<E> Clone for ElementMethods<E> {
    fn clone(&self) -> Self {
        Self {
            native: self.native,
            default_tag: self.default_tag,
            encode: Arc::clone(&self.encode),
            decode: Arc::clone(&self.decode),
        }
    }
}

impl<E> ElementMethods<E> {
    pub fn default_tag(&self) -> Tag {
        self.default_tag
    }
}

impl<E: Scalar> ElementMethods<E> {
    /// Methods of a scalar type, straight from its [`Scalar`] impl.
    pub fn scalar() -> Self {
        Self {
            native: short_type_name::<E>(),
            default_tag: E::DEFAULT_TAG,
            encode: Arc::new(<E as Scalar>::encode),
            decode: Arc::new(|dec: &mut Decoder, tag: Tag, value: &Value| {
                <E as Scalar>::decode(tag, value).map_err(|kind| dec.error(kind))
            }),
        }
    }
}

impl<E: Record + Element> ElementMethods<E> {
    /// Methods of a nested record, sent as a collection.
    pub fn collection(registry: &CodecRegistry) -> Result<Self, SchemaError> {
        let codec = registry.codec::<E>()?;
        let encoder = Arc::clone(&codec);

        Ok(Self {
            native: short_type_name::<E>(),
            default_tag: Tag::BeginCollection,
            encode: Arc::new(move |e: &E| (Tag::BeginCollection, Value::Collection(encoder.encode(e)))),
            decode: Arc::new(move |dec: &mut Decoder, tag: Tag, value: &Value| match value {
                Value::Collection(attrs) => dec.decode_collection(&codec, attrs),
                _ => Err(dec.error(DecodeErrorKind::TypeMismatch {
                    from: tag,
                    to: ValueType::Collection,
                })),
            }),
        })
    }
}

// ---------------------------------------------------------------------------
// Field shapes
// ---------------------------------------------------------------------------

/// Read view of a field, by shape.
pub enum ShapeRef<'a, E> {
    Single(&'a E),
    Repeated(&'a [E]),
    Maybe(&'a Maybe<E>),
    Optional(Option<&'a E>),
}

/// Write view of a field, by shape.
pub enum ShapeMut<'a, E> {
    Single(&'a mut E),
    Repeated(&'a mut Vec<E>),
    Maybe(&'a mut Maybe<E>),
    Optional(&'a mut Option<E>),
}

/// A record field type: an element, or a `Vec`, `Maybe` or `Option` of one.
pub trait Field: Default + Send + Sync + 'static {
    type Elem: Element;

    /// Multi-valued (`1setOf`) on the wire.
    const REPEATED: bool = false;

    fn shape(&self) -> ShapeRef<'_, Self::Elem>;
    fn shape_mut(&mut self) -> ShapeMut<'_, Self::Elem>;
}

impl<E: Element> Field for Vec<E> {
    type Elem = E;
    const REPEATED: bool = true;

    fn shape(&self) -> ShapeRef<'_, E> {
        ShapeRef::Repeated(self)
    }

    fn shape_mut(&mut self) -> ShapeMut<'_, E> {
        ShapeMut::Repeated(self)
    }
}

impl<E: Element> Field for Maybe<E> {
    type Elem = E;

    fn shape(&self) -> ShapeRef<'_, E> {
        ShapeRef::Maybe(self)
    }

    fn shape_mut(&mut self) -> ShapeMut<'_, E> {
        ShapeMut::Maybe(self)
    }
}

impl<E: Element> Field for Option<E> {
    type Elem = E;

    fn shape(&self) -> ShapeRef<'_, E> {
        ShapeRef::Optional(self.as_ref())
    }

    fn shape_mut(&mut self) -> ShapeMut<'_, E> {
        ShapeMut::Optional(self)
    }
}

// ---------------------------------------------------------------------------
// Schema builder
// ---------------------------------------------------------------------------

/// Collects a record's field table. Passed to [`Record::schema`].
///
/// The first error is kept and reported when the codec is generated;
/// later declarations are ignored.
pub struct Schema<'r, R> {
    registry: &'r CodecRegistry,
    record: &'static str,
    steps: Vec<CodecStep<R>>,
    names: HashMap<String, &'static str>,
    raw: Option<RawLocator<R>>,
    error: Option<SchemaError>,
}

impl<'r, R: Record> Schema<'r, R> {
    pub(crate) fn new(registry: &'r CodecRegistry) -> Self {
        Self {
            registry,
            record: short_type_name::<R>(),
            steps: Vec::new(),
            names: HashMap::new(),
            raw: None,
            error: None,
        }
    }

    /// Declare a field. `field` is the Rust field name, used in diagnostics.
    pub fn field<F: Field>(
        &mut self,
        field: &'static str,
        descriptor: &str,
        get: fn(&R) -> &F,
        get_mut: fn(&mut R) -> &mut F,
    ) -> &mut Self {
        if self.error.is_none() {
            if let Err(err) = self.add_field(field, descriptor, get, get_mut) {
                self.error = Some(err);
            }
        }
        self
    }

    /// Splice in the fields of an embedded record, as if they were
    /// declared here.
    pub fn embed<E: Record>(&mut self, get: fn(&R) -> &E, get_mut: fn(&mut R) -> &mut E) -> &mut Self {
        if self.error.is_some() {
            return self;
        }

        let mut inner = Schema::<E>::new(self.registry);
        inner.names = std::mem::take(&mut self.names);
        E::schema(&mut inner);
        self.names = std::mem::take(&mut inner.names);

        match inner.error {
            Some(err) => self.error = Some(err),
            None => self
                .steps
                .extend(inner.steps.into_iter().map(|step| step.reroute(get, get_mut))),
        }
        self
    }

    /// Attach the store that keeps the attributes this record was decoded
    /// from. Records with a store may declare no fields at all.
    pub fn raw_attrs(&mut self, get: fn(&R) -> &RawAttrs, get_mut: fn(&mut R) -> &mut RawAttrs) -> &mut Self {
        self.raw = Some(RawLocator { get, get_mut });
        self
    }

    pub(crate) fn finish(self) -> Result<(Vec<CodecStep<R>>, Option<RawLocator<R>>), SchemaError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok((self.steps, self.raw)),
        }
    }

    fn add_field<F: Field>(
        &mut self,
        field: &'static str,
        descriptor: &str,
        get: fn(&R) -> &F,
        get_mut: fn(&mut R) -> &mut F,
    ) -> Result<(), SchemaError> {
        let record = self.record;
        let desc = Descriptor::parse(descriptor).map_err(|err| SchemaError::Descriptor { record, field, err })?;

        if let Some(&previous) = self.names.get(&desc.name) {
            return Err(SchemaError::DuplicateName {
                record,
                field,
                name: desc.name,
                previous,
            });
        }

        let methods = F::Elem::methods(self.registry)?;
        let tag = resolve_tag(&desc, methods.default_tag).map_err(|tag| SchemaError::TagMismatch {
            record,
            field,
            native: methods.native,
            tag,
        })?;

        self.names.insert(desc.name.clone(), field);
        self.steps
            .push(CodecStep::for_field(field, desc, tag, methods, get, get_mut));
        Ok(())
    }
}

/// Pick the step tag: the descriptor's when given and compatible with the
/// element's default, else the default. On mismatch returns the offending
/// tag.
fn resolve_tag(desc: &Descriptor, native: Tag) -> Result<Tag, Tag> {
    if let Some(bad) = desc.alt_tags.iter().find(|t| !compatible(**t, native)) {
        return Err(*bad);
    }
    match desc.tag {
        Tag::Zero => Ok(native),
        tag if compatible(tag, native) => Ok(tag),
        tag => Err(tag),
    }
}

/// Tags of the same value family are interchangeable; so are strings and
/// octet strings.
pub(crate) fn compatible(requested: Tag, native: Tag) -> bool {
    let want = requested.value_type();
    match native.value_type() {
        // integer-or-range picks its tag per value
        ValueType::Invalid => matches!(want, ValueType::Integer | ValueType::Range),
        have => {
            want == have
                || matches!(
                    (want, have),
                    (ValueType::String, ValueType::Binary) | (ValueType::Binary, ValueType::String)
                )
        }
    }
}
