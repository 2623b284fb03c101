// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Declaration macros for records and element types.

/// Declare record fields from `"descriptor" => field` pairs.
///
/// ```ignore
/// ipp_fields!(s {
///     "!copies,integer(1:MAX)" => copies,
///     "sides,keyword" => sides,
/// });
/// ```
#[macro_export]
macro_rules! ipp_fields {
    ($schema:ident { $($desc:literal => $field:ident),* $(,)? }) => {
        $(
            $schema.field(stringify!($field), $desc, |r| &r.$field, |r| &mut r.$field);
        )*
    };
}

/// Make [`Scalar`](crate::Scalar) types usable as record fields.
#[macro_export]
macro_rules! ipp_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Element for $ty {
                fn methods(
                    _: &$crate::CodecRegistry,
                ) -> ::std::result::Result<$crate::ElementMethods<Self>, $crate::SchemaError> {
                    ::std::result::Result::Ok($crate::ElementMethods::scalar())
                }
            }

            $crate::__ipp_bare_field!($ty);
        )+
    };
}

/// Give [`EnumValue`](crate::EnumValue) types IPP `enum` semantics.
#[macro_export]
macro_rules! ipp_enum {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Scalar for $ty {
                const DEFAULT_TAG: $crate::Tag = $crate::Tag::Enum;

                fn encode(&self) -> ($crate::Tag, $crate::Value) {
                    $crate::dispatch::encode_enum(self)
                }

                fn decode(
                    tag: $crate::Tag,
                    value: &$crate::Value,
                ) -> ::std::result::Result<Self, $crate::DecodeErrorKind> {
                    $crate::dispatch::decode_enum(tag, value)
                }
            }

            $crate::ipp_scalar!($ty);
        )+
    };
}

/// Give [`KeywordValue`](crate::KeywordValue) types IPP `keyword`
/// semantics.
#[macro_export]
macro_rules! ipp_keyword {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Scalar for $ty {
                const DEFAULT_TAG: $crate::Tag = $crate::Tag::Keyword;

                fn encode(&self) -> ($crate::Tag, $crate::Value) {
                    $crate::dispatch::encode_keyword(self)
                }

                fn decode(
                    tag: $crate::Tag,
                    value: &$crate::Value,
                ) -> ::std::result::Result<Self, $crate::DecodeErrorKind> {
                    $crate::dispatch::decode_keyword(tag, value)
                }
            }

            $crate::ipp_scalar!($ty);
        )+
    };
}

/// Make [`Record`](crate::Record) types usable as collection-valued
/// fields.
#[macro_export]
macro_rules! ipp_collection {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Element for $ty {
                fn methods(
                    registry: &$crate::CodecRegistry,
                ) -> ::std::result::Result<$crate::ElementMethods<Self>, $crate::SchemaError> {
                    $crate::ElementMethods::collection(registry)
                }
            }

            $crate::__ipp_bare_field!($ty);
        )+
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __ipp_bare_field {
    ($ty:ty) => {
        impl $crate::Field for $ty {
            type Elem = Self;

            fn shape(&self) -> $crate::ShapeRef<'_, Self> {
                $crate::ShapeRef::Single(self)
            }

            fn shape_mut(&mut self) -> $crate::ShapeMut<'_, Self> {
                $crate::ShapeMut::Single(self)
            }
        }
    };
}
