// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Object: codec operations as methods on the record itself, backed by the
// global registry.

use std::sync::Arc;

use ippwerk_core::{Attribute, Attributes, DecodeError, DecodePolicy, Result, SchemaError};

use crate::codec::{AttrInfo, Codec};
use crate::raw::RawAttrs;
use crate::registry::CodecRegistry;
use crate::schema::Record;

/// Convenience methods for every [`Record`], using
/// [`CodecRegistry::global`].
pub trait Object: Record {
    /// This type's codec.
    fn codec() -> std::result::Result<Arc<Codec<Self>>, SchemaError> {
        CodecRegistry::global().codec::<Self>()
    }

    fn encode_attrs(&self) -> Result<Attributes> {
        Ok(Self::codec()?.encode(self))
    }

    fn decode_attrs(&mut self, attrs: &[Attribute], policy: DecodePolicy) -> Result<()> {
        Self::codec()?.decode(self, attrs, policy)?;
        Ok(())
    }

    /// Decode a fresh record.
    fn decode_new(attrs: &[Attribute], policy: DecodePolicy) -> Result<Self> {
        let mut obj = Self::default();
        obj.decode_attrs(attrs, policy)?;
        Ok(obj)
    }

    fn known_attrs() -> Result<Vec<AttrInfo>> {
        Ok(Self::codec()?.known_attrs().to_vec())
    }

    /// Look up one attribute: as received if the record keeps its raw
    /// attributes, otherwise as it would be encoded now.
    fn get_attr(&self, name: &str) -> Option<Attribute> {
        if let Some(attr) = self.raw_attrs().and_then(|raw| raw.get(name)) {
            return Some(attr.clone());
        }
        Self::codec()
            .ok()?
            .encode(self)
            .into_iter()
            .find(|attr| attr.name == name)
    }

    /// Apply one attribute, as [`Codec::decode_single`].
    fn set_attr(&mut self, attr: &Attribute) -> Result<()> {
        Self::codec()?.decode_single(self, attr)?;
        Ok(())
    }

    fn raw_attrs(&self) -> Option<&RawAttrs> {
        Self::codec().ok()?.raw(self)
    }

    /// Errors and warnings from the last decode. Empty for records
    /// without a raw store.
    fn decode_errors(&self) -> &[DecodeError] {
        self.raw_attrs().map(RawAttrs::errors).unwrap_or_default()
    }
}

impl<R: Record> Object for R {}
