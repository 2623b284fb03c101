// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raw attribute store: the attributes a record was decoded from, verbatim.

use std::collections::{HashMap, HashSet};

use ippwerk_core::{Attribute, Attributes, DecodeError};
use tracing::debug;

/// Attributes a record was decoded from, plus the errors and warnings
/// recorded while decoding them. Keeps attributes the record has no
/// field for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAttrs {
    attrs: Attributes,
    by_name: HashMap<String, usize>,
    errors: Vec<DecodeError>,
}

impl RawAttrs {
    /// All attributes, in wire order.
    pub fn all(&self) -> &[Attribute] {
        &self.attrs
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.by_name.get(name).and_then(|i| self.attrs.get(*i))
    }

    /// Errors and warnings from the last decode.
    pub fn errors(&self) -> &[DecodeError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn clear(&mut self) {
        self.attrs.clear();
        self.by_name.clear();
        self.errors.clear();
    }

    /// Replace the store with a freshly decoded attribute list.
    pub(crate) fn save(&mut self, attrs: Attributes, errors: Vec<DecodeError>) {
        self.by_name = attrs.iter().enumerate().map(|(i, a)| (a.name.clone(), i)).collect();
        self.attrs = attrs;
        self.errors = errors;
    }

    /// Replace the attribute of the same name, or append it.
    pub(crate) fn put(&mut self, attr: Attribute) {
        match self.by_name.get(&attr.name) {
            Some(&i) => self.attrs[i] = attr,
            None => {
                self.by_name.insert(attr.name.clone(), self.attrs.len());
                self.attrs.push(attr);
            }
        }
    }
}

/// Drop repeated attribute names, keeping the first occurrence.
///
/// Some printers send the same attribute twice; later copies are ignored.
pub(crate) fn dedup(attrs: &[Attribute]) -> Attributes {
    let mut seen = HashSet::with_capacity(attrs.len());
    let mut out = Attributes::with_capacity(attrs.len());
    for attr in attrs {
        if seen.insert(attr.name.as_str()) {
            out.push(attr.clone());
        } else {
            debug!(name = %attr.name, "dropping duplicate IPP attribute");
        }
    }
    out
}
