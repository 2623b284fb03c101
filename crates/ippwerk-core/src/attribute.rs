// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Named, tagged attribute values.

use serde::Serialize;

use crate::tag::Tag;
use crate::value::Value;

/// Values of one attribute, each with its own tag.
pub type Values = Vec<(Tag, Value)>;

/// An ordered sequence of attributes, as found in an attribute group or
/// inside a collection.
pub type Attributes = Vec<Attribute>;

/// A single IPP attribute: a name and one or more tagged values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub values: Values,
}

impl Attribute {
    /// Attribute with a single value.
    pub fn new(name: impl Into<String>, tag: Tag, value: Value) -> Self {
        Self {
            name: name.into(),
            values: vec![(tag, value)],
        }
    }

    pub fn with_values(name: impl Into<String>, values: Values) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Out-of-band attribute: no value, just the reason.
    pub fn out_of_band(name: impl Into<String>, tag: Tag) -> Self {
        Self::new(name, tag, Value::Void)
    }

    /// Append another value (an "additional value" on the wire).
    pub fn push(&mut self, tag: Tag, value: Value) -> &mut Self {
        self.values.push((tag, value));
        self
    }

    /// First value, if any.
    pub fn first(&self) -> Option<&(Tag, Value)> {
        self.values.first()
    }
}
