// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Maybe: a value that may be absent, with the out-of-band reason.

use ippwerk_core::Tag;

/// A field value that is either present, absent with an out-of-band
/// reason (`unknown`, `no-value`, `unsupported`), or simply not set.
///
/// Encodes as the value, as a single out-of-band value, or not at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Maybe<T> {
    value: T,
    reason: Tag,
    ok: bool,
}

impl<T: Default> Maybe<T> {
    /// Present value.
    pub fn set(value: T) -> Self {
        Self {
            value,
            reason: Tag::Zero,
            ok: true,
        }
    }

    /// Absent, with the out-of-band tag that explains why.
    /// `Tag::Zero` gives the "not set" state.
    pub fn absent(reason: Tag) -> Self {
        Self {
            value: T::default(),
            reason,
            ok: false,
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.ok.then_some(&self.value)
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.ok.then_some(&mut self.value)
    }

    /// Reason the value is absent, if one was given.
    pub fn reason(&self) -> Option<Tag> {
        (!self.ok && self.reason != Tag::Zero).then_some(self.reason)
    }

    pub fn is_set(&self) -> bool {
        self.ok
    }

    /// Neither present nor carrying a reason.
    pub fn is_unset(&self) -> bool {
        !self.ok && self.reason == Tag::Zero
    }

    pub fn into_option(self) -> Option<T> {
        self.ok.then_some(self.value)
    }
}

impl<T: Default> From<Option<T>> for Maybe<T> {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => Maybe::set(v),
            None => Maybe::absent(Tag::Zero),
        }
    }
}
