// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Codec registry: generated codecs, cached by record type.
//
// Each type gets a once-cell in a lock-guarded map. Concurrent first
// requests for a type block on the same cell, so a codec is generated
// once and every caller receives the same `Arc`. Schema errors are cached
// too; a broken record never regenerates.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use ippwerk_core::SchemaError;

use crate::codec::Codec;
use crate::dispatch::short_type_name;
use crate::schema::Record;

type Generated<R> = Result<Arc<Codec<R>>, SchemaError>;
type Slot<R> = OnceLock<Generated<R>>;

thread_local! {
    /// Record types being generated on this thread, innermost last.
    static GENERATING: RefCell<Vec<TypeId>> = const { RefCell::new(Vec::new()) };
}

/// Marks a record type as being generated until dropped, so a panicking
/// schema leaves the stack balanced.
struct GeneratingGuard;

impl GeneratingGuard {
    fn enter(id: TypeId) -> Self {
        GENERATING.with(|g| g.borrow_mut().push(id));
        GeneratingGuard
    }
}

impl Drop for GeneratingGuard {
    fn drop(&mut self) {
        GENERATING.with(|g| g.borrow_mut().pop());
    }
}

/// Cache of generated codecs.
///
/// Tests build their own with [`CodecRegistry::new`]; everything else
/// shares [`CodecRegistry::global`].
#[derive(Default)]
pub struct CodecRegistry {
    slots: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry, created on first use.
    pub fn global() -> &'static CodecRegistry {
        static GLOBAL: OnceLock<CodecRegistry> = OnceLock::new();
        GLOBAL.get_or_init(CodecRegistry::new)
    }

    /// Codec for `R`, generating it on first request.
    pub fn codec<R: Record>(&self) -> Result<Arc<Codec<R>>, SchemaError> {
        let id = TypeId::of::<R>();
        if GENERATING.with(|g| g.borrow().contains(&id)) {
            return Err(SchemaError::Recursive {
                record: short_type_name::<R>(),
            });
        }

        self.slot::<R>()
            .get_or_init(|| {
                let _generating = GeneratingGuard::enter(id);
                Codec::generate(self).map(Arc::new)
            })
            .clone()
    }

    /// Number of record types requested so far.
    pub fn len(&self) -> usize {
        self.slots.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot<R: Record>(&self) -> Arc<Slot<R>> {
        let id = TypeId::of::<R>();

        let cached = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned();
        let any = match cached {
            Some(any) => any,
            None => {
                let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
                Arc::clone(
                    slots
                        .entry(id)
                        .or_insert_with(|| Arc::new(Slot::<R>::new()) as Arc<dyn Any + Send + Sync>),
                )
            }
        };

        // Keyed by TypeId, so the downcast always succeeds.
        any.downcast::<Slot<R>>().unwrap_or_else(|_| Arc::new(Slot::<R>::new()))
    }
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecRegistry").field("codecs", &self.len()).finish()
    }
}
