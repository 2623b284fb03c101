// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ippwerk core: wire data model, errors and configuration shared across all crates.

pub mod attribute;
pub mod config;
pub mod error;
pub mod tag;
pub mod value;

pub use attribute::{Attribute, Attributes, Values};
pub use config::{CodecConfig, DecodePolicy};
pub use error::{DecodeError, DecodeErrorKind, DescriptorError, IppwerkError, Result, SchemaError};
pub use tag::{Tag, ValueType};
pub use value::{IntegerOrRange, Range, Resolution, TextWithLang, Units, Value, Version};
