// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ippwerk Print: binary IPP message framing plus the printer, job, media
// and operation records built on `ippwerk-codec`.

pub mod job;
pub mod media;
pub mod message;
pub mod operation;
pub mod printer;
pub mod values;

pub use job::{JobAttributes, JobPreset, JobTemplate};
pub use media::{MediaCol, MediaColDatabase, MediaSize, MediaSourceProperties};
pub use message::{Group, GroupTag, Message};
pub use operation::{AttrSelection, GetPrinterAttributesRequest, GetPrinterAttributesResponse, OperationAttributes};
pub use printer::{JobTemplateSupport, PrinterAttributes, PrinterDescription};
pub use values::{Operation, PrinterState, Sides};
