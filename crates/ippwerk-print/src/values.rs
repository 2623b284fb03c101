// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Enumerated attribute values: operation codes, printer states and the
// "sides" keyword.

use ippwerk_codec::{EnumValue, KeywordValue, ipp_enum, ipp_keyword};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// IPP operation code (RFC 8011 SS5.4.15, "operations-supported").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Operation(pub u16);

impl Operation {
    pub const PRINT_JOB: Operation = Operation(0x0002);
    pub const PRINT_URI: Operation = Operation(0x0003);
    pub const VALIDATE_JOB: Operation = Operation(0x0004);
    pub const CREATE_JOB: Operation = Operation(0x0005);
    pub const SEND_DOCUMENT: Operation = Operation(0x0006);
    pub const SEND_URI: Operation = Operation(0x0007);
    pub const CANCEL_JOB: Operation = Operation(0x0008);
    pub const GET_JOB_ATTRIBUTES: Operation = Operation(0x0009);
    pub const GET_JOBS: Operation = Operation(0x000A);
    pub const GET_PRINTER_ATTRIBUTES: Operation = Operation(0x000B);
    pub const HOLD_JOB: Operation = Operation(0x000C);
    pub const RELEASE_JOB: Operation = Operation(0x000D);
    pub const PAUSE_PRINTER: Operation = Operation(0x0010);
    pub const RESUME_PRINTER: Operation = Operation(0x0011);
    pub const CUPS_GET_DEFAULT: Operation = Operation(0x4001);
    pub const CUPS_GET_PRINTERS: Operation = Operation(0x4002);

    /// Operation name as written in RFC 8011, if known.
    pub fn name(self) -> Option<&'static str> {
        Some(match self {
            Operation::PRINT_JOB => "Print-Job",
            Operation::PRINT_URI => "Print-URI",
            Operation::VALIDATE_JOB => "Validate-Job",
            Operation::CREATE_JOB => "Create-Job",
            Operation::SEND_DOCUMENT => "Send-Document",
            Operation::SEND_URI => "Send-URI",
            Operation::CANCEL_JOB => "Cancel-Job",
            Operation::GET_JOB_ATTRIBUTES => "Get-Job-Attributes",
            Operation::GET_JOBS => "Get-Jobs",
            Operation::GET_PRINTER_ATTRIBUTES => "Get-Printer-Attributes",
            Operation::HOLD_JOB => "Hold-Job",
            Operation::RELEASE_JOB => "Release-Job",
            Operation::PAUSE_PRINTER => "Pause-Printer",
            Operation::RESUME_PRINTER => "Resume-Printer",
            Operation::CUPS_GET_DEFAULT => "CUPS-Get-Default",
            Operation::CUPS_GET_PRINTERS => "CUPS-Get-Printers",
            _ => return None,
        })
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:04x}", self.0),
        }
    }
}

impl EnumValue for Operation {
    fn to_i32(self) -> i32 {
        i32::from(self.0)
    }

    // Operation codes are 16 bits on the wire; wider values wrap.
    fn from_i32(v: i32) -> Self {
        Operation(v as u16)
    }
}

// ---------------------------------------------------------------------------
// Printer state
// ---------------------------------------------------------------------------

/// "printer-state" (RFC 8011 SS5.4.11).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum PrinterState {
    #[default]
    Idle,
    Processing,
    Stopped,
    /// A value outside the registered set, kept as received.
    Other(i32),
}

impl EnumValue for PrinterState {
    fn to_i32(self) -> i32 {
        match self {
            PrinterState::Idle => 3,
            PrinterState::Processing => 4,
            PrinterState::Stopped => 5,
            PrinterState::Other(v) => v,
        }
    }

    fn from_i32(v: i32) -> Self {
        match v {
            3 => PrinterState::Idle,
            4 => PrinterState::Processing,
            5 => PrinterState::Stopped,
            other => PrinterState::Other(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Sides
// ---------------------------------------------------------------------------

/// "sides" keyword (RFC 8011 SS5.2.8).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Sides {
    #[default]
    OneSided,
    TwoSidedLongEdge,
    TwoSidedShortEdge,
    Other(String),
}

impl KeywordValue for Sides {
    fn as_keyword(&self) -> &str {
        match self {
            Sides::OneSided => "one-sided",
            Sides::TwoSidedLongEdge => "two-sided-long-edge",
            Sides::TwoSidedShortEdge => "two-sided-short-edge",
            Sides::Other(kw) => kw,
        }
    }

    fn from_keyword(s: &str) -> Self {
        match s {
            "one-sided" => Sides::OneSided,
            "two-sided-long-edge" => Sides::TwoSidedLongEdge,
            "two-sided-short-edge" => Sides::TwoSidedShortEdge,
            other => Sides::Other(other.to_owned()),
        }
    }
}

ipp_enum!(Operation, PrinterState);
ipp_keyword!(Sides);
