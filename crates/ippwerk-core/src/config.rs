// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Codec configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How the decoder reacts to a field it cannot decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecodePolicy {
    /// Abort on the first error.
    #[default]
    FailFast,
    /// Record the error, reset the field to its zero value and continue.
    KeepTrying,
}

/// Settings shared by the tools built on the codec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Decode policy used when decoding messages received from devices.
    pub policy: DecodePolicy,
    /// Largest IPP message (attributes plus document data) accepted.
    pub max_message_bytes: usize,
    /// Pretty-print JSON reports.
    pub pretty_json: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            policy: DecodePolicy::KeepTrying,
            max_message_bytes: 64 * 1024 * 1024,
            pretty_json: true,
        }
    }
}

impl CodecConfig {
    /// Load settings from a JSON file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write settings to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_tolerate_device_quirks() {
        let config = CodecConfig::default();
        assert_eq!(config.policy, DecodePolicy::KeepTrying);
        assert_eq!(config.max_message_bytes, 64 * 1024 * 1024);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ippwerk.json");

        let config = CodecConfig {
            policy: DecodePolicy::FailFast,
            max_message_bytes: 4096,
            pretty_json: false,
        };
        config.save(&path).expect("save");

        let loaded = CodecConfig::load(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "policy": "fail-fast" }"#).expect("write");

        let loaded = CodecConfig::load(&path).expect("load");
        assert_eq!(loaded.policy, DecodePolicy::FailFast);
        assert_eq!(loaded.max_message_bytes, CodecConfig::default().max_message_bytes);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = CodecConfig::load(&dir.path().join("absent.json")).expect_err("must fail");
        assert!(matches!(err, crate::IppwerkError::Io(_)));
    }
}
