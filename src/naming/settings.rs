//! Naming settings
//!
//! Settings are plain data, deserializable from a JSON file. Every field has
//! a default so partial files are accepted.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Marker used by disassemblers for placeholder local names (`V_0`, `V_1`, ...)
pub const DEFAULT_GENERATED_NAME_PREFIX: &str = "V_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingSettings {
    /// Reuse local names recovered from debug symbols
    pub use_debug_symbols: bool,
    /// Debug names starting with this prefix are treated as placeholders
    pub generated_name_prefix: String,
}

impl Default for NamingSettings {
    fn default() -> Self {
        Self {
            use_debug_symbols: true,
            generated_name_prefix: DEFAULT_GENERATED_NAME_PREFIX.to_string(),
        }
    }
}

impl NamingSettings {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Settings {
            message: e.to_string(),
        })
    }

    /// Load settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(format!("Failed to read settings {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }
}
