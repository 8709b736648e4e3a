//! Serialized input document: one enclosing type and its procedure bodies

use super::node::MethodRef;
use super::resolver::{MethodSignature, MethodTable};
use super::slot::Procedure;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A method reference paired with its resolved signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMethod {
    pub method: MethodRef,
    pub signature: MethodSignature,
}

/// Procedures that share an enclosing type, plus the metadata naming needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeUnit {
    #[serde(default)]
    pub type_name: String,
    /// Field names declared on the enclosing type
    #[serde(default)]
    pub fields: Vec<String>,
    /// Names that synthesized identifiers must avoid
    #[serde(default)]
    pub reserved_names: Vec<String>,
    /// Signatures available to the resolver
    #[serde(default)]
    pub methods: Vec<ResolvedMethod>,
    pub procedures: Vec<Procedure>,
}

impl TypeUnit {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(Error::from)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::from)
    }

    /// Resolver backed by the `methods` list of this unit
    pub fn method_table(&self) -> MethodTable {
        self.methods
            .iter()
            .map(|resolved| (resolved.method.clone(), resolved.signature.clone()))
            .collect()
    }

    /// Validate every procedure body
    pub fn validate(&self) -> Result<()> {
        self.procedures.iter().try_for_each(Procedure::validate)
    }
}
