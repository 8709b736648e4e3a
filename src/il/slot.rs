//! Slots (parameters and locals) and the procedure that owns them

use super::node::Node;
use super::types::TypeSig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a slot inside its [`Procedure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub usize);

impl SlotId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    Parameter,
    Local,
}

/// A parameter or local variable awaiting a name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub kind: SlotKind,
    #[serde(rename = "type")]
    pub ty: TypeSig,
    /// Introduced by the decompiler itself; its name is kept as-is
    #[serde(default)]
    pub is_generated: bool,
    /// Name recovered from debug symbols, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_name: Option<String>,
    /// Assigned name. Parameters may arrive with their declared name here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Slot {
    pub fn parameter(ty: impl Into<TypeSig>, name: Option<&str>) -> Self {
        Self {
            kind: SlotKind::Parameter,
            ty: ty.into(),
            is_generated: false,
            debug_name: None,
            name: name.map(str::to_string),
        }
    }

    pub fn local(ty: impl Into<TypeSig>) -> Self {
        Self {
            kind: SlotKind::Local,
            ty: ty.into(),
            is_generated: false,
            debug_name: None,
            name: None,
        }
    }

    /// A decompiler-introduced local such as a stack temporary
    pub fn generated(ty: impl Into<TypeSig>, name: &str) -> Self {
        Self {
            kind: SlotKind::Local,
            ty: ty.into(),
            is_generated: true,
            debug_name: None,
            name: Some(name.to_string()),
        }
    }

    pub fn with_debug_name(mut self, debug_name: &str) -> Self {
        self.debug_name = Some(debug_name.to_string());
        self
    }

    pub fn is_parameter(&self) -> bool {
        self.kind == SlotKind::Parameter
    }

    /// The assigned name, treating an empty string as no name
    pub fn assigned_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// One decompiled procedure body: its slots and its operation tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    #[serde(default)]
    pub name: String,
    /// Parameters in declaration order, locals in discovery order
    pub slots: Vec<Slot>,
    pub body: Node,
}

impl Procedure {
    pub fn new(name: impl Into<String>, slots: Vec<Slot>, body: Node) -> Self {
        Self {
            name: name.into(),
            slots,
            body,
        }
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.get(id.index())
    }

    /// Parameter ids in declaration order
    pub fn parameters(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.slot_ids_of(SlotKind::Parameter)
    }

    /// Local ids in discovery order
    pub fn locals(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.slot_ids_of(SlotKind::Local)
    }

    fn slot_ids_of(&self, kind: SlotKind) -> impl Iterator<Item = SlotId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(move |(_, slot)| slot.kind == kind)
            .map(|(index, _)| SlotId(index))
    }

    /// Structural validation of the body against this slot table
    pub fn validate(&self) -> Result<()> {
        self.body.check_shape(self.slots.len()).map_err(|e| match e {
            Error::InvalidProcedure { message } => Error::InvalidProcedure {
                message: format!("procedure '{}': {}", self.name, message),
            },
            other => other,
        })
    }
}
