//! Procedure model consumed by the naming engine
//!
//! This module describes the decompiled shape of a single procedure: its slots
//! (parameters and locals), the operation tree that reads and writes them, the
//! static types attached to slots and the symbol resolver used to look up
//! method signatures. Everything here is produced upstream; the naming engine
//! only reads it, apart from the `name` field of each slot.

pub mod node;
pub mod resolver;
pub mod slot;
pub mod types;
pub mod unit;

pub use node::{Descendants, FieldRef, Literal, MethodRef, Node, OpCode, Operand};
pub use resolver::{MethodSignature, MethodTable, NullResolver, SymbolResolver};
pub use slot::{Procedure, Slot, SlotId, SlotKind};
pub use types::{BuiltinType, NamedType, TypeSig};
pub use unit::{ResolvedMethod, TypeUnit};
