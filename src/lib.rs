//! slotname-rs: variable-name synthesis for decompiled procedure bodies
//!
//! Given the operation tree of one procedure and its anonymous slots, this
//! library assigns every parameter and local a readable, valid and unique
//! identifier using loop-counter detection, usage context, debug symbols and
//! type-based fallbacks.

pub mod cli;
pub mod error;
pub mod il;
pub mod naming;

pub use error::{Error as SlotnameError, Result as SlotnameResult};

// Re-export commonly used types
pub use il::{Node, OpCode, Procedure, Slot, SlotId, SymbolResolver, TypeSig, TypeUnit};
pub use naming::{assign_names, NameSource, NamingContext, NamingReport, NamingSettings};
