//! Variable naming engine
//!
//! This module assigns readable, collision-free identifiers to the slots of a
//! decompiled procedure. The heuristics are organized by sub-module:
//!
//! - `ledger`: per-procedure uniqueness bookkeeping
//! - `identifier`: identifier grammar and candidate clean-up
//! - `type_namer`: fallback names from static types
//! - `usage_context`: names from the sites that write and read a slot
//! - `loop_counter`: `i`, `j`, `k` for loop counters
//! - `debug_names`: reuse of debug-symbol names
//! - `variable_namer`: the orchestrator tying the above together

pub mod debug_names;
pub mod identifier;
pub mod ledger;
pub mod loop_counter;
pub mod reserved;
pub mod settings;
pub mod type_namer;
pub mod usage_context;
pub mod variable_namer;

pub use identifier::{clean_up_name, is_valid_identifier};
pub use ledger::{split_name, NameLedger};
pub use settings::NamingSettings;
pub use type_namer::name_for_type;
pub use usage_context::UsageContext;
pub use variable_namer::{
    assign_names, NameSource, NamedSlot, NamingContext, NamingReport, VariableNamer,
};
