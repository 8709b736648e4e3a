//! Method signature lookup
//!
//! Resolution is an external concern: the naming engine only asks for the
//! formal parameter names of a referenced method and treats a failed lookup as
//! "no information".

use super::node::MethodRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolved signature of a method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    /// Instance method; the receiver occupies argument 0 at call sites
    #[serde(default)]
    pub has_this: bool,
    /// Formal parameter names in order; may contain empty names
    #[serde(default)]
    pub parameters: Vec<String>,
}

impl MethodSignature {
    pub fn new(has_this: bool, parameters: &[&str]) -> Self {
        Self {
            has_this,
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Turns a method reference into its signature when possible
///
/// Resolvers are shared read-only between procedures named in parallel.
pub trait SymbolResolver: Sync {
    fn resolve_method(&self, method: &MethodRef) -> Option<MethodSignature>;
}

/// Resolver that never resolves anything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullResolver;

impl SymbolResolver for NullResolver {
    fn resolve_method(&self, _method: &MethodRef) -> Option<MethodSignature> {
        None
    }
}

/// In-memory signature table keyed by method reference
#[derive(Debug, Default, Clone)]
pub struct MethodTable {
    methods: HashMap<MethodRef, MethodSignature>,
}

impl MethodTable {
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl FromIterator<(MethodRef, MethodSignature)> for MethodTable {
    fn from_iter<T: IntoIterator<Item = (MethodRef, MethodSignature)>>(iter: T) -> Self {
        Self {
            methods: iter.into_iter().collect(),
        }
    }
}

impl SymbolResolver for MethodTable {
    fn resolve_method(&self, method: &MethodRef) -> Option<MethodSignature> {
        self.methods.get(method).cloned()
    }
}
