//! Name proposals from the places a slot is written and read
//!
//! Two passes run over the operation tree. The write-site pass looks at the
//! values stored into the slot (field loads, accessor calls); the read-site
//! pass looks at what consumes the slot (field stores, setters, call parameters,
//! `return`); blocks, loops and conditionals are not consumers. Each pass only proposes a name when all of its sites agree on
//! exactly one distinct proposal; a site that proposes nothing still counts as
//! a distinct proposal.

use super::identifier::clean_up_name;
use crate::il::{Node, OpCode, SlotId, SymbolResolver};
use std::collections::HashSet;

/// Stem used for slots that are returned
pub const RETURN_VALUE_STEM: &str = "result";

/// Read-only view of one procedure used to derive contextual names
pub struct UsageContext<'a> {
    body: &'a Node,
    field_names: &'a HashSet<String>,
    resolver: &'a dyn SymbolResolver,
}

impl<'a> UsageContext<'a> {
    pub fn new(
        body: &'a Node,
        field_names: &'a HashSet<String>,
        resolver: &'a dyn SymbolResolver,
    ) -> Self {
        Self {
            body,
            field_names,
            resolver,
        }
    }

    /// Name proposed by the values stored into `slot`
    pub fn propose_from_stores(&self, slot: SlotId) -> Option<String> {
        let proposals = self
            .body
            .descendants()
            .filter(|node| node.is_store_to(slot))
            .map(|store| store.args.first().and_then(name_from_value));
        self.single_proposal(proposals)
    }

    /// Name proposed by the operations that consume `slot`
    ///
    /// Statement containers are not consumers: a slot used directly as a loop
    /// or branch condition contributes no proposal at all.
    pub fn propose_from_loads(&self, slot: SlotId) -> Option<String> {
        let consumers = self
            .body
            .descendants()
            .filter(|parent| !parent.code.is_structure());
        let proposals = consumers.flat_map(move |parent| {
            parent
                .args
                .iter()
                .enumerate()
                .filter(move |(_, arg)| arg.is_load_of(slot))
                .map(move |(index, _)| self.name_for_argument(parent, index))
        });
        self.single_proposal(proposals)
    }

    /// Deduplicate proposals, drop those that would shadow a field, and keep
    /// the result only when exactly one remains
    fn single_proposal(&self, proposals: impl Iterator<Item = Option<String>>) -> Option<String> {
        let mut distinct: Vec<Option<String>> = Vec::new();
        for proposal in proposals {
            if let Some(name) = &proposal {
                if self.field_names.contains(name) {
                    continue;
                }
            }
            if !distinct.contains(&proposal) {
                distinct.push(proposal);
            }
        }
        log::trace!("usage proposals: {:?}", distinct);
        match distinct.len() {
            1 => distinct.pop().flatten(),
            _ => None,
        }
    }

    /// Name suggested by the `index`-th argument position of `parent`
    fn name_for_argument(&self, parent: &Node, index: usize) -> Option<String> {
        let is_last = index + 1 == parent.args.len();
        match parent.code {
            code if code.is_field_store() => {
                if is_last {
                    parent.field().map(|field| clean_up_name(&field.name))
                } else {
                    None
                }
            }
            code if code.is_invocation() => {
                let method = parent.method()?;
                if method.parameter_count == 1 && is_last {
                    if let Some(property) = strip_accessor_prefix(&method.name, "set") {
                        return Some(clean_up_name(property));
                    }
                }
                let signature = self.resolver.resolve_method(method)?;
                let position = if code != OpCode::NewObject && signature.has_this {
                    index.checked_sub(1)?
                } else {
                    index
                };
                signature
                    .parameters
                    .get(position)
                    .filter(|name| !name.is_empty())
                    .map(|name| clean_up_name(name))
            }
            OpCode::Return => Some(RETURN_VALUE_STEM.to_string()),
            _ => None,
        }
    }
}

/// Name suggested by a value that is stored into a slot
fn name_from_value(value: &Node) -> Option<String> {
    match value.code {
        code if code.is_field_load() => value.field().map(|field| clean_up_name(&field.name)),
        code if code.is_value_call() => {
            let method = value.method()?;
            if method.parameter_count == 0 {
                if let Some(property) = strip_prefix_ignore_case(&method.name, "get_") {
                    // properties, not indexers
                    return Some(clean_up_name(property));
                }
            }
            strip_pascal_prefix(&method.name, "Get").map(clean_up_name)
        }
        _ => None,
    }
}

/// `set_Name` / `SetName` style accessors for the given verb
fn strip_accessor_prefix<'n>(name: &'n str, verb: &str) -> Option<&'n str> {
    strip_prefix_ignore_case(name, &format!("{}_", verb))
        .or_else(|| strip_pascal_prefix(name, verb))
}

/// `GetName` -> `Name`; the prefix matches case-insensitively but must be
/// followed by an upper-case letter
fn strip_pascal_prefix<'n>(name: &'n str, prefix: &str) -> Option<&'n str> {
    let rest = strip_prefix_ignore_case(name, prefix)?;
    match rest.chars().next() {
        Some(first) if first.is_uppercase() => Some(rest),
        _ => None,
    }
}

fn strip_prefix_ignore_case<'n>(name: &'n str, prefix: &str) -> Option<&'n str> {
    let head = name.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&name[prefix.len()..])
    } else {
        None
    }
}
