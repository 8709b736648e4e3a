//! Variable naming for one procedure body
//!
//! [`VariableNamer`] owns a fresh [`NameLedger`] and walks a procedure in three
//! steps:
//!
//! 1. reserve everything that is already fixed (context names, parameter
//!    names, names of decompiler-generated slots),
//! 2. adopt usable debug-symbol names,
//! 3. synthesize names for the remaining slots, parameters first, trying the
//!    loop-counter, usage-context and type heuristics in that order.
//!
//! Every name goes through the ledger before the next slot is processed, so
//! later slots see earlier allocations.

use super::debug_names::eligible_debug_name;
use super::identifier::{is_valid_identifier, FALLBACK_STEM};
use super::ledger::{split_name, NameLedger};
use super::loop_counter::{is_loop_counter, propose_counter_letter};
use super::reserved::CSHARP_KEYWORDS;
use super::settings::NamingSettings;
use super::type_namer::name_for_type;
use super::usage_context::UsageContext;
use crate::il::{NullResolver, Procedure, Slot, SlotId, SymbolResolver};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Everything outside the procedure that influences naming
pub struct NamingContext<'a> {
    /// Fields of the enclosing type; contextual names must not shadow them
    pub field_names: HashSet<String>,
    /// Names synthesized identifiers must avoid (keywords, existing names)
    pub reserved_names: Vec<String>,
    pub settings: NamingSettings,
    pub resolver: &'a dyn SymbolResolver,
}

impl<'a> NamingContext<'a> {
    pub fn new(resolver: &'a dyn SymbolResolver) -> Self {
        Self {
            field_names: HashSet::new(),
            reserved_names: Vec::new(),
            settings: NamingSettings::default(),
            resolver,
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_names.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn with_reserved<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Reserve the C# keyword set
    pub fn with_keywords(self) -> Self {
        self.with_reserved(CSHARP_KEYWORDS.iter().copied())
    }

    pub fn with_settings(mut self, settings: NamingSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl Default for NamingContext<'static> {
    fn default() -> Self {
        NamingContext::new(&NullResolver)
    }
}

/// Which rule produced a slot's name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NameSource {
    DebugSymbol,
    LoopCounter,
    StoreContext,
    LoadContext,
    TypeFallback,
}

impl fmt::Display for NameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NameSource::DebugSymbol => "debug symbol",
            NameSource::LoopCounter => "loop counter",
            NameSource::StoreContext => "stored value",
            NameSource::LoadContext => "consumer",
            NameSource::TypeFallback => "type",
        };
        f.write_str(label)
    }
}

/// A name written into a slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedSlot {
    pub slot: SlotId,
    pub name: String,
    pub source: NameSource,
}

/// Names assigned during one invocation, in assignment order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NamingReport {
    pub procedure: String,
    pub assignments: Vec<NamedSlot>,
}

impl NamingReport {
    pub fn name_of(&self, slot: SlotId) -> Option<&str> {
        self.find(slot).map(|named| named.name.as_str())
    }

    pub fn source_of(&self, slot: SlotId) -> Option<NameSource> {
        self.find(slot).map(|named| named.source)
    }

    fn find(&self, slot: SlotId) -> Option<&NamedSlot> {
        self.assignments.iter().find(|named| named.slot == slot)
    }
}

/// Assigns names to the slots of a single procedure
pub struct VariableNamer<'c, 'a> {
    context: &'c NamingContext<'a>,
    ledger: NameLedger,
}

impl<'c, 'a> VariableNamer<'c, 'a> {
    pub fn new(context: &'c NamingContext<'a>) -> Self {
        Self {
            context,
            ledger: NameLedger::new(),
        }
    }

    /// Name every unnamed slot of `procedure` in place
    ///
    /// The namer is consumed: its ledger belongs to this one procedure.
    pub fn assign_names(mut self, procedure: &mut Procedure) -> NamingReport {
        let mut report = NamingReport {
            procedure: procedure.name.clone(),
            assignments: Vec::new(),
        };

        self.reserve_existing(procedure);
        self.adopt_debug_names(procedure, &mut report);

        let order: Vec<SlotId> = procedure
            .parameters()
            .chain(procedure.locals())
            .collect();
        let context = self.context;
        let Procedure { slots, body, .. } = procedure;
        let body = &*body;
        let usage = UsageContext::new(body, &context.field_names, context.resolver);

        for id in order {
            let slot = &slots[id.index()];
            if slot.assigned_name().is_some() {
                continue;
            }

            let (stem, source) = if is_loop_counter(body, id, &slot.ty) {
                match propose_counter_letter(&self.ledger) {
                    Some(letter) => (letter, NameSource::LoopCounter),
                    None => (type_stem(slot), NameSource::TypeFallback),
                }
            } else {
                usage
                    .propose_from_stores(id)
                    .and_then(accept_candidate)
                    .map(|stem| (stem, NameSource::StoreContext))
                    .or_else(|| {
                        usage
                            .propose_from_loads(id)
                            .and_then(accept_candidate)
                            .map(|stem| (stem, NameSource::LoadContext))
                    })
                    .unwrap_or_else(|| (type_stem(slot), NameSource::TypeFallback))
            };

            let name = self.ledger.allocate(&stem);
            log::debug!("{}: {} named {} ({})", report.procedure, id, name, source);
            slots[id.index()].name = Some(name.clone());
            report.assignments.push(NamedSlot {
                slot: id,
                name,
                source,
            });
        }

        report
    }

    fn reserve_existing(&mut self, procedure: &Procedure) {
        for name in &self.context.reserved_names {
            self.ledger.reserve(name);
        }
        for slot in &procedure.slots {
            if slot.is_parameter() || slot.is_generated {
                if let Some(name) = slot.assigned_name() {
                    self.ledger.reserve(name);
                }
            }
        }
    }

    fn adopt_debug_names(&mut self, procedure: &mut Procedure, report: &mut NamingReport) {
        for (index, slot) in procedure.slots.iter_mut().enumerate() {
            if slot.is_generated {
                continue;
            }
            if !slot.is_parameter() {
                // locals are always renamed
                slot.name = None;
            }
            if slot.assigned_name().is_some() {
                continue;
            }
            let Some(debug_name) =
                eligible_debug_name(slot.debug_name.as_deref(), &self.context.settings)
            else {
                continue;
            };
            let name = self.ledger.adopt(debug_name);
            log::debug!(
                "{}: slot{} adopts debug name {} as {}",
                report.procedure,
                index,
                debug_name,
                name
            );
            slot.name = Some(name.clone());
            report.assignments.push(NamedSlot {
                slot: SlotId(index),
                name,
                source: NameSource::DebugSymbol,
            });
        }
    }
}

/// Name every unnamed slot of `procedure` with a fresh ledger
pub fn assign_names(procedure: &mut Procedure, context: &NamingContext<'_>) -> NamingReport {
    VariableNamer::new(context).assign_names(procedure)
}

/// Normalize a proposed name to its stem, keeping it only if it is a valid identifier
fn accept_candidate(candidate: String) -> Option<String> {
    let (stem, _) = split_name(&candidate);
    if is_valid_identifier(stem) {
        Some(stem.to_string())
    } else {
        log::trace!("discarding candidate {:?}", candidate);
        None
    }
}

fn type_stem(slot: &Slot) -> String {
    accept_candidate(name_for_type(&slot.ty)).unwrap_or_else(|| FALLBACK_STEM.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::il::{BuiltinType, FieldRef, MethodRef, Node, OpCode, TypeSig};

    fn counter_loop(slot: SlotId, body: Vec<Node>) -> Node {
        Node::while_loop(
            Node::compare(
                OpCode::CompareLessThan,
                Node::load_local(slot),
                Node::int(10),
            ),
            body,
        )
    }

    #[test]
    fn test_parameters_are_named_before_locals() {
        let mut procedure = Procedure::new(
            "Run",
            vec![
                Slot::local(BuiltinType::String),
                Slot::parameter(BuiltinType::String, None),
            ],
            Node::block(Vec::new()),
        );
        let context = NamingContext::default();
        let report = assign_names(&mut procedure, &context);
        assert_eq!(report.name_of(SlotId(1)), Some("text"));
        assert_eq!(report.name_of(SlotId(0)), Some("text2"));
        assert_eq!(report.assignments[0].slot, SlotId(1));
    }

    #[test]
    fn test_declared_parameter_names_are_kept_and_reserved() {
        let mut procedure = Procedure::new(
            "Run",
            vec![
                Slot::parameter(BuiltinType::Int32, Some("num")),
                Slot::local(BuiltinType::Int32),
            ],
            Node::block(Vec::new()),
        );
        let context = NamingContext::default();
        let report = assign_names(&mut procedure, &context);
        assert_eq!(procedure.slots[0].name.as_deref(), Some("num"));
        assert_eq!(report.name_of(SlotId(0)), None);
        assert_eq!(procedure.slots[1].name.as_deref(), Some("num2"));
    }

    #[test]
    fn test_generated_slots_keep_their_names() {
        let mut procedure = Procedure::new(
            "Run",
            vec![
                Slot::generated(BuiltinType::Object, "obj"),
                Slot::local(BuiltinType::Object),
            ],
            Node::block(Vec::new()),
        );
        let context = NamingContext::default();
        assign_names(&mut procedure, &context);
        assert_eq!(procedure.slots[0].name.as_deref(), Some("obj"));
        assert_eq!(procedure.slots[1].name.as_deref(), Some("obj2"));
    }

    #[test]
    fn test_existing_local_names_are_replaced() {
        let mut local = Slot::local(BuiltinType::Boolean);
        local.name = Some("V_0".to_string());
        let mut procedure = Procedure::new("Run", vec![local], Node::block(Vec::new()));
        let context = NamingContext::default();
        assign_names(&mut procedure, &context);
        assert_eq!(procedure.slots[0].name.as_deref(), Some("flag"));
    }

    #[test]
    fn test_debug_names_collide_with_reserved() {
        let mut procedure = Procedure::new(
            "Run",
            vec![
                Slot::parameter(BuiltinType::String, Some("path")),
                Slot::local(BuiltinType::String).with_debug_name("path"),
                Slot::local(BuiltinType::Int32).with_debug_name("V_1"),
            ],
            Node::block(Vec::new()),
        );
        let context = NamingContext::default();
        let report = assign_names(&mut procedure, &context);
        assert_eq!(report.name_of(SlotId(1)), Some("path2"));
        assert_eq!(report.source_of(SlotId(1)), Some(NameSource::DebugSymbol));
        assert_eq!(report.name_of(SlotId(2)), Some("num"));
        assert_eq!(report.source_of(SlotId(2)), Some(NameSource::TypeFallback));
    }

    #[test]
    fn test_debug_names_ignored_when_disabled() {
        let mut procedure = Procedure::new(
            "Run",
            vec![Slot::local(BuiltinType::String).with_debug_name("message")],
            Node::block(Vec::new()),
        );
        let context = NamingContext::default().with_settings(NamingSettings {
            use_debug_symbols: false,
            ..NamingSettings::default()
        });
        assign_names(&mut procedure, &context);
        assert_eq!(procedure.slots[0].name.as_deref(), Some("text"));
    }

    #[test]
    fn test_exhausted_loop_letters_fall_back_to_type() {
        let mut procedure = Procedure::new(
            "Run",
            vec![
                Slot::local(BuiltinType::Int32),
                Slot::local(BuiltinType::Int32),
            ],
            Node::block(vec![
                // the store would suggest "count" if usage context were consulted
                Node::store_local(
                    SlotId(0),
                    Node::call(MethodRef::new("T", "get_Count", 0), Vec::new()),
                ),
                counter_loop(SlotId(0), Vec::new()),
            ]),
        );
        let context = NamingContext::default().with_reserved(["i", "j", "k", "l", "m", "n"]);
        let report = assign_names(&mut procedure, &context);
        assert_eq!(report.name_of(SlotId(0)), Some("num"));
        assert_eq!(report.source_of(SlotId(0)), Some(NameSource::TypeFallback));
        assert_eq!(report.name_of(SlotId(1)), Some("num2"));
    }

    #[test]
    fn test_store_context_wins_over_load_context() {
        let mut procedure = Procedure::new(
            "Run",
            vec![Slot::local(BuiltinType::Int32)],
            Node::block(vec![
                Node::store_local(
                    SlotId(0),
                    Node::load_static_field(FieldRef::new("T", "Limit")),
                ),
                Node::ret(Some(Node::load_local(SlotId(0)))),
            ]),
        );
        let context = NamingContext::default();
        let report = assign_names(&mut procedure, &context);
        assert_eq!(report.name_of(SlotId(0)), Some("limit"));
        assert_eq!(report.source_of(SlotId(0)), Some(NameSource::StoreContext));
    }

    #[test]
    fn test_candidate_digits_are_stripped() {
        let mut procedure = Procedure::new(
            "Run",
            vec![Slot::local(BuiltinType::Int32), Slot::local(BuiltinType::Int32)],
            Node::block(vec![
                Node::store_local(SlotId(0), Node::load_static_field(FieldRef::new("T", "Item2"))),
                Node::store_local(SlotId(1), Node::load_static_field(FieldRef::new("T", "Item2"))),
            ]),
        );
        let context = NamingContext::default();
        assign_names(&mut procedure, &context);
        assert_eq!(procedure.slots[0].name.as_deref(), Some("item"));
        assert_eq!(procedure.slots[1].name.as_deref(), Some("item2"));
    }

    #[test]
    fn test_invalid_candidates_fall_through() {
        let mut procedure = Procedure::new(
            "Run",
            vec![
                Slot::local(TypeSig::named("Demo", "<>c__DisplayClass1")),
                Slot::local(BuiltinType::String),
            ],
            Node::block(vec![
                Node::store_local(
                    SlotId(0),
                    Node::load_static_field(FieldRef::new("T", "<Name>k__BackingField")),
                ),
                Node::store_local(
                    SlotId(1),
                    Node::load_static_field(FieldRef::new("T", "<Title>k__BackingField")),
                ),
                Node::store_field(
                    FieldRef::new("T", "Caption"),
                    Node::load_local(SlotId(9)),
                    Node::load_local(SlotId(1)),
                ),
            ]),
        );
        let context = NamingContext::default();
        let report = assign_names(&mut procedure, &context);
        assert_eq!(report.name_of(SlotId(0)), Some("obj"));
        assert_eq!(report.name_of(SlotId(1)), Some("caption"));
        assert_eq!(report.source_of(SlotId(1)), Some(NameSource::LoadContext));
    }

    #[test]
    fn test_keywords_are_avoided() {
        let mut procedure = Procedure::new(
            "Run",
            vec![Slot::local(BuiltinType::Object)],
            Node::block(vec![Node::store_local(
                SlotId(0),
                Node::call(MethodRef::new("T", "get_Event", 0), Vec::new()),
            )]),
        );
        let context = NamingContext::default().with_keywords();
        assign_names(&mut procedure, &context);
        assert_eq!(procedure.slots[0].name.as_deref(), Some("event2"));
    }
}
