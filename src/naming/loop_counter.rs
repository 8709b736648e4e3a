//! Loop-counter recognition
//!
//! A 32-bit integer slot that appears as the left operand of the relational
//! test of some `while` loop is treated as a counter and offered one of the
//! letters `i` through `n`.

use super::ledger::NameLedger;
use crate::il::{Node, OpCode, SlotId, TypeSig};

/// Is `slot` tested as a counter by any loop in `body`
pub fn is_loop_counter(body: &Node, slot: SlotId, ty: &TypeSig) -> bool {
    if !ty.is_int32() {
        return false;
    }
    body.nodes_with_code(OpCode::WhileLoop)
        .filter_map(Node::loop_condition)
        .any(|condition| compares_slot(condition, slot))
}

/// Letter proposed for a counter, or `None` once `i..=n` are all taken
pub fn propose_counter_letter(ledger: &NameLedger) -> Option<String> {
    ledger.next_loop_letter().map(|letter| letter.to_string())
}

fn compares_slot(condition: &Node, slot: SlotId) -> bool {
    let mut test = Some(condition);
    while let Some(node) = test {
        if node.code != OpCode::LogicNot {
            break;
        }
        test = node.args.first();
    }
    match test {
        Some(node) if node.code.is_relational() => node
            .args
            .first()
            .map_or(false, |left| left.is_load_of(slot)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::il::BuiltinType;

    fn int32() -> TypeSig {
        TypeSig::Builtin(BuiltinType::Int32)
    }

    fn counting_loop(code: OpCode, slot: SlotId) -> Node {
        Node::while_loop(
            Node::compare(code, Node::load_local(slot), Node::int(10)),
            Vec::new(),
        )
    }

    #[test]
    fn test_every_relational_operator_marks_counter() {
        for code in [
            OpCode::CompareLessThan,
            OpCode::CompareLessThanUnsigned,
            OpCode::CompareGreaterThan,
            OpCode::CompareGreaterThanUnsigned,
            OpCode::CompareLessOrEqual,
            OpCode::CompareLessOrEqualUnsigned,
            OpCode::CompareGreaterOrEqual,
            OpCode::CompareGreaterOrEqualUnsigned,
        ] {
            let body = Node::block(vec![counting_loop(code, SlotId(0))]);
            assert!(is_loop_counter(&body, SlotId(0), &int32()), "{:?}", code);
        }
    }

    #[test]
    fn test_equality_is_not_a_counter_test() {
        let body = counting_loop(OpCode::CompareEqual, SlotId(0));
        assert!(!is_loop_counter(&body, SlotId(0), &int32()));
    }

    #[test]
    fn test_negated_condition_is_unwrapped() {
        let body = Node::while_loop(
            Node::logic_not(Node::logic_not(Node::compare(
                OpCode::CompareGreaterOrEqual,
                Node::load_local(SlotId(2)),
                Node::int(0),
            ))),
            Vec::new(),
        );
        assert!(is_loop_counter(&body, SlotId(2), &int32()));
    }

    #[test]
    fn test_right_operand_does_not_count() {
        let body = Node::while_loop(
            Node::compare(
                OpCode::CompareLessThan,
                Node::int(0),
                Node::load_local(SlotId(0)),
            ),
            Vec::new(),
        );
        assert!(!is_loop_counter(&body, SlotId(0), &int32()));
    }

    #[test]
    fn test_only_int32_slots_qualify() {
        let body = counting_loop(OpCode::CompareLessThan, SlotId(0));
        assert!(!is_loop_counter(
            &body,
            SlotId(0),
            &TypeSig::Builtin(BuiltinType::Int64)
        ));
    }

    #[test]
    fn test_letters_skip_reserved() {
        let mut ledger = NameLedger::new();
        assert_eq!(propose_counter_letter(&ledger).as_deref(), Some("i"));
        ledger.reserve("i");
        ledger.reserve("j");
        assert_eq!(propose_counter_letter(&ledger).as_deref(), Some("k"));
        for letter in ["k", "l", "m", "n"] {
            ledger.reserve(letter);
        }
        assert_eq!(propose_counter_letter(&ledger), None);
    }
}
