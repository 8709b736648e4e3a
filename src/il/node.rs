//! Operation tree
//!
//! A procedure body is a tree of [`Node`]s. Each node carries an [`OpCode`],
//! an optional [`Operand`] payload and its ordered argument nodes. Statement
//! containers (blocks, loops, conditionals) use the same shape: a `WhileLoop`
//! node keeps its condition as the first argument and its body statements
//! after it; an `IfElse` node holds the condition and two blocks.

use super::slot::SlotId;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Closed set of operation kinds understood by the naming heuristics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpCode {
    // Structure
    Block,
    WhileLoop,
    IfElse,
    Nop,

    // Slots
    LoadLocal,
    LoadLocalAddress,
    StoreLocal,

    // Fields
    LoadField,
    LoadStaticField,
    StoreField,
    StoreStaticField,

    // Calls
    Call,
    CallVirtual,
    CallGetter,
    CallVirtualGetter,
    CallSetter,
    CallVirtualSetter,
    NewObject,

    // Control transfer
    Return,
    Throw,

    // Logic
    LogicNot,
    LogicAnd,
    LogicOr,

    // Comparison
    CompareEqual,
    CompareLessThan,
    CompareLessThanUnsigned,
    CompareGreaterThan,
    CompareGreaterThanUnsigned,
    CompareLessOrEqual,
    CompareLessOrEqualUnsigned,
    CompareGreaterOrEqual,
    CompareGreaterOrEqualUnsigned,

    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Negate,

    // Constants
    LoadConstant,
    LoadNull,
}

impl OpCode {
    /// Statement containers; they hold nodes but never consume values
    pub fn is_structure(&self) -> bool {
        matches!(self, OpCode::Block | OpCode::WhileLoop | OpCode::IfElse)
    }

    /// Ordered relational comparisons (`<`, `>`, `<=`, `>=`, signed or not)
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            OpCode::CompareLessThan
                | OpCode::CompareLessThanUnsigned
                | OpCode::CompareGreaterThan
                | OpCode::CompareGreaterThanUnsigned
                | OpCode::CompareLessOrEqual
                | OpCode::CompareLessOrEqualUnsigned
                | OpCode::CompareGreaterOrEqual
                | OpCode::CompareGreaterOrEqualUnsigned
        )
    }

    pub fn is_field_load(&self) -> bool {
        matches!(self, OpCode::LoadField | OpCode::LoadStaticField)
    }

    pub fn is_field_store(&self) -> bool {
        matches!(self, OpCode::StoreField | OpCode::StoreStaticField)
    }

    /// Calls whose result can be stored into a slot
    pub fn is_value_call(&self) -> bool {
        matches!(
            self,
            OpCode::Call | OpCode::CallVirtual | OpCode::CallGetter | OpCode::CallVirtualGetter
        )
    }

    /// Every node kind that invokes a method with positional arguments
    pub fn is_invocation(&self) -> bool {
        matches!(
            self,
            OpCode::Call
                | OpCode::CallVirtual
                | OpCode::CallGetter
                | OpCode::CallVirtualGetter
                | OpCode::CallSetter
                | OpCode::CallVirtualSetter
                | OpCode::NewObject
        )
    }
}

/// Reference to a field or other data member
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldRef {
    #[serde(default)]
    pub declaring_type: String,
    pub name: String,
}

impl FieldRef {
    pub fn new(declaring_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            name: name.into(),
        }
    }
}

/// Reference to a method as it appears at a call site
///
/// The parameter count belongs to the reference itself and is known even when
/// the method cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodRef {
    #[serde(default)]
    pub declaring_type: String,
    pub name: String,
    #[serde(default)]
    pub parameter_count: usize,
}

impl MethodRef {
    pub fn new(
        declaring_type: impl Into<String>,
        name: impl Into<String>,
        parameter_count: usize,
    ) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            name: name.into(),
            parameter_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// Payload carried by a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    Slot(SlotId),
    Field(FieldRef),
    Method(MethodRef),
    Literal(Literal),
}

/// A single operation in the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub code: OpCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operand: Option<Operand>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Node>,
}

impl Node {
    pub fn new(code: OpCode, operand: Option<Operand>, args: Vec<Node>) -> Self {
        Self {
            code,
            operand,
            args,
        }
    }

    pub fn block(statements: Vec<Node>) -> Self {
        Self::new(OpCode::Block, None, statements)
    }

    /// `while (condition) { body }`
    pub fn while_loop(condition: Node, body: Vec<Node>) -> Self {
        let mut args = Vec::with_capacity(body.len() + 1);
        args.push(condition);
        args.extend(body);
        Self::new(OpCode::WhileLoop, None, args)
    }

    /// `if (condition) { then } else { otherwise }`
    pub fn if_else(condition: Node, then: Vec<Node>, otherwise: Vec<Node>) -> Self {
        Self::new(
            OpCode::IfElse,
            None,
            vec![condition, Node::block(then), Node::block(otherwise)],
        )
    }

    pub fn load_local(slot: SlotId) -> Self {
        Self::new(OpCode::LoadLocal, Some(Operand::Slot(slot)), Vec::new())
    }

    pub fn store_local(slot: SlotId, value: Node) -> Self {
        Self::new(OpCode::StoreLocal, Some(Operand::Slot(slot)), vec![value])
    }

    pub fn load_field(field: FieldRef, target: Node) -> Self {
        Self::new(OpCode::LoadField, Some(Operand::Field(field)), vec![target])
    }

    pub fn load_static_field(field: FieldRef) -> Self {
        Self::new(OpCode::LoadStaticField, Some(Operand::Field(field)), Vec::new())
    }

    pub fn store_field(field: FieldRef, target: Node, value: Node) -> Self {
        Self::new(
            OpCode::StoreField,
            Some(Operand::Field(field)),
            vec![target, value],
        )
    }

    pub fn store_static_field(field: FieldRef, value: Node) -> Self {
        Self::new(
            OpCode::StoreStaticField,
            Some(Operand::Field(field)),
            vec![value],
        )
    }

    /// Any invocation kind; instance calls pass the receiver as the first argument
    pub fn invoke(code: OpCode, method: MethodRef, args: Vec<Node>) -> Self {
        Self::new(code, Some(Operand::Method(method)), args)
    }

    pub fn call(method: MethodRef, args: Vec<Node>) -> Self {
        Self::invoke(OpCode::Call, method, args)
    }

    pub fn call_virtual(method: MethodRef, args: Vec<Node>) -> Self {
        Self::invoke(OpCode::CallVirtual, method, args)
    }

    pub fn new_object(constructor: MethodRef, args: Vec<Node>) -> Self {
        Self::invoke(OpCode::NewObject, constructor, args)
    }

    pub fn ret(value: Option<Node>) -> Self {
        Self::new(OpCode::Return, None, value.into_iter().collect())
    }

    pub fn logic_not(operand: Node) -> Self {
        Self::new(OpCode::LogicNot, None, vec![operand])
    }

    pub fn compare(code: OpCode, left: Node, right: Node) -> Self {
        Self::new(code, None, vec![left, right])
    }

    pub fn binary(code: OpCode, left: Node, right: Node) -> Self {
        Self::new(code, None, vec![left, right])
    }

    pub fn constant(literal: Literal) -> Self {
        Self::new(OpCode::LoadConstant, Some(Operand::Literal(literal)), Vec::new())
    }

    pub fn int(value: i64) -> Self {
        Self::constant(Literal::Int(value))
    }

    pub fn slot(&self) -> Option<SlotId> {
        match &self.operand {
            Some(Operand::Slot(slot)) => Some(*slot),
            _ => None,
        }
    }

    pub fn field(&self) -> Option<&FieldRef> {
        match &self.operand {
            Some(Operand::Field(field)) => Some(field),
            _ => None,
        }
    }

    pub fn method(&self) -> Option<&MethodRef> {
        match &self.operand {
            Some(Operand::Method(method)) => Some(method),
            _ => None,
        }
    }

    /// Is this node a direct read of `slot`
    pub fn is_load_of(&self, slot: SlotId) -> bool {
        self.code == OpCode::LoadLocal && self.slot() == Some(slot)
    }

    /// Is this node a write into `slot`
    pub fn is_store_to(&self, slot: SlotId) -> bool {
        self.code == OpCode::StoreLocal && self.slot() == Some(slot)
    }

    /// Condition of a `WhileLoop` node
    pub fn loop_condition(&self) -> Option<&Node> {
        match self.code {
            OpCode::WhileLoop => self.args.first(),
            _ => None,
        }
    }

    /// Pre-order walk over this node and everything below it
    ///
    /// The iterator is lazy and borrows the tree; call again to restart.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Pre-order walk restricted to one operation kind
    pub fn nodes_with_code(&self, code: OpCode) -> impl Iterator<Item = &Node> + '_ {
        self.descendants().filter(move |node| node.code == code)
    }

    /// Check that operands match their opcode family and slot references are in range
    pub fn check_shape(&self, slot_count: usize) -> Result<()> {
        for node in self.descendants() {
            if node.code == OpCode::WhileLoop && node.args.is_empty() {
                return Err(Error::InvalidProcedure {
                    message: "WhileLoop node has no condition".to_string(),
                });
            }
            let expected = match node.code {
                OpCode::LoadLocal | OpCode::LoadLocalAddress | OpCode::StoreLocal => "slot",
                code if code.is_field_load() || code.is_field_store() => "field",
                code if code.is_invocation() => "method",
                OpCode::LoadConstant => "literal",
                _ => continue,
            };
            let matches = match (&node.operand, expected) {
                (Some(Operand::Slot(slot)), "slot") => {
                    if slot.index() >= slot_count {
                        return Err(Error::InvalidProcedure {
                            message: format!(
                                "{:?} references slot {} but the procedure has {} slots",
                                node.code,
                                slot.index(),
                                slot_count
                            ),
                        });
                    }
                    true
                }
                (Some(Operand::Field(_)), "field")
                | (Some(Operand::Method(_)), "method")
                | (Some(Operand::Literal(_)), "literal") => true,
                _ => false,
            };
            if !matches {
                return Err(Error::InvalidProcedure {
                    message: format!("{:?} node requires a {} operand", node.code, expected),
                });
            }
        }
        Ok(())
    }
}

/// Lazy pre-order traversal produced by [`Node::descendants`]
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.args.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Node {
        Node::block(vec![
            Node::store_local(SlotId(0), Node::int(0)),
            Node::while_loop(
                Node::compare(
                    OpCode::CompareLessThan,
                    Node::load_local(SlotId(0)),
                    Node::int(10),
                ),
                vec![Node::store_local(
                    SlotId(0),
                    Node::binary(OpCode::Add, Node::load_local(SlotId(0)), Node::int(1)),
                )],
            ),
        ])
    }

    #[test]
    fn test_descendants_preorder() {
        let tree = sample_tree();
        let codes: Vec<OpCode> = tree.descendants().map(|node| node.code).collect();
        assert_eq!(
            codes,
            vec![
                OpCode::Block,
                OpCode::StoreLocal,
                OpCode::LoadConstant,
                OpCode::WhileLoop,
                OpCode::CompareLessThan,
                OpCode::LoadLocal,
                OpCode::LoadConstant,
                OpCode::StoreLocal,
                OpCode::Add,
                OpCode::LoadLocal,
                OpCode::LoadConstant,
            ]
        );
    }

    #[test]
    fn test_traversal_is_restartable() {
        let tree = sample_tree();
        let first = tree.nodes_with_code(OpCode::LoadLocal).count();
        let second = tree.nodes_with_code(OpCode::LoadLocal).count();
        assert_eq!(first, 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_loop_condition() {
        let tree = sample_tree();
        let loop_node = tree.nodes_with_code(OpCode::WhileLoop).next().unwrap();
        assert_eq!(
            loop_node.loop_condition().map(|c| c.code),
            Some(OpCode::CompareLessThan)
        );
        assert!(tree.loop_condition().is_none());
    }

    #[test]
    fn test_check_shape_rejects_out_of_range_slot() {
        let tree = sample_tree();
        assert!(tree.check_shape(1).is_ok());
        assert!(matches!(
            tree.check_shape(0),
            Err(Error::InvalidProcedure { .. })
        ));
    }

    #[test]
    fn test_check_shape_rejects_missing_operand() {
        let tree = Node::new(OpCode::Call, None, Vec::new());
        assert!(tree.check_shape(0).is_err());
    }
}
