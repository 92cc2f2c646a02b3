use crate::index::types::Value;

/// A predicate comparison operator. Only `Eq` is evaluated; `Gt` and
/// `Lt` tokenize and parse but always look up as an empty posting set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Gt,
    Lt,
}

/// One stack-machine instruction. `key` is always the fully slash-prefixed
/// path (e.g. `/social/twitter`), already stripped of the container alias.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Push { key: String, op: Op, value: Value },
    And { key: String, op: Op, value: Value },
    Or { key: String, op: Op, value: Value },
}

/// A flat, left-to-right program with no operator precedence: `A AND B OR C`
/// parses to `[Push(A), And(B), Or(C)]` and evaluates strictly in order.
pub type Program = Vec<Instruction>;
