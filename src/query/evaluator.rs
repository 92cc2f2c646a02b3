use crate::bitset::DocumentSet;
use crate::core::error::{Error, ErrorKind, Result};
use crate::index::types::{DocId, Index, Value, ValueType};
use crate::query::ast::{Instruction, Op, Program};

/// Runs a program against an index and returns the ascending list of
/// matching document ids. The stack is explicit: no instruction is
/// evaluated by recursion.
pub fn evaluate(index: &Index, program: &Program) -> Result<Vec<DocId>> {
    let mut stack: Vec<DocumentSet> = Vec::new();

    for instruction in program {
        match instruction {
            Instruction::Push { key, op, value } => {
                stack.push(lookup(index, key, *op, value));
            }
            Instruction::And { key, op, value } => {
                let rhs = lookup(index, key, *op, value);
                let top = stack
                    .last_mut()
                    .ok_or_else(|| Error::new(ErrorKind::QueryEval, "AND instruction with empty stack"))?;
                *top = top.intersect(&rhs);
            }
            Instruction::Or { key, op, value } => {
                let rhs = lookup(index, key, *op, value);
                let top = stack
                    .last_mut()
                    .ok_or_else(|| Error::new(ErrorKind::QueryEval, "OR instruction with empty stack"))?;
                *top = top.union(&rhs);
            }
        }
    }

    match stack.len() {
        1 => Ok(stack.pop().unwrap().enumerate()),
        // A query with no WHERE clause parses to an empty program; there is
        // no predicate to look up, so it matches no documents rather than
        // being an evaluator error.
        0 if program.is_empty() => Ok(Vec::new()),
        n => Err(Error::new(ErrorKind::QueryEval, format!("program terminated with {n} elements on the stack, expected 1"))),
    }
}

/// Looks up the posting set for one predicate. Absent paths, absent values,
/// and unsupported operators are not errors: they resolve to the empty set
/// so boolean composition stays total.
fn lookup(index: &Index, key: &str, op: Op, value: &Value) -> DocumentSet {
    if op != Op::Eq {
        return DocumentSet::new();
    }
    let Some(entry) = index.find_entry(key, value.value_type()) else {
        return DocumentSet::new();
    };
    let Some(value_refs) = entry.find_value_refs(value) else {
        return DocumentSet::new();
    };
    DocumentSet::from_doc_ids(value_refs.doc_ids.iter().copied())
}

/// Looks up the posting list for a Null predicate directly: the single
/// value-refs of a Null entry, verbatim, with no set composition involved.
pub fn query_for_null(index: &Index, key: &str) -> Vec<DocId> {
    index
        .find_entry(key, ValueType::Null)
        .map(|entry| entry.value_refs[0].doc_ids.clone())
        .unwrap_or_default()
}
