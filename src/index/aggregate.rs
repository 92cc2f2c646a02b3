use std::collections::HashMap;

use crate::index::types::{DocId, Value, ValueKey, ValueType};

/// Collapses flattened `(path, type) -> value` pairs across documents into
/// posting lists keyed by `(path, type, value)`. Document ids must be fed
/// in strictly increasing order (true of `IndexFiles`' caller-supplied
/// listing); posting lists then end up sorted without a separate sort pass.
#[derive(Debug, Default)]
pub struct Aggregator {
    by_key: HashMap<(String, ValueType), HashMap<ValueKey, Vec<DocId>>>,
}

impl Aggregator {
    pub fn new() -> Self {
        Aggregator { by_key: HashMap::new() }
    }

    /// Fold one document's flattened pairs into the running aggregation.
    pub fn add_document(&mut self, doc_id: DocId, flattened: HashMap<(String, ValueType), Value>) {
        for ((path, value_type), value) in flattened {
            self.by_key
                .entry((path, value_type))
                .or_default()
                .entry(ValueKey(value))
                .or_default()
                .push(doc_id);
        }
    }

    pub fn into_inner(self) -> HashMap<(String, ValueType), HashMap<ValueKey, Vec<DocId>>> {
        self.by_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::flatten::flatten;
    use serde_json::json;

    #[test]
    fn posting_lists_end_sorted_without_explicit_sort() {
        let mut agg = Aggregator::new();
        agg.add_document(0, flatten(&json!({"age": 17})));
        agg.add_document(1, flatten(&json!({"age": 17})));
        agg.add_document(2, flatten(&json!({"age": 17})));

        let inner = agg.into_inner();
        let value_map = &inner[&("/age".to_string(), ValueType::Float)];
        let (_value, doc_ids) = value_map.iter().next().unwrap();
        assert_eq!(doc_ids, &vec![0, 1, 2]);
    }

    #[test]
    fn distinct_values_get_distinct_posting_lists() {
        let mut agg = Aggregator::new();
        agg.add_document(0, flatten(&json!({"age": 23})));
        agg.add_document(1, flatten(&json!({"age": 17})));

        let inner = agg.into_inner();
        let value_map = &inner[&("/age".to_string(), ValueType::Float)];
        assert_eq!(value_map.len(), 2);
    }
}
