use crate::index::aggregate::Aggregator;
use crate::index::types::{compare_keys, compare_values, Entry, Index, ValueRefs};

/// Sorts an aggregator's contents into a complete, invariant-respecting
/// `Index`: entries ascending by `(path, type)`, and each entry's
/// value-refs ascending by typed value.
pub fn build_index(aggregator: Aggregator) -> Index {
    let mut entries: Vec<Entry> = aggregator
        .into_inner()
        .into_iter()
        .map(|((path, value_type), value_map)| {
            let mut value_refs: Vec<ValueRefs> = value_map
                .into_iter()
                .map(|(key, mut doc_ids)| {
                    doc_ids.sort_unstable();
                    doc_ids.dedup();
                    ValueRefs { value: key.0, doc_ids }
                })
                .collect();
            value_refs.sort_by(|a, b| compare_values(&a.value, &b.value));
            Entry { path, value_type, value_refs }
        })
        .collect();

    entries.sort_by(|a, b| compare_keys(&a.path, a.value_type, &b.path, b.value_type));

    Index { entries }
}
