pub mod aggregate;
pub mod builder;
pub mod codec;
pub mod flatten;
pub mod types;

pub use builder::build_index;
pub use types::{DocId, Entry, Index, Value, ValueRefs, ValueType};
