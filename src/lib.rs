pub mod bitset;
pub mod core;
pub mod index;
pub mod query;
pub mod store;

pub use core::config::Config;
pub use core::error::{Error, ErrorKind, Result};
pub use index::Index;
pub use store::{index_files, query_index, read_index, save_index};
