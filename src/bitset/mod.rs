pub mod bitset;
pub mod document_set;
pub mod two_level;

pub use bitset::Bitset;
pub use document_set::DocumentSet;
pub use two_level::TwoLevelBitset;
