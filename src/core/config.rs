use std::path::PathBuf;

use crate::core::error::Result;
use crate::index::Index;

/// Where this store's on-disk `INDEX` file lives.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage_path: PathBuf,
}

impl Config {
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        Config { storage_path: storage_path.into() }
    }

    /// Reads back the `INDEX` file under `storage_path`.
    pub fn read_index(&self) -> Result<Index> {
        crate::store::read_index(&self.storage_path)
    }

    /// Writes `index` to `storage_path`, creating or overwriting `INDEX`.
    pub fn save_index(&self, index: &Index) -> Result<()> {
        crate::store::save_index(index, &self.storage_path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config { storage_path: PathBuf::from("./db") }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::flatten::flatten;
    use crate::index::{aggregate::Aggregator, builder::build_index};
    use serde_json::json;

    #[test]
    fn round_trips_through_storage_path() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::new(tmp.path());

        let mut agg = Aggregator::new();
        agg.add_document(0, flatten(&json!({"age": 23})));
        let index = build_index(agg);

        config.save_index(&index).unwrap();
        assert_eq!(config.read_index().unwrap(), index);
    }
}
