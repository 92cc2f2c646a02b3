use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::Result;
use crate::index::aggregate::Aggregator;
use crate::index::builder::build_index;
use crate::index::codec;
use crate::index::flatten::flatten;
use crate::index::types::{DocId, Index};
use crate::query::ast::Program;
use crate::query::{evaluator, lexer, parser};

const INDEX_FILE_NAME: &str = "INDEX";

/// Reads and indexes each document in `paths`, in order. A path's position
/// in the slice becomes its document id.
pub fn index_files(paths: &[PathBuf]) -> Result<Index> {
    let mut aggregator = Aggregator::new();
    for (doc_id, path) in paths.iter().enumerate() {
        log::debug!("indexing document {doc_id} at {}", path.display());
        let raw = fs::read_to_string(path)?;
        let json = serde_json::from_str(&raw)?;
        aggregator.add_document(doc_id as DocId, flatten(&json));
    }
    let index = build_index(aggregator);
    log::info!("indexed {} documents into {} entries", paths.len(), index.entries.len());
    Ok(index)
}

/// Writes `<dir>/INDEX` as the on-disk index byte stream, creating or
/// overwriting the file with mode 0644.
pub fn save_index(index: &Index, dir: &Path) -> Result<()> {
    let bytes = codec::serialize(index);
    let path = index_path(dir);
    fs::write(&path, bytes)?;
    set_mode_0644(&path)?;
    log::info!("wrote {} entries to {}", index.entries.len(), path.display());
    Ok(())
}

#[cfg(unix)]
fn set_mode_0644(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode_0644(_path: &Path) -> Result<()> {
    Ok(())
}

/// Reads `<dir>/INDEX` and returns the parsed index.
pub fn read_index(dir: &Path) -> Result<Index> {
    let path = index_path(dir);
    let bytes = fs::read(&path)?;
    codec::deserialize(&bytes)
}

/// Parses and evaluates `query`, returning the ascending list of matching
/// document ids.
pub fn query_index(index: &Index, query: &str) -> Result<Vec<DocId>> {
    let tokens = lexer::tokenize(query)?;
    let program: Program = parser::parse(tokens)?;
    evaluator::evaluate(index, &program)
}

fn index_path(dir: &Path) -> PathBuf {
    dir.join(INDEX_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn write_doc(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn indexes_saves_and_reads_back_byte_exact() {
        let tmp = tempfile::tempdir().unwrap();
        let doc0 = write_doc(
            tmp.path(),
            "0.json",
            r#"{"age":23,"name":"Elliot","social":{"twitter":"https://twitter.com","facebook":"https://facebook.com"},"type":"Reader","arr":[2,3],"now null behaves":null}"#,
        );
        let doc1 = write_doc(
            tmp.path(),
            "1.json",
            r#"{"age":17,"name":"Fraser","social":{"twitter":"https://twitter.com","facebook":"https://facebook.com"},"type":"Author"}"#,
        );

        let index = index_files(&[doc0, doc1]).unwrap();
        save_index(&index, tmp.path()).unwrap();
        let reloaded = read_index(tmp.path()).unwrap();
        assert_eq!(reloaded, index);
    }

    #[test]
    fn query_index_runs_and_composition() {
        let tmp = tempfile::tempdir().unwrap();
        let doc0 = write_doc(
            tmp.path(),
            "0.json",
            r#"{"social":{"twitter":"https://twitter.com","facebook":"https://facebook.com"}}"#,
        );
        let doc1 = write_doc(
            tmp.path(),
            "1.json",
            r#"{"social":{"twitter":"https://twitter.com","facebook":"https://facebook.com"}}"#,
        );
        let index = index_files(&[doc0, doc1]).unwrap();

        let query = "SELECT * FROM c WHERE c.social.twitter = 'https://twitter.com' AND c.social.facebook = 'https://facebook.com'";
        assert_eq!(query_index(&index, query).unwrap(), vec![0, 1]);
    }

    #[test]
    fn malformed_document_is_json_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let bad = write_doc(tmp.path(), "0.json", "{not valid json");
        let err = index_files(&[bad]).unwrap_err();
        assert!(matches!(err.kind, crate::core::error::ErrorKind::JsonParse));
    }

    #[test]
    fn read_index_on_missing_directory_is_io_error() {
        let err = read_index(Path::new("/nonexistent/does/not/exist")).unwrap_err();
        assert!(matches!(err.kind, crate::core::error::ErrorKind::Io));
    }
}
