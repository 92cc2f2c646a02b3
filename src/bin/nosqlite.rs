use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use nosqlite::{index_files, query_index, read_index, save_index};

#[derive(Parser)]
#[command(name = "nosqlite", about = "Embedded document store: index and query directories of JSON files", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an INDEX file from every JSON document in a directory.
    Index {
        /// Directory of JSON documents to index; the INDEX file is written here.
        dir: PathBuf,
    },
    /// Evaluate a SELECT query against a directory's INDEX file.
    Query {
        /// Directory containing a previously built INDEX file.
        dir: PathBuf,
        /// A `SELECT * FROM c WHERE ...` query string.
        query: String,
    },
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Index { dir } => run_index(&dir),
        Commands::Query { dir, query } => run_query(&dir, &query),
    };

    if let Err(err) = result {
        eprintln!("nosqlite: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_index(dir: &PathBuf) -> nosqlite::Result<()> {
    let paths = document_paths(dir)?;
    log::info!("found {} documents under {}", paths.len(), dir.display());
    let index = index_files(&paths)?;
    save_index(&index, dir)?;
    println!("wrote {} entries to {}", index.entries.len(), dir.join("INDEX").display());
    Ok(())
}

fn run_query(dir: &PathBuf, query: &str) -> nosqlite::Result<()> {
    let index = read_index(dir)?;
    let doc_ids = query_index(&index, query)?;
    for id in doc_ids {
        println!("{id}");
    }
    Ok(())
}

/// Lists a directory's entries in a stable order (document ids are assigned
/// by this order, so it must be reproducible across an `index`/`query` pair
/// run from the same directory listing).
fn document_paths(dir: &PathBuf) -> nosqlite::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    Ok(paths)
}
