use anyhow::{Context, Result};
use clap::Parser;
use gramdex_core::{IndexConfig, ScoreVariant, SearchIndex, DEFAULT_MAX_NGRAM};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "gramdex")]
#[command(about = "Index a directory of text files in memory and run an ngram query", long_about = None)]
struct Cli {
    /// Directory of text files to ingest (one document per file)
    #[arg(long)]
    corpus: PathBuf,
    /// Exact ngram to look up
    #[arg(long)]
    query: String,
    /// Number of results to return
    #[arg(long, default_value_t = 5)]
    top: usize,
    /// Largest ngram window to profile
    #[arg(long, default_value_t = DEFAULT_MAX_NGRAM)]
    max_ngram: usize,
    /// Only ingest files with this extension
    #[arg(long, default_value = "txt")]
    ext: String,
    /// Use the regrouped idf formula ln(docs / (1 + df))
    #[arg(long, default_value_t = false)]
    corrected: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let variant = if cli.corrected {
        ScoreVariant::Corrected
    } else {
        ScoreVariant::Legacy
    };
    let mut index = SearchIndex::with_config(IndexConfig {
        max_ngram: cli.max_ngram,
        variant,
    });

    let mut ingested = 0usize;
    for entry in WalkDir::new(&cli.corpus).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some(cli.ext.as_str()) {
            continue;
        }
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        index.add_document(text, Some(json!({ "path": path.display().to_string() })));
        ingested += 1;
        if ingested % 1000 == 0 {
            tracing::info!(ingested, "ingesting corpus");
        }
    }
    tracing::info!(ingested, "corpus ingested");

    index.build_index()?;

    for hit in index.search(&cli.query, cli.top) {
        println!("{}", serde_json::to_string(&hit)?);
    }
    Ok(())
}
