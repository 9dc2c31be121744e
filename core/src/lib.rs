//! In-memory ngram search index scored by df-idf.
//!
//! Documents are ingested with [`SearchIndex::add_document`], turned into an
//! inverted index by [`SearchIndex::build_index`], and queried by exact ngram
//! key with [`SearchIndex::search`]. Everything lives in memory and dies with
//! the process.

pub mod document;
pub mod heap;
pub mod index;
pub mod profiler;

pub use document::Document;
pub use index::{CorpusStats, IndexConfig, IndexEntry, ScoreVariant, SearchHit, SearchIndex};
pub use profiler::{profile, DEFAULT_MAX_NGRAM};
