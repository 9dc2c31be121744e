use crate::document::Document;
use crate::heap::Heap;
use crate::profiler;
use anyhow::{bail, Result};
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Which grouping of the df-idf formula the build phase uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoreVariant {
    /// The historical formula `normalized_df * ln(doc_count / 1 + word_freq)`,
    /// whose log argument groups as `doc_count + word_freq`.
    #[default]
    Legacy,
    /// The regrouped formula `normalized_df * ln(doc_count / (1 + word_freq))`.
    Corrected,
}

/// Configuration for a [`SearchIndex`].
#[derive(Debug, Clone, Copy)]
pub struct IndexConfig {
    /// Largest ngram window generated per document.
    pub max_ngram: usize,
    /// df-idf grouping, see [`ScoreVariant`].
    pub variant: ScoreVariant,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_ngram: profiler::DEFAULT_MAX_NGRAM,
            variant: ScoreVariant::Legacy,
        }
    }
}

/// Corpus-wide counters feeding the df-idf scores.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CorpusStats {
    /// One increment per ingested document.
    pub doc_count: u32,
    /// ngram -> number of distinct documents whose profile contains it.
    pub word_freq: HashMap<String, u32>,
}

impl CorpusStats {
    fn note_document<'a>(&mut self, keys: impl Iterator<Item = &'a String>) {
        self.doc_count += 1;
        for key in keys {
            *self.word_freq.entry(key.clone()).or_insert(0) += 1;
        }
    }
}

/// One scored posting: a shared reference to a document plus its df-idf score
/// within a single ngram bucket.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    doc: Arc<Document>,
    score: f64,
}

impl IndexEntry {
    fn new(doc: Arc<Document>) -> Self {
        Self { doc, score: 0.0 }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn set_score(&mut self, score: f64) {
        self.score = score;
    }
}

/// Comparator shape shared by bucket maintenance and query extraction.
pub type EntryCmp = fn(&IndexEntry, &IndexEntry) -> Ordering;

/// Per-ngram collection of scored entries, lowest score at the root.
pub type Bucket = Heap<IndexEntry, EntryCmp>;

/// Bucket order: ascending score.
fn by_score_asc(a: &IndexEntry, b: &IndexEntry) -> Ordering {
    a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal)
}

/// Query order: highest score first, ties broken by ascending document id.
fn by_rank(a: &IndexEntry, b: &IndexEntry) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.doc.id.cmp(&b.doc.id))
}

/// One search result row.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub doc_id: Uuid,
    pub score: f64,
    pub text: String,
    pub metadata: Option<Value>,
}

impl fmt::Display for SearchHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = serde_json::json!({
            "df_idf": (self.score * 1e4).round() / 1e4,
            "id": self.doc_id,
            "doc": self.text,
        });
        write!(f, "{body}")
    }
}

/// In-memory inverted index over ngram keys, scored by df-idf.
///
/// Lifecycle: ingest with [`add_document`](Self::add_document), then call
/// [`build_index`](Self::build_index) once ingestion is complete, then query
/// with [`search`](Self::search). Ingesting after a build is allowed but
/// leaves the built buckets stale until `build_index` runs again. Not
/// internally synchronized; concurrent mutation is the caller's problem.
#[derive(Default)]
pub struct SearchIndex {
    config: IndexConfig,
    stats: CorpusStats,
    pending: Vec<(Arc<Document>, HashMap<String, f64>)>,
    buckets: HashMap<String, Bucket>,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Ingest one document and return its id.
    ///
    /// The document's profile updates the corpus counters immediately; the
    /// document itself only becomes searchable after the next
    /// [`build_index`](Self::build_index).
    pub fn add_document(&mut self, text: impl Into<String>, metadata: Option<Value>) -> Uuid {
        self.insert(Document::new(text, metadata))
    }

    /// Ingest an already-constructed document.
    pub fn insert(&mut self, doc: Document) -> Uuid {
        let doc_profile = profiler::profile(&doc.text, self.config.max_ngram);
        self.stats.note_document(doc_profile.keys());
        let id = doc.id;
        self.pending.push((Arc::new(doc), doc_profile));
        id
    }

    /// Number of ingested documents.
    pub fn doc_count(&self) -> u32 {
        self.stats.doc_count
    }

    /// Corpus-wide counters.
    pub fn stats(&self) -> &CorpusStats {
        &self.stats
    }

    /// Number of distinct ngram buckets in the built index.
    pub fn num_terms(&self) -> usize {
        self.buckets.len()
    }

    /// Heap-ordered entries for one ngram bucket, if present.
    pub fn bucket(&self, ngram: &str) -> Option<&[IndexEntry]> {
        self.buckets.get(ngram).map(Heap::as_slice)
    }

    /// (Re)build the inverted index from every ingested document.
    ///
    /// Buckets are cleared and rebuilt from the ingestion buffer, so calling
    /// this again without new documents yields an identical index. Must run
    /// at least once before [`search`](Self::search) returns anything.
    pub fn build_index(&mut self) -> Result<()> {
        let start = Instant::now();
        self.buckets.clear();
        let mut entries = 0usize;
        for (doc, doc_profile) in &self.pending {
            for (ngram, freq) in doc_profile {
                let score = score(&self.stats, self.config.variant, ngram, *freq)?;
                let mut entry = IndexEntry::new(Arc::clone(doc));
                entry.set_score(score);
                self.buckets
                    .entry(ngram.clone())
                    .or_insert_with(|| Heap::new(by_score_asc as EntryCmp))
                    .push(entry);
                entries += 1;
            }
        }
        tracing::info!(
            docs = self.stats.doc_count,
            ngrams = self.buckets.len(),
            entries,
            elapsed_s = start.elapsed().as_secs_f64(),
            "index built"
        );
        Ok(())
    }

    /// Top-`n` documents for an exact ngram key, highest score first.
    ///
    /// The query is lowercased and looked up verbatim; it is not tokenized or
    /// punctuation-trimmed. Ties break by ascending document id. An unknown
    /// key returns an empty vec.
    pub fn search(&self, query: &str, n: usize) -> Vec<SearchHit> {
        let key = query.to_lowercase();
        let Some(bucket) = self.buckets.get(&key) else {
            return Vec::new();
        };
        let mut ranked = Heap::from_vec(bucket.as_slice().to_vec(), by_rank as EntryCmp);
        let mut hits = Vec::with_capacity(n.min(ranked.len()));
        while hits.len() < n {
            match ranked.pop() {
                Some(entry) => hits.push(SearchHit {
                    doc_id: entry.doc.id,
                    score: entry.score,
                    text: entry.doc.text.clone(),
                    metadata: entry.doc.metadata.clone(),
                }),
                None => break,
            }
        }
        hits
    }
}

fn score(stats: &CorpusStats, variant: ScoreVariant, ngram: &str, freq: f64) -> Result<f64> {
    let Some(&df) = stats.word_freq.get(ngram) else {
        bail!("ngram {ngram:?} missing from corpus stats; ingestion and build are out of sync");
    };
    let doc_count = f64::from(stats.doc_count);
    let df = f64::from(df);
    let normalized_df = freq / df;
    let idf = match variant {
        ScoreVariant::Legacy => (doc_count / 1.0 + df).ln(),
        ScoreVariant::Corrected => (doc_count / (1.0 + df)).ln(),
    };
    Ok(normalized_df * idf)
}
