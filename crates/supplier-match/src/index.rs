//! Registry indexing: the exact-match buckets and the approximate corpus.

use std::collections::BTreeMap;

use supplier_model::RegistryEntry;
use tracing::{debug, info, warn};

use crate::normalize::{cleaned_name, strict_key};

/// Separator between ids of a bucket shared by several registry entries.
pub const ID_SEPARATOR: &str = "/";

/// All registry ids whose names share one strict key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    ids: Vec<String>,
    code: String,
}

impl Bucket {
    fn new(ids: Vec<String>) -> Self {
        let code = ids.join(ID_SEPARATOR);
        Self { ids, code }
    }

    /// Ids in registry order, repeats included.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Ids joined with [`ID_SEPARATOR`].
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn is_shared(&self) -> bool {
        self.ids.len() > 1
    }
}

/// One searchable entry of the approximate corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    pub cleaned: String,
    pub id: String,
}

/// Read-only lookup structures built once per batch.
#[derive(Debug, Clone, Default)]
pub struct RegistryIndex {
    exact: BTreeMap<String, Bucket>,
    corpus: Vec<CorpusEntry>,
}

impl RegistryIndex {
    /// Indexes `entries` in order.
    ///
    /// Entries with blank names are skipped entirely. No entry is rejected for
    /// its content otherwise.
    pub fn build(entries: &[RegistryEntry]) -> Self {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut corpus = Vec::with_capacity(entries.len());
        let mut skipped = 0usize;

        for entry in entries {
            if entry.has_blank_name() {
                skipped += 1;
                continue;
            }
            grouped
                .entry(strict_key(&entry.name))
                .or_default()
                .push(entry.id.clone());

            let cleaned = cleaned_name(&entry.name);
            if !cleaned.is_empty() {
                corpus.push(CorpusEntry {
                    cleaned,
                    id: entry.id.clone(),
                });
            }
        }

        let exact: BTreeMap<String, Bucket> = grouped
            .into_iter()
            .map(|(key, ids)| (key, Bucket::new(ids)))
            .collect();

        let shared = exact.values().filter(|bucket| bucket.is_shared()).count();
        for (key, bucket) in exact.iter().filter(|(_, bucket)| bucket.is_shared()) {
            debug!(key = %key, code = %bucket.code(), "registry key shared by several ids");
        }
        if shared > 0 {
            warn!(
                shared_buckets = shared,
                "registry has names that normalize to the same key; exact matches return every id"
            );
        }
        if skipped > 0 {
            debug!(skipped, "registry entries with blank names skipped");
        }
        info!(
            entries = entries.len(),
            buckets = exact.len(),
            corpus = corpus.len(),
            "registry indexed"
        );

        Self { exact, corpus }
    }

    /// Bucket for an already-normalized strict key.
    pub fn exact(&self, key: &str) -> Option<&Bucket> {
        self.exact.get(key)
    }

    /// Bucket for a raw name, normalized the same way the index was built.
    pub fn exact_for_name(&self, name: &str) -> Option<&Bucket> {
        self.exact(&strict_key(name))
    }

    pub fn corpus(&self) -> &[CorpusEntry] {
        &self.corpus
    }

    pub fn bucket_count(&self) -> usize {
        self.exact.len()
    }

    pub fn shared_bucket_count(&self) -> usize {
        self.exact.values().filter(|bucket| bucket.is_shared()).count()
    }

    /// True when nothing can ever match.
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.corpus.is_empty()
    }
}
