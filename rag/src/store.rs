//! Vector storage for embedded chunks.
//!
//! This module provides the [`VectorStore`] trait and the [`InMemoryVectorStore`]
//! implementation, which scores every entry in parallel with cosine similarity.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use ordered_float::OrderedFloat;
use parking_lot::RwLock;
use rayon::prelude::*;

use crate::error::{RagError, Result};
use crate::types::{IndexEntry, SearchResult};

/// Trait for vector store implementations.
///
/// A vector store keeps chunks with their embedding vectors and answers
/// similarity queries over them.
pub trait VectorStore: Send + Sync {
    /// Inserts entries, replacing any existing entry with the same ID.
    ///
    /// # Errors
    ///
    /// Fails without storing anything if an embedding has the wrong dimension.
    fn insert(&self, entries: Vec<IndexEntry>) -> Result<()>;

    /// Searches for the entries most similar to `query`.
    ///
    /// Results are sorted by descending score; entries scoring below `threshold` are skipped.
    ///
    /// # Errors
    ///
    /// Fails if `query` has the wrong dimension.
    fn search(&self, query: &[f32], top_k: usize, threshold: f32) -> Result<Vec<SearchResult>>;

    /// Removes an entry by ID. Returns `true` if something was removed.
    fn remove(&self, id: &str) -> bool;

    /// Returns the embedding dimension.
    fn dimension(&self) -> usize;

    /// Returns the number of stored entries.
    fn len(&self) -> usize;

    /// Returns `true` if the store is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry.
    fn clear(&self);
}

impl<S: VectorStore + ?Sized> VectorStore for Arc<S> {
    fn insert(&self, entries: Vec<IndexEntry>) -> Result<()> {
        (**self).insert(entries)
    }

    fn search(&self, query: &[f32], top_k: usize, threshold: f32) -> Result<Vec<SearchResult>> {
        (**self).search(query, top_k, threshold)
    }

    fn remove(&self, id: &str) -> bool {
        (**self).remove(id)
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn clear(&self) {
        (**self).clear();
    }
}

/// Parallel cosine-similarity store for small and medium corpora.
#[derive(Debug)]
pub struct InMemoryVectorStore {
    dimension: usize,
    state: RwLock<StoreState>,
}

#[derive(Debug, Default)]
struct StoreState {
    entries: Vec<IndexEntry>,
    /// Map from entry ID to position in `entries`.
    id_to_index: HashMap<String, usize>,
}

impl InMemoryVectorStore {
    /// Creates an empty store. The dimension must match the embedder's output size.
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Returns a copy of every stored entry, in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<IndexEntry> {
        self.state.read().entries.clone()
    }

    fn check_dimension(&self, actual: usize) -> Result<()> {
        if actual == self.dimension {
            Ok(())
        } else {
            Err(RagError::DimensionMismatch {
                expected: self.dimension,
                actual,
            })
        }
    }
}

impl VectorStore for InMemoryVectorStore {
    fn insert(&self, entries: Vec<IndexEntry>) -> Result<()> {
        for entry in &entries {
            self.check_dimension(entry.embedding.len())?;
        }

        let mut guard = self.state.write();
        let state = &mut *guard;
        for entry in entries {
            if let Some(&idx) = state.id_to_index.get(&entry.id) {
                state.entries[idx] = entry;
            } else {
                let idx = state.entries.len();
                state.id_to_index.insert(entry.id.clone(), idx);
                state.entries.push(entry);
            }
        }
        Ok(())
    }

    fn search(&self, query: &[f32], top_k: usize, threshold: f32) -> Result<Vec<SearchResult>> {
        self.check_dimension(query.len())?;

        let state = self.state.read();
        if state.entries.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }

        let mut results: Vec<SearchResult> = state
            .entries
            .par_iter()
            .filter_map(|entry| {
                let score = cosine_similarity(&entry.embedding, query);
                (score >= threshold).then(|| SearchResult {
                    id: entry.id.clone(),
                    text: entry.text.clone(),
                    score,
                    metadata: entry.metadata.clone(),
                })
            })
            .collect();

        // Stable sort keeps insertion order among equal scores.
        results.par_sort_by_key(|result| Reverse(OrderedFloat(result.score)));
        results.truncate(top_k);
        Ok(results)
    }

    fn remove(&self, id: &str) -> bool {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let Some(idx) = state.id_to_index.remove(id) else {
            return false;
        };
        state.entries.remove(idx);
        for position in state.id_to_index.values_mut() {
            if *position > idx {
                *position -= 1;
            }
        }
        true
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    fn clear(&self) {
        let mut state = self.state.write();
        state.entries.clear();
        state.id_to_index.clear();
    }
}

/// Computes cosine similarity between two vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f32, 0.0f32, 0.0f32);
    for (lhs, rhs) in a.iter().zip(b) {
        dot += lhs * rhs;
        norm_a += lhs * lhs;
        norm_b += rhs * rhs;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
