//! Ingestion and retrieval pipeline.

use std::collections::HashSet;
use std::fmt;

use chunkline_core::EmbeddingModel;
use rayon::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::chunking::{Chunker, MarkdownChunker, TextChunker};
use crate::config::{ChunkingConfig, PipelineConfig};
use crate::error::{RagError, Result};
use crate::store::{InMemoryVectorStore, VectorStore};
use crate::types::{Chunk, Document, DocumentType, IndexEntry, SearchResult};

/// Metadata key holding a document's position in its ingestion batch.
pub const DOCUMENT_INDEX: &str = "document_index";
/// Metadata key holding the document type used to chunk it.
pub const DOCUMENT_TYPE: &str = "document_type";

/// Chunks documents, embeds the chunks and answers similarity queries.
///
/// # Example
///
/// ```rust,no_run
/// use chunkline_rag::{Document, DocumentType, Pipeline};
/// # use chunkline_core::EmbeddingModel;
/// # struct MyEmbedder;
/// # impl EmbeddingModel for MyEmbedder {
/// #     fn dim(&self) -> usize { 2 }
/// #     async fn embed(&self, _: &str) -> chunkline_core::Result<Vec<f32>> { Ok(vec![1.0, 0.0]) }
/// # }
///
/// # async fn demo() -> chunkline_rag::Result<()> {
/// let pipeline = Pipeline::builder(MyEmbedder).chunk_size(256).chunk_overlap(32).build()?;
/// pipeline
///     .add_documents(vec![Document::new("# Guide\nSome text.")], DocumentType::Markdown)
///     .await?;
/// let hits = pipeline.query("guide").await?;
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<M, S = InMemoryVectorStore> {
    embedder: M,
    store: S,
    text: TextChunker,
    markdown: MarkdownChunker,
    config: PipelineConfig,
}

impl<M, S> fmt::Debug for Pipeline<M, S>
where
    M: EmbeddingModel,
    S: VectorStore,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("stored_chunks", &self.store.len())
            .field("embedding_dim", &self.embedder.dim())
            .finish_non_exhaustive()
    }
}

impl<M: EmbeddingModel> Pipeline<M> {
    /// Creates a pipeline with default configuration and an in-memory store.
    ///
    /// # Errors
    ///
    /// Never fails with the default configuration; the signature matches [`PipelineBuilder::build`].
    pub fn new(embedder: M) -> Result<Self> {
        Self::builder(embedder).build()
    }

    /// Creates a builder for custom configuration.
    pub fn builder(embedder: M) -> PipelineBuilder<M> {
        PipelineBuilder::new(embedder)
    }
}

impl<M, S> Pipeline<M, S>
where
    M: EmbeddingModel,
    S: VectorStore,
{
    /// Chunks, embeds and stores a batch of documents.
    ///
    /// Documents are chunked in parallel and all chunks are embedded in one batch. Every chunk
    /// gets `document_index` and `document_type` metadata, and is stored under
    /// `{doc_id}#chunk_{chunk_id}`; documents without an ID get a random one. Re-adding a
    /// document ID in a later batch replaces its entries.
    ///
    /// Returns the number of chunks stored.
    ///
    /// # Errors
    ///
    /// Fails if two documents in the batch share an ID, if embedding fails, or if the store
    /// rejects the entries. Nothing is stored in that case.
    pub async fn add_documents(
        &self,
        documents: Vec<Document>,
        document_type: DocumentType,
    ) -> Result<usize> {
        let document_count = documents.len();
        let mut seen = HashSet::with_capacity(document_count);
        if let Some(id) = documents
            .iter()
            .filter_map(|doc| doc.id.as_deref())
            .find(|id| !seen.insert(*id))
        {
            return Err(RagError::DuplicateDocumentId(id.to_owned()));
        }
        let chunker = self.chunker(document_type);

        let chunked: Vec<(String, Vec<Chunk>)> = documents
            .into_par_iter()
            .enumerate()
            .map(|(document_index, mut doc)| {
                doc.metadata
                    .insert(DOCUMENT_INDEX.to_owned(), document_index.into());
                doc.metadata
                    .insert(DOCUMENT_TYPE.to_owned(), document_type.as_str().into());
                let key = doc
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                chunker.chunk(&doc).map(|chunks| (key, chunks))
            })
            .collect::<Result<_>>()?;

        let chunks: Vec<(String, Chunk)> = chunked
            .into_iter()
            .flat_map(|(key, chunks)| {
                chunks
                    .into_iter()
                    .map(move |chunk| (format!("{key}#chunk_{}", chunk.chunk_id), chunk))
            })
            .collect();

        if chunks.is_empty() {
            tracing::info!(documents = document_count, "no chunks produced");
            return Ok(0);
        }

        let texts: Vec<String> = chunks.iter().map(|(_, chunk)| chunk.text.clone()).collect();
        let embeddings = self
            .embedder
            .embed_batch(&texts)
            .await
            .map_err(RagError::Embedding)?;
        if embeddings.len() != texts.len() {
            return Err(RagError::Embedding(anyhow::anyhow!(
                "expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            )));
        }

        let entries: Vec<IndexEntry> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|((id, chunk), embedding)| IndexEntry {
                id,
                text: chunk.text,
                metadata: chunk.metadata,
                embedding,
            })
            .collect();
        let stored = entries.len();
        self.store.insert(entries)?;

        tracing::info!(
            documents = document_count,
            chunks = stored,
            document_type = %document_type,
            "added documents"
        );
        Ok(stored)
    }

    /// Adds a single document using the configured default document type.
    ///
    /// # Errors
    ///
    /// See [`Pipeline::add_documents`].
    pub async fn add_document(&self, document: Document) -> Result<usize> {
        self.add_documents(vec![document], self.config.document_type)
            .await
    }

    /// Returns the chunks a document would be split into, without embedding them.
    ///
    /// # Errors
    ///
    /// Propagates chunker failures.
    pub fn chunk(&self, document: &Document, document_type: DocumentType) -> Result<Vec<Chunk>> {
        self.chunker(document_type).chunk(document)
    }

    /// Searches with the configured default result count.
    ///
    /// # Errors
    ///
    /// Fails if the query cannot be embedded or searched.
    pub async fn query(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.query_with_k(query, self.config.default_top_k).await
    }

    /// Searches for the chunks most similar to `query`.
    ///
    /// Results are sorted by descending score and filtered by the similarity threshold.
    ///
    /// # Errors
    ///
    /// Fails if the query cannot be embedded or searched.
    pub async fn query_with_k(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        let embedding = self
            .embedder
            .embed(query)
            .await
            .map_err(RagError::Embedding)?;
        let results = self
            .store
            .search(&embedding, top_k, self.config.similarity_threshold)?;

        if results.is_empty() {
            tracing::warn!(top_k, "no relevant context found");
        } else {
            tracing::debug!(hits = results.len(), top_k, "query answered");
        }
        Ok(results)
    }

    /// Removes every stored chunk.
    pub fn clear(&self) {
        self.store.clear();
        tracing::info!("cleared vector store");
    }

    /// Returns the number of stored chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns a summary of the pipeline's state and settings.
    #[must_use]
    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            stored_chunks: self.store.len(),
            chunk_size: self.config.chunking.chunk_size,
            chunk_overlap: self.config.chunking.chunk_overlap,
            embedding_dim: self.embedder.dim(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Returns the vector store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the embedding model.
    #[must_use]
    pub const fn embedder(&self) -> &M {
        &self.embedder
    }

    fn chunker(&self, document_type: DocumentType) -> &dyn Chunker {
        match document_type {
            DocumentType::Text => &self.text,
            DocumentType::Markdown => &self.markdown,
        }
    }
}

/// Snapshot returned by [`Pipeline::stats`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Number of chunks in the store.
    pub stored_chunks: usize,
    /// Configured chunk size.
    pub chunk_size: usize,
    /// Configured overlap.
    pub chunk_overlap: usize,
    /// Embedding dimension of the model.
    pub embedding_dim: usize,
}

/// Builder for configuring a [`Pipeline`].
pub struct PipelineBuilder<M, S = InMemoryVectorStore> {
    embedder: M,
    store: S,
    config: PipelineConfig,
}

impl<M, S> fmt::Debug for PipelineBuilder<M, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<M: EmbeddingModel> PipelineBuilder<M> {
    fn new(embedder: M) -> Self {
        let store = InMemoryVectorStore::new(embedder.dim());
        Self {
            embedder,
            store,
            config: PipelineConfig::default(),
        }
    }
}

impl<M, S> PipelineBuilder<M, S>
where
    M: EmbeddingModel,
    S: VectorStore,
{
    /// Replaces the whole configuration.
    #[must_use]
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the chunking parameters.
    #[must_use]
    pub fn chunking(mut self, chunking: ChunkingConfig) -> Self {
        self.config.chunking = chunking;
        self
    }

    /// Sets the maximum chunk length in characters.
    #[must_use]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunking.chunk_size = chunk_size;
        self
    }

    /// Sets the overlap window in characters.
    #[must_use]
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunking.chunk_overlap = overlap;
        self
    }

    /// Sets the document type used by [`Pipeline::add_document`].
    #[must_use]
    pub fn document_type(mut self, document_type: DocumentType) -> Self {
        self.config.document_type = document_type;
        self
    }

    /// Sets the minimum similarity threshold.
    #[must_use]
    pub fn similarity_threshold(mut self, threshold: f32) -> Self {
        self.config.similarity_threshold = threshold;
        self
    }

    /// Sets the default number of search results.
    #[must_use]
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.default_top_k = k;
        self
    }

    /// Uses a custom vector store.
    #[must_use]
    pub fn store<S2: VectorStore>(self, store: S2) -> PipelineBuilder<M, S2> {
        PipelineBuilder {
            embedder: self.embedder,
            store,
            config: self.config,
        }
    }

    /// Builds the [`Pipeline`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid chunking parameters, or
    /// [`RagError::DimensionMismatch`] if the store and the embedder disagree on dimension.
    pub fn build(self) -> Result<Pipeline<M, S>> {
        let expected = self.store.dimension();
        let actual = self.embedder.dim();
        if expected != actual {
            return Err(RagError::DimensionMismatch { expected, actual });
        }

        let text = TextChunker::new(self.config.chunking.clone())?;
        let markdown = MarkdownChunker::new(self.config.chunking.clone())?;
        tracing::debug!(
            chunk_size = self.config.chunking.chunk_size,
            chunk_overlap = self.config.chunking.chunk_overlap,
            "pipeline ready"
        );

        Ok(Pipeline {
            embedder: self.embedder,
            store: self.store,
            text,
            markdown,
            config: self.config,
        })
    }
}
