//! Document chunking for Retrieval-Augmented Generation.
//!
//! Long documents are cut into bounded-size, overlapping chunks that are individually embedded
//! and indexed:
//!
//! - [`SeparatorSplitter`] splits text along a separator hierarchy (paragraph, line, sentence,
//!   clause, word, character) so that no piece exceeds `chunk_size` characters.
//! - [`apply_overlap`] extends each piece with context from its neighbours.
//! - [`segment`] partitions markdown-like input by headings, so chunks never straddle sections.
//!
//! [`TextChunker`] and [`MarkdownChunker`] combine these steps behind the [`Chunker`] trait, and
//! [`Pipeline`] glues a chunker to any [`EmbeddingModel`](chunkline_core::EmbeddingModel) and a
//! [`VectorStore`].
//!
//! # Example
//!
//! ```rust
//! use chunkline_rag::{Chunker, ChunkingConfig, Document, MarkdownChunker};
//!
//! let config = ChunkingConfig::builder().chunk_size(200).chunk_overlap(20).build();
//! let chunker = MarkdownChunker::new(config)?;
//! let chunks = chunker.chunk(&Document::new("# Intro\nHello.\n## Details\nMore text."))?;
//!
//! assert_eq!(chunks.len(), 2);
//! assert_eq!(chunks[1].section_header(), Some("Details"));
//! # Ok::<(), chunkline_rag::RagError>(())
//! ```

pub mod chunking;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod store;
pub mod types;

pub use chunking::{
    Chunker, MarkdownChunker, SeparatorSplitter, SplitStrategy, TextChunker, apply_overlap,
    chunker_for, segment,
};
pub use config::{ChunkingConfig, ChunkingConfigBuilder, PipelineConfig, PipelineConfigBuilder};
pub use error::{RagError, Result};
pub use pipeline::{Pipeline, PipelineBuilder, PipelineStats};
pub use store::{InMemoryVectorStore, VectorStore};
pub use types::{
    Chunk, Document, DocumentType, IndexEntry, Metadata, MetadataValue, SearchResult, Section,
};
