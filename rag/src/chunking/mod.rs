//! Text chunking for RAG.
//!
//! Documents are cut into bounded-size chunks in three steps:
//!
//! - [`SeparatorSplitter`] splits text along a separator hierarchy, coarse to fine.
//! - [`apply_overlap`] widens each piece with context from its neighbours.
//! - [`segment`] partitions structured input by headings before any size-based splitting.
//!
//! [`TextChunker`] and [`MarkdownChunker`] combine these behind the [`Chunker`] trait.

mod chars;
mod markdown;
mod overlap;
mod splitter;
mod text;

pub use markdown::{MarkdownChunker, segment};
pub use overlap::apply_overlap;
pub use splitter::{SeparatorSplitter, SplitStrategy};
pub use text::TextChunker;

use crate::config::ChunkingConfig;
use crate::error::Result;
use crate::types::{Chunk, Document, DocumentType};

/// Trait for text chunking strategies.
///
/// - [`TextChunker`]: separator hierarchy with overlap, for unstructured text
/// - [`MarkdownChunker`]: heading-aware, for markdown-like text
pub trait Chunker: Send + Sync {
    /// Splits a document into chunks.
    ///
    /// Chunks come back in document order with `chunk_id` counting from zero. An empty
    /// document yields no chunks.
    ///
    /// # Errors
    ///
    /// Implementations may fail on input they cannot process.
    fn chunk(&self, doc: &Document) -> Result<Vec<Chunk>>;

    /// Returns the name of this chunking strategy.
    fn name(&self) -> &'static str;
}

/// Returns the chunker for `document_type`.
///
/// # Errors
///
/// Returns a configuration error if `config` is invalid.
pub fn chunker_for(document_type: DocumentType, config: ChunkingConfig) -> Result<Box<dyn Chunker>> {
    Ok(match document_type {
        DocumentType::Text => Box::new(TextChunker::new(config)?),
        DocumentType::Markdown => Box::new(MarkdownChunker::new(config)?),
    })
}
