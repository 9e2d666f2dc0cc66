//! # chunkline
//!
//! High level façade crate that re-exports everything from [`chunkline_core`] plus, behind the
//! default `rag` feature, the chunking engine and ingestion pipeline from `chunkline_rag`.
//! Pull this crate into your binary to split documents into retrieval-sized chunks and feed
//! them to any embedding provider that implements [`EmbeddingModel`].
//!
//! ## Example
//!
//! ```rust
//! # #[cfg(feature = "rag")]
//! # fn main() -> Result<(), chunkline::rag::RagError> {
//! use chunkline::rag::{ChunkingConfig, Chunker, Document, TextChunker};
//!
//! let chunker = TextChunker::new(ChunkingConfig::builder().chunk_size(64).chunk_overlap(0).build())?;
//! let chunks = chunker.chunk(&Document::new("First paragraph.\n\nSecond paragraph."))?;
//! assert_eq!(chunks.len(), 1);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "rag"))]
//! # fn main() {}
//! ```
//!
//! ## Modules
//!
//! - [`chunkline_core::embedding`]: convert text to vectors.
//! - `rag`: separator-hierarchy splitting, overlap windows, heading-aware segmentation,
//!   vector-store seam and the ingestion pipeline.

pub use chunkline_core::*;

#[cfg(feature = "rag")]
#[doc(inline)]
pub use chunkline_rag as rag;
