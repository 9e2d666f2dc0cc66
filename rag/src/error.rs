//! Error types for the RAG crate.

use thiserror::Error;

/// Errors that can occur while chunking, embedding or indexing.
#[derive(Debug, Error)]
pub enum RagError {
    /// `chunk_size` must be at least one character.
    #[error("chunk_size must be > 0, got {chunk_size}")]
    InvalidChunkSize {
        /// The rejected size.
        chunk_size: usize,
    },

    /// Overlap windows as wide as a whole chunk would duplicate entire chunks.
    #[error("chunk_overlap ({overlap}) must be less than chunk_size ({chunk_size})")]
    OverlapTooLarge {
        /// Requested overlap in characters.
        overlap: usize,
        /// Configured chunk size in characters.
        chunk_size: usize,
    },

    /// Document type string was neither `text` nor `markdown`.
    #[error("unknown document type: {0:?} (expected \"text\" or \"markdown\")")]
    UnknownDocumentType(String),

    /// Embedding operation failed.
    #[error("embedding failed: {0}")]
    Embedding(#[source] anyhow::Error),

    /// Dimension mismatch between embedding and store.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension provided.
        actual: usize,
    },

    /// Two documents in one ingestion batch share an ID, so their entries would collide.
    #[error("duplicate document id in batch: {0:?}")]
    DuplicateDocumentId(String),

    /// A [`VectorStore`](crate::store::VectorStore) implementation rejected an operation.
    ///
    /// The in-memory store never fails; this is for custom stores backed by external systems.
    #[error("store error: {0}")]
    Store(String),
}

impl RagError {
    /// Returns `true` for errors caused by invalid chunking configuration.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidChunkSize { .. } | Self::OverlapTooLarge { .. } | Self::UnknownDocumentType(_)
        )
    }
}

/// Result type alias for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
