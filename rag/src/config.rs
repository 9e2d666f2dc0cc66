//! Configuration for chunking and the ingestion pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};
use crate::types::DocumentType;

/// Default maximum chunk length in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 512;
/// Default overlap window in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;
/// Default primary separator (paragraph break).
pub const DEFAULT_PRIMARY_SEPARATOR: &str = "\n\n";
/// Default heading marker for structured input.
pub const DEFAULT_HEADING_MARKER: char = '#';

/// Separators tried from coarse to fine; the empty string means character slicing.
pub const DEFAULT_SEPARATORS: [&str; 6] = ["\n\n", "\n", ". ", ", ", " ", ""];

/// Chunking parameters shared by the splitter, the overlap windower and the segmenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum chunk length in characters, before overlap.
    pub chunk_size: usize,
    /// Characters borrowed from neighbouring chunks.
    pub chunk_overlap: usize,
    /// Separator used for the first greedy pass.
    pub primary_separator: String,
    /// Fallback separators for oversized pieces, coarse to fine.
    pub separators: Vec<String>,
    /// Character that marks a heading line in structured input.
    pub heading_marker: char,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            primary_separator: DEFAULT_PRIMARY_SEPARATOR.to_owned(),
            separators: DEFAULT_SEPARATORS.iter().map(|&s| s.to_owned()).collect(),
            heading_marker: DEFAULT_HEADING_MARKER,
        }
    }
}

impl ChunkingConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for custom configuration.
    #[must_use]
    pub fn builder() -> ChunkingConfigBuilder {
        ChunkingConfigBuilder::new()
    }

    /// Checks the size constraints.
    ///
    /// # Errors
    ///
    /// [`RagError::InvalidChunkSize`] when `chunk_size` is zero and
    /// [`RagError::OverlapTooLarge`] when `chunk_overlap >= chunk_size`.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(RagError::InvalidChunkSize {
                chunk_size: self.chunk_size,
            });
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(RagError::OverlapTooLarge {
                overlap: self.chunk_overlap,
                chunk_size: self.chunk_size,
            });
        }
        Ok(())
    }
}

/// Builder for chunking configuration.
#[derive(Debug, Default)]
pub struct ChunkingConfigBuilder {
    config: ChunkingConfig,
}

impl ChunkingConfigBuilder {
    /// Creates a new configuration builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ChunkingConfig::default(),
        }
    }

    /// Sets the maximum chunk length in characters.
    #[must_use]
    pub const fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }

    /// Sets the overlap window in characters.
    #[must_use]
    pub const fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Sets the primary separator.
    #[must_use]
    pub fn primary_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.primary_separator = separator.into();
        self
    }

    /// Replaces the fallback separator hierarchy.
    #[must_use]
    pub fn separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.separators = separators.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the heading marker character.
    #[must_use]
    pub const fn heading_marker(mut self, marker: char) -> Self {
        self.config.heading_marker = marker;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> ChunkingConfig {
        self.config
    }
}

/// Configuration for a [`Pipeline`](crate::Pipeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Chunking parameters.
    pub chunking: ChunkingConfig,
    /// Document type used by [`Pipeline::add_document`](crate::Pipeline::add_document) callers
    /// that do not care.
    pub document_type: DocumentType,
    /// Minimum similarity score for search results.
    pub similarity_threshold: f32,
    /// Default number of results to return.
    pub default_top_k: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunking: ChunkingConfig::default(),
            document_type: DocumentType::Text,
            similarity_threshold: 0.0,
            default_top_k: 5,
        }
    }
}

impl PipelineConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for custom configuration.
    #[must_use]
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::new()
    }
}

/// Builder for pipeline configuration.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// Creates a new configuration builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// Sets the chunking parameters.
    #[must_use]
    pub fn chunking(mut self, chunking: ChunkingConfig) -> Self {
        self.config.chunking = chunking;
        self
    }

    /// Sets the default document type.
    #[must_use]
    pub const fn document_type(mut self, document_type: DocumentType) -> Self {
        self.config.document_type = document_type;
        self
    }

    /// Sets the minimum similarity threshold for search results.
    #[must_use]
    pub const fn similarity_threshold(mut self, threshold: f32) -> Self {
        self.config.similarity_threshold = threshold;
        self
    }

    /// Sets the default number of results to return.
    #[must_use]
    pub const fn default_top_k(mut self, k: usize) -> Self {
        self.config.default_top_k = k;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> PipelineConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChunkingConfig::default();
        assert_eq!(config.chunk_size, 512);
        assert_eq!(config.chunk_overlap, 50);
        assert_eq!(config.primary_separator, "\n\n");
        assert_eq!(config.separators, ["\n\n", "\n", ". ", ", ", " ", ""]);
        assert_eq!(config.heading_marker, '#');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_config() {
        let config = ChunkingConfig::builder()
            .chunk_size(100)
            .chunk_overlap(10)
            .primary_separator("\n")
            .separators([" ", ""])
            .heading_marker('=')
            .build();

        assert_eq!(config.chunk_size, 100);
        assert_eq!(config.chunk_overlap, 10);
        assert_eq!(config.primary_separator, "\n");
        assert_eq!(config.separators, [" ", ""]);
        assert_eq!(config.heading_marker, '=');
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let config = ChunkingConfig::builder().chunk_size(0).chunk_overlap(0).build();
        assert!(matches!(
            config.validate(),
            Err(RagError::InvalidChunkSize { chunk_size: 0 })
        ));
    }

    #[test]
    fn overlap_must_be_less_than_chunk_size() {
        let config = ChunkingConfig::builder().chunk_size(50).chunk_overlap(50).build();
        assert!(matches!(
            config.validate(),
            Err(RagError::OverlapTooLarge {
                overlap: 50,
                chunk_size: 50
            })
        ));
    }

    #[test]
    fn deserializes_partial_config() {
        let config: PipelineConfig = serde_json::from_str(
            r#"{"chunking": {"chunk_size": 256, "chunk_overlap": 20}, "document_type": "markdown"}"#,
        )
        .unwrap();
        assert_eq!(config.chunking.chunk_size, 256);
        assert_eq!(config.chunking.chunk_overlap, 20);
        assert_eq!(config.chunking.primary_separator, "\n\n");
        assert_eq!(config.document_type, DocumentType::Markdown);
        assert_eq!(config.default_top_k, 5);
    }

    #[test]
    fn pipeline_builder() {
        let config = PipelineConfig::builder()
            .chunking(ChunkingConfig::builder().chunk_size(64).build())
            .similarity_threshold(0.25)
            .default_top_k(10)
            .build();
        assert_eq!(config.chunking.chunk_size, 64);
        assert!((config.similarity_threshold - 0.25).abs() < f32::EPSILON);
        assert_eq!(config.default_top_k, 10);
    }
}
