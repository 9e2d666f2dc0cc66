//! Core types for the RAG crate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::RagError;

/// Key/value metadata attached to documents and chunks.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// Metadata key holding a chunk's position among its siblings.
pub const CHUNK_INDEX: &str = "chunk_index";
/// Metadata key holding the sibling count.
pub const TOTAL_CHUNKS: &str = "total_chunks";
/// Metadata key holding the emitted character length.
pub const CHUNK_SIZE: &str = "chunk_size";
/// Metadata key holding the originating heading text.
pub const SECTION_HEADER: &str = "section_header";
/// Metadata key holding the originating heading depth.
pub const SECTION_LEVEL: &str = "section_level";
/// Metadata key holding the originating section's position.
pub const SECTION_INDEX: &str = "section_index";

/// A scalar metadata value.
///
/// Serialized untagged, so a metadata map reads and writes as a flat JSON object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Free-form string.
    Text(String),
}

impl MetadataValue {
    /// Returns the string payload, if this is a [`MetadataValue::Text`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is a [`MetadataValue::Integer`].
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<usize> for MetadataValue {
    fn from(value: usize) -> Self {
        Self::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<u8> for MetadataValue {
    fn from(value: u8) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Selects plain or heading-aware segmentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Plain text, split with the separator hierarchy only.
    #[default]
    Text,
    /// Markdown-like text, partitioned by headings first.
    Markdown,
}

impl DocumentType {
    /// Returns the lowercase name used in configuration and metadata.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Markdown => "markdown",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = RagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "markdown" => Ok(Self::Markdown),
            other => Err(RagError::UnknownDocumentType(other.to_owned())),
        }
    }
}

/// A document to be chunked.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Caller-supplied identifier, copied onto every chunk as `source_doc_id`.
    pub id: Option<String>,
    /// Raw text content.
    pub text: String,
    /// Metadata passed through onto every chunk.
    pub metadata: Metadata,
}

impl Document {
    /// Creates an anonymous document with empty metadata.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            metadata: Metadata::new(),
        }
    }

    /// Creates a document with an identifier and empty metadata.
    #[must_use]
    pub fn with_id(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            text: text.into(),
            metadata: Metadata::new(),
        }
    }

    /// Replaces the document metadata.
    #[must_use]
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Adds one metadata entry.
    #[must_use]
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A bounded-size span of text plus metadata, the unit handed to an embedding provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content of the chunk.
    pub text: String,
    /// Inherited and chunk-specific metadata.
    pub metadata: Metadata,
    /// Position in emission order within one chunking call.
    pub chunk_id: usize,
    /// Identifier of the originating document, if the caller supplied one.
    pub source_doc_id: Option<String>,
}

impl Chunk {
    /// Returns the chunk's position among its siblings.
    #[must_use]
    pub fn chunk_index(&self) -> Option<i64> {
        self.metadata.get(CHUNK_INDEX).and_then(MetadataValue::as_i64)
    }

    /// Returns the heading this chunk was cut from, for structured input.
    #[must_use]
    pub fn section_header(&self) -> Option<&str> {
        self.metadata
            .get(SECTION_HEADER)
            .and_then(MetadataValue::as_str)
    }

    /// Length of the text in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A heading-delimited span of a structured document, prior to size-based splitting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text, empty for the preamble before the first heading.
    pub header: String,
    /// Heading depth (1-6), 0 for the preamble.
    pub level: u8,
    /// Raw lines of the section, including its own heading line.
    pub content: Vec<String>,
}

impl Section {
    /// Joins the section lines back into text.
    #[must_use]
    pub fn text(&self) -> String {
        self.content.join("\n")
    }

    /// Returns `true` if the section has no non-blank line.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content.iter().all(|line| line.trim().is_empty())
    }
}

/// A chunk plus its embedding, ready to be written to a vector store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Store-wide unique identifier (format: `{doc_id}#chunk_{n}`).
    pub id: String,
    /// Chunk text.
    pub text: String,
    /// Chunk metadata.
    pub metadata: Metadata,
    /// The embedding vector.
    pub embedding: Vec<f32>,
}

/// A search hit returned by a vector store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Identifier of the matching entry.
    pub id: String,
    /// Text of the matching chunk.
    pub text: String,
    /// Similarity score (higher is better, 1.0 = identical direction).
    pub score: f32,
    /// Metadata of the matching chunk.
    pub metadata: Metadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_type_parses_known_names() {
        assert_eq!("text".parse::<DocumentType>().unwrap(), DocumentType::Text);
        assert_eq!(
            "markdown".parse::<DocumentType>().unwrap(),
            DocumentType::Markdown
        );
        assert!(matches!(
            "html".parse::<DocumentType>(),
            Err(RagError::UnknownDocumentType(name)) if name == "html"
        ));
        assert_eq!(DocumentType::Markdown.to_string(), "markdown");
    }

    #[test]
    fn metadata_serializes_flat() {
        let doc = Document::with_id("doc-1", "body")
            .meta("source", "wiki")
            .meta("page", 3_i64)
            .meta("draft", false)
            .meta("weight", 0.5);
        let json = serde_json::to_value(&doc.metadata).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"source": "wiki", "page": 3, "draft": false, "weight": 0.5})
        );

        let back: Metadata = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc.metadata);
    }

    #[test]
    fn chunk_accessors() {
        let mut metadata = Metadata::new();
        metadata.insert(CHUNK_INDEX.into(), 2_usize.into());
        metadata.insert(SECTION_HEADER.into(), "Intro".into());
        let chunk = Chunk {
            text: "héllo".into(),
            metadata,
            chunk_id: 7,
            source_doc_id: None,
        };
        assert_eq!(chunk.chunk_index(), Some(2));
        assert_eq!(chunk.section_header(), Some("Intro"));
        assert_eq!(chunk.char_len(), 5);
    }

    #[test]
    fn blank_sections() {
        let section = Section {
            header: String::new(),
            level: 0,
            content: vec![String::new(), "  ".into()],
        };
        assert!(section.is_blank());
        assert_eq!(section.text(), "\n  ");
    }
}
