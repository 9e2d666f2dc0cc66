//! Plain-text chunking: separator hierarchy plus overlap windows.

use crate::config::ChunkingConfig;
use crate::error::Result;
use crate::types::{CHUNK_INDEX, CHUNK_SIZE, Chunk, Document, Metadata, TOTAL_CHUNKS};

use super::Chunker;
use super::chars::char_len;
use super::overlap::apply_overlap;
use super::splitter::SeparatorSplitter;

/// Chunks unstructured text.
///
/// Each chunk carries the document metadata plus `chunk_index`, `total_chunks` and
/// `chunk_size` (the emitted length, overlap included).
#[derive(Debug, Clone)]
pub struct TextChunker {
    splitter: SeparatorSplitter,
    chunk_overlap: usize,
}

impl TextChunker {
    /// Creates a text chunker.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `chunk_size` is zero or the overlap is not smaller
    /// than `chunk_size`.
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            splitter: SeparatorSplitter::new(&config)?,
            chunk_overlap: config.chunk_overlap,
        })
    }

    /// Maximum chunk length before overlap.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.splitter.chunk_size()
    }

    /// Overlap window in characters.
    #[must_use]
    pub const fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Splits `text` without applying overlap.
    #[must_use]
    pub fn split(&self, text: &str) -> Vec<String> {
        self.splitter.split(text)
    }

    /// Splits `text` and widens the pieces with overlap windows.
    #[must_use]
    pub fn split_with_overlap(&self, text: &str) -> Vec<String> {
        apply_overlap(&self.split(text), self.chunk_overlap)
    }
}

impl Chunker for TextChunker {
    fn chunk(&self, doc: &Document) -> Result<Vec<Chunk>> {
        let pieces = self.split_with_overlap(&doc.text);
        let mut emitter = ChunkEmitter::new(doc.id.as_deref());
        emitter.emit_group(pieces, &doc.metadata);
        let chunks = emitter.finish();

        tracing::debug!(
            doc_id = doc.id.as_deref().unwrap_or("-"),
            chunks = chunks.len(),
            chunk_size = self.chunk_size(),
            "chunked text document"
        );
        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "text"
    }
}

/// Numbers chunks across sibling groups.
///
/// `chunk_id` runs over the whole document, while `chunk_index` and `total_chunks` describe a
/// chunk's position within its group (the whole document for plain text, one section for
/// structured input).
pub(crate) struct ChunkEmitter<'a> {
    source_doc_id: Option<&'a str>,
    chunks: Vec<Chunk>,
}

impl<'a> ChunkEmitter<'a> {
    pub(crate) const fn new(source_doc_id: Option<&'a str>) -> Self {
        Self {
            source_doc_id,
            chunks: Vec::new(),
        }
    }

    /// Appends one sibling group, each chunk inheriting `base` metadata.
    pub(crate) fn emit_group(&mut self, mut texts: Vec<String>, base: &Metadata) {
        texts.retain(|text| !text.trim().is_empty());
        let total = texts.len();

        for (index, text) in texts.into_iter().enumerate() {
            let mut metadata = base.clone();
            metadata.insert(CHUNK_INDEX.to_owned(), index.into());
            metadata.insert(TOTAL_CHUNKS.to_owned(), total.into());
            metadata.insert(CHUNK_SIZE.to_owned(), char_len(&text).into());

            self.chunks.push(Chunk {
                text,
                metadata,
                chunk_id: self.chunks.len(),
                source_doc_id: self.source_doc_id.map(str::to_owned),
            });
        }
    }

    pub(crate) fn finish(self) -> Vec<Chunk> {
        self.chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RagError;
    use crate::types::MetadataValue;

    fn chunker(chunk_size: usize, chunk_overlap: usize) -> TextChunker {
        TextChunker::new(
            ChunkingConfig::builder()
                .chunk_size(chunk_size)
                .chunk_overlap(chunk_overlap)
                .build(),
        )
        .unwrap()
    }

    #[test]
    fn empty_document_has_no_chunks() {
        let chunks = chunker(100, 10).chunk(&Document::new("")).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn short_document_is_one_chunk() {
        let doc = Document::with_id("doc-1", "  A short note.  ").meta("source", "notes");
        let chunks = chunker(100, 10).chunk(&doc).unwrap();

        assert_eq!(chunks.len(), 1);
        let chunk = &chunks[0];
        assert_eq!(chunk.text, "A short note.");
        assert_eq!(chunk.chunk_id, 0);
        assert_eq!(chunk.source_doc_id.as_deref(), Some("doc-1"));
        assert_eq!(chunk.chunk_index(), Some(0));
        assert_eq!(chunk.metadata[TOTAL_CHUNKS], MetadataValue::Integer(1));
        assert_eq!(chunk.metadata[CHUNK_SIZE], MetadataValue::Integer(13));
        assert_eq!(chunk.metadata["source"], MetadataValue::from("notes"));
    }

    #[test]
    fn ids_and_indices_are_contiguous() {
        let text = "one two three four five six seven eight nine ten eleven twelve";
        let chunks = chunker(12, 4).chunk(&Document::new(text)).unwrap();

        assert!(chunks.len() > 2);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_id, i);
            assert_eq!(chunk.chunk_index(), Some(i64::try_from(i).unwrap()));
            assert_eq!(
                chunk.metadata[TOTAL_CHUNKS].as_i64(),
                Some(i64::try_from(chunks.len()).unwrap())
            );
            assert_eq!(
                chunk.metadata[CHUNK_SIZE].as_i64(),
                Some(i64::try_from(chunk.char_len()).unwrap())
            );
            assert!(chunk.source_doc_id.is_none());
        }
    }

    #[test]
    fn overlap_is_applied_after_splitting() {
        let chunker = chunker(8, 2);
        let pieces = chunker.split("aaa\n\nbbb\n\nccc");
        assert_eq!(pieces, ["aaa\n\nbbb", "ccc"]);
        assert_eq!(
            chunker.split_with_overlap("aaa\n\nbbb\n\nccc"),
            ["aaa\n\nbbb cc", "bb ccc"]
        );
    }

    #[test]
    fn rejects_invalid_configuration() {
        let err = TextChunker::new(ChunkingConfig::builder().chunk_size(10).chunk_overlap(10).build())
            .unwrap_err();
        assert!(matches!(err, RagError::OverlapTooLarge { .. }));

        let err = TextChunker::new(ChunkingConfig::builder().chunk_size(0).chunk_overlap(0).build())
            .unwrap_err();
        assert!(matches!(err, RagError::InvalidChunkSize { .. }));
    }

    #[test]
    fn chunking_is_deterministic() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit.\n\n\
                    Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.";
        let chunker = chunker(30, 6);
        let first = chunker.chunk(&Document::new(text)).unwrap();
        let second = chunker.chunk(&Document::new(text)).unwrap();
        assert_eq!(first, second);
    }
}
