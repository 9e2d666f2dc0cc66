//! Heading-aware chunking for markdown-like documents.
//!
//! A heading is a line that starts with one to six heading markers followed by at least one
//! whitespace character. Every heading opens a new [`Section`]; lines before the first heading
//! form a level-0 preamble. Sections that fit in `chunk_size` become a single chunk, larger
//! ones are handed to the plain-text splitter.

use crate::config::ChunkingConfig;
use crate::error::Result;
use crate::types::{Chunk, Document, SECTION_HEADER, SECTION_INDEX, SECTION_LEVEL, Section};

use super::Chunker;
use super::chars::char_len;
use super::text::{ChunkEmitter, TextChunker};

const MAX_HEADING_LEVEL: usize = 6;

/// Partitions `text` into heading-delimited sections.
///
/// Blank sections (such as an empty preamble) are dropped. Section order follows the input.
///
/// # Example
///
/// ```rust
/// use chunkline_rag::segment;
///
/// let sections = segment("intro\n# Title\nbody\n## Sub\nmore", '#');
/// let headers: Vec<_> = sections.iter().map(|s| (s.header.as_str(), s.level)).collect();
/// assert_eq!(headers, [("", 0), ("Title", 1), ("Sub", 2)]);
/// ```
#[must_use]
pub fn segment(text: &str, marker: char) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section::default();

    for line in text.split('\n') {
        if let Some((level, header)) = parse_heading(line, marker) {
            push_section(&mut sections, std::mem::take(&mut current));
            current = Section {
                header: header.to_owned(),
                level,
                content: vec![line.to_owned()],
            };
        } else {
            current.content.push(line.to_owned());
        }
    }

    push_section(&mut sections, current);
    sections
}

fn push_section(sections: &mut Vec<Section>, section: Section) {
    if !section.is_blank() {
        sections.push(section);
    }
}

/// Returns the heading level and trimmed header text if `line` is a heading.
fn parse_heading(line: &str, marker: char) -> Option<(u8, &str)> {
    let level = line.chars().take_while(|&c| c == marker).count();
    if level == 0 || level > MAX_HEADING_LEVEL {
        return None;
    }

    let rest = &line[level * marker.len_utf8()..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((u8::try_from(level).ok()?, rest.trim()))
}

/// Chunks structured text section by section.
///
/// Every chunk carries `section_header`, `section_level` and `section_index` on top of the
/// plain-text metadata. `chunk_index` and `total_chunks` count siblings within a section,
/// while `chunk_id` stays contiguous across the whole document.
#[derive(Debug, Clone)]
pub struct MarkdownChunker {
    text: TextChunker,
    marker: char,
}

impl MarkdownChunker {
    /// Creates a markdown chunker.
    ///
    /// # Errors
    ///
    /// Returns a configuration error under the same conditions as [`TextChunker::new`].
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        let marker = config.heading_marker;
        Ok(Self {
            text: TextChunker::new(config)?,
            marker,
        })
    }

    /// Partitions `text` with this chunker's heading marker.
    #[must_use]
    pub fn segment(&self, text: &str) -> Vec<Section> {
        segment(text, self.marker)
    }
}

impl Chunker for MarkdownChunker {
    fn chunk(&self, doc: &Document) -> Result<Vec<Chunk>> {
        let sections = self.segment(&doc.text);
        let mut emitter = ChunkEmitter::new(doc.id.as_deref());

        for (section_index, section) in sections.iter().enumerate() {
            let mut metadata = doc.metadata.clone();
            metadata.insert(SECTION_HEADER.to_owned(), section.header.as_str().into());
            metadata.insert(SECTION_LEVEL.to_owned(), section.level.into());
            metadata.insert(SECTION_INDEX.to_owned(), section_index.into());

            let text = section.text();
            let pieces = if char_len(&text) <= self.text.chunk_size() {
                vec![text.trim().to_owned()]
            } else {
                self.text.split_with_overlap(&text)
            };
            emitter.emit_group(pieces, &metadata);
        }

        let chunks = emitter.finish();
        tracing::debug!(
            doc_id = doc.id.as_deref().unwrap_or("-"),
            sections = sections.len(),
            chunks = chunks.len(),
            "chunked markdown document"
        );
        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "markdown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CHUNK_INDEX, CHUNK_SIZE, MetadataValue, TOTAL_CHUNKS};

    fn chunker(chunk_size: usize, chunk_overlap: usize) -> MarkdownChunker {
        MarkdownChunker::new(
            ChunkingConfig::builder()
                .chunk_size(chunk_size)
                .chunk_overlap(chunk_overlap)
                .build(),
        )
        .unwrap()
    }

    #[test]
    fn headings_open_sections() {
        let text = "# Intro\nHello.\n\n## Details\nMore text.";
        let sections = segment(text, '#');

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].header, "Intro");
        assert_eq!(sections[0].level, 1);
        assert_eq!(sections[0].content, ["# Intro", "Hello.", ""]);
        assert_eq!(sections[1].header, "Details");
        assert_eq!(sections[1].level, 2);
        assert_eq!(sections[1].text(), "## Details\nMore text.");
    }

    #[test]
    fn preamble_is_level_zero() {
        let sections = segment("Before any heading.\n# First\nbody", '#');
        assert_eq!(sections[0].header, "");
        assert_eq!(sections[0].level, 0);
        assert_eq!(sections[0].content, ["Before any heading."]);
        assert_eq!(sections[1].header, "First");
    }

    #[test]
    fn blank_preamble_is_dropped() {
        let sections = segment("\n   \n# Only\nbody", '#');
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].header, "Only");
    }

    #[test]
    fn non_headings_stay_in_content() {
        let text = "# Real\n####### seven\n#nospace\n  # indented";
        let sections = segment(text, '#');
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content.len(), 4);
    }

    #[test]
    fn heading_levels_up_to_six() {
        let sections = segment("###### Deep\ntext", '#');
        assert_eq!(sections[0].level, 6);
        assert_eq!(sections[0].header, "Deep");
    }

    #[test]
    fn heading_text_is_trimmed() {
        let sections = segment("#\tTabbed title  \r\nbody", '#');
        assert_eq!(sections[0].header, "Tabbed title");
    }

    #[test]
    fn custom_marker() {
        let sections = segment("= Top\na\n== Sub\nb", '=');
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].level, 2);
    }

    #[test]
    fn empty_input_has_no_sections() {
        assert!(segment("", '#').is_empty());
        assert!(chunker(100, 0).chunk(&Document::new("")).unwrap().is_empty());
    }

    #[test]
    fn small_sections_become_single_chunks() {
        let doc = Document::with_id("guide", "# Intro\nHello.\n\n## Details\nMore text.");
        let chunks = chunker(100, 10).chunk(&doc).unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "# Intro\nHello.");
        assert_eq!(chunks[0].section_header(), Some("Intro"));
        assert_eq!(chunks[0].metadata[SECTION_LEVEL], MetadataValue::Integer(1));
        assert_eq!(chunks[1].text, "## Details\nMore text.");
        assert_eq!(chunks[1].metadata[SECTION_INDEX], MetadataValue::Integer(1));
        assert_eq!(chunks[1].chunk_id, 1);
        assert_eq!(chunks[1].source_doc_id.as_deref(), Some("guide"));
    }

    #[test]
    fn oversized_sections_are_split_and_keep_section_metadata() {
        let body = "word ".repeat(40);
        let text = format!("# Short\nok\n# Long\n{body}\n# Tail\nend");
        let chunks = chunker(30, 0).chunk(&Document::new(text)).unwrap();

        let long: Vec<&Chunk> = chunks
            .iter()
            .filter(|chunk| chunk.section_header() == Some("Long"))
            .collect();
        assert!(long.len() > 1);
        for (i, chunk) in long.iter().enumerate() {
            assert!(chunk.char_len() <= 30);
            assert_eq!(chunk.chunk_index(), Some(i64::try_from(i).unwrap()));
            assert_eq!(
                chunk.metadata[TOTAL_CHUNKS].as_i64(),
                Some(i64::try_from(long.len()).unwrap())
            );
        }

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_id, i);
        }
        assert_eq!(chunks.last().unwrap().section_header(), Some("Tail"));
        assert_eq!(chunks[0].metadata[CHUNK_INDEX], MetadataValue::Integer(0));
    }

    #[test]
    fn oversized_sections_are_overlapped_within_the_section() {
        let doc = Document::new("# Short\nok\n# Long\naaaa bbbb\ncccc dddd");
        let chunks = chunker(10, 4).chunk(&doc).unwrap();

        let texts: Vec<&str> = chunks.iter().map(|chunk| chunk.text.as_str()).collect();
        assert_eq!(
            texts,
            ["# Short\nok", "# Long aaaa", "ng aaaa bbbb cc", "bbbb cccc dddd"]
        );

        // A section that fits is emitted as is, with no borrowed context.
        assert_eq!(chunks[0].section_header(), Some("Short"));
        assert_eq!(chunks[0].metadata[TOTAL_CHUNKS], MetadataValue::Integer(1));

        for (i, chunk) in chunks[1..].iter().enumerate() {
            assert_eq!(chunk.section_header(), Some("Long"));
            assert_eq!(chunk.chunk_index(), Some(i64::try_from(i).unwrap()));
            assert_eq!(chunk.metadata[TOTAL_CHUNKS], MetadataValue::Integer(3));
        }
        for chunk in &chunks {
            assert_eq!(
                chunk.metadata[CHUNK_SIZE],
                MetadataValue::from(char_len(&chunk.text))
            );
        }
    }

    #[test]
    fn document_metadata_is_inherited() {
        let doc = Document::new("# A\nx").meta("source", "handbook");
        let chunks = chunker(50, 0).chunk(&doc).unwrap();
        assert_eq!(chunks[0].metadata["source"], MetadataValue::from("handbook"));
    }
}
