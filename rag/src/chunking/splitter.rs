//! Separator-hierarchy splitting.
//!
//! # Algorithm
//!
//! 1. Split the text on the primary separator (`\n\n` by default).
//! 2. Greedily pack the parts into a buffer while `buffer + separator + part` stays within
//!    `chunk_size`; otherwise flush the trimmed buffer and start over with the part.
//! 3. A part that alone exceeds `chunk_size` goes through the fallback chain: each remaining
//!    separator (line, sentence, clause, word) is tried with the same packing, and the first
//!    one whose pieces all fit wins.
//! 4. If no separator produces fitting pieces, the part is cut into fixed-width character
//!    slices, which always terminates and always fits.
//!
//! Separators that fall on a chunk boundary are dropped together with the surrounding
//! whitespace; everything else is preserved.

use crate::config::ChunkingConfig;
use crate::error::{RagError, Result};

use super::chars::{byte_offset, char_len};

/// One tier of the fallback chain.
///
/// Every strategy has the same shape, `(text, budget) -> pieces`, and the chain is simply an
/// ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitStrategy {
    /// Split on the separator and greedily re-pack the parts.
    Separator(String),
    /// Cut into slices of exactly `chunk_size` characters (the last one may be shorter).
    Characters,
}

impl SplitStrategy {
    /// Maps a configured separator to a strategy; the empty string means character slicing.
    #[must_use]
    pub fn from_separator(separator: &str) -> Self {
        if separator.is_empty() {
            Self::Characters
        } else {
            Self::Separator(separator.to_owned())
        }
    }

    /// Applies this strategy alone, without descending further into oversized pieces.
    ///
    /// The returned pieces are trimmed and never blank, but a [`SplitStrategy::Separator`]
    /// may leave pieces longer than `chunk_size`.
    #[must_use]
    pub fn apply(&self, text: &str, chunk_size: usize) -> Vec<String> {
        match self {
            Self::Separator(separator) => pack(
                text.split(separator.as_str()),
                separator,
                chunk_size,
                |part| trimmed(part).into_iter().collect(),
            ),
            Self::Characters => slice_chars(text, chunk_size),
        }
    }
}

/// Splits one text block into pieces of at most `chunk_size` characters.
///
/// # Example
///
/// ```rust
/// use chunkline_rag::{ChunkingConfig, SeparatorSplitter};
///
/// let config = ChunkingConfig::builder().chunk_size(12).chunk_overlap(0).build();
/// let splitter = SeparatorSplitter::new(&config).unwrap();
/// assert_eq!(
///     splitter.split("alpha beta gamma delta"),
///     ["alpha beta", "gamma delta"]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SeparatorSplitter {
    chunk_size: usize,
    primary: String,
    fallbacks: Vec<SplitStrategy>,
}

impl SeparatorSplitter {
    /// Creates a splitter from the size and separator settings of `config`.
    ///
    /// The primary separator is skipped when it also appears in the fallback hierarchy.
    ///
    /// # Errors
    ///
    /// [`RagError::InvalidChunkSize`] when `chunk_size` is zero.
    pub fn new(config: &ChunkingConfig) -> Result<Self> {
        if config.chunk_size == 0 {
            return Err(RagError::InvalidChunkSize {
                chunk_size: config.chunk_size,
            });
        }
        let fallbacks = config
            .separators
            .iter()
            .filter(|separator| **separator != config.primary_separator)
            .map(|separator| SplitStrategy::from_separator(separator))
            .collect();
        Ok(Self {
            chunk_size: config.chunk_size,
            primary: config.primary_separator.clone(),
            fallbacks,
        })
    }

    /// Maximum piece length in characters.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// The fallback chain tried for oversized parts, before the final character slicing.
    #[must_use]
    pub fn strategies(&self) -> &[SplitStrategy] {
        &self.fallbacks
    }

    /// Splits `text` into trimmed, non-blank pieces of at most `chunk_size` characters.
    #[must_use]
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        if self.primary.is_empty() {
            return slice_chars(text, self.chunk_size);
        }
        pack(
            text.split(self.primary.as_str()),
            &self.primary,
            self.chunk_size,
            |part| self.reduce(part),
        )
    }

    /// Runs the fallback chain on a part that does not fit.
    fn reduce(&self, part: &str) -> Vec<String> {
        self.fallbacks
            .iter()
            .map(|strategy| strategy.apply(part, self.chunk_size))
            .find(|pieces| pieces.iter().all(|piece| char_len(piece) <= self.chunk_size))
            .unwrap_or_else(|| slice_chars(part, self.chunk_size))
    }
}

/// Greedy accumulation shared by the primary pass and every separator tier.
///
/// `oversized` receives each part that cannot fit on its own and returns its replacement pieces.
fn pack<'a, I, F>(parts: I, separator: &str, chunk_size: usize, mut oversized: F) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
    F: FnMut(&str) -> Vec<String>,
{
    let separator_len = char_len(separator);
    let mut pieces = Vec::new();
    let mut buffer = String::new();
    let mut buffer_len = 0usize;

    for part in parts {
        let part_len = char_len(part);
        if buffer_len + part_len + separator_len > chunk_size {
            flush(&mut pieces, &mut buffer);
            buffer_len = 0;
            if part_len > chunk_size {
                pieces.extend(oversized(part));
            } else {
                buffer.push_str(part);
                buffer_len = part_len;
            }
        } else {
            if !buffer.is_empty() {
                buffer.push_str(separator);
                buffer_len += separator_len;
            }
            buffer.push_str(part);
            buffer_len += part_len;
        }
    }

    flush(&mut pieces, &mut buffer);
    pieces
}

fn flush(pieces: &mut Vec<String>, buffer: &mut String) {
    pieces.extend(trimmed(buffer));
    buffer.clear();
}

fn trimmed(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

/// Last resort: fixed-width character slices.
fn slice_chars(text: &str, chunk_size: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let (slice, remainder) = rest.split_at(byte_offset(rest, chunk_size));
        pieces.extend(trimmed(slice));
        rest = remainder;
    }
    pieces
}
