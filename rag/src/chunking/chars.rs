//! Character-based measuring and slicing.
//!
//! Every size in this crate is counted in `char`s, so all cuts must land on char boundaries.

/// Number of `char`s in `text`.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the `n`th char, or `text.len()` if `text` is shorter.
pub(crate) fn byte_offset(text: &str, n: usize) -> usize {
    text.char_indices().nth(n).map_or(text.len(), |(idx, _)| idx)
}

/// The first `n` chars of `text`.
pub(crate) fn head(text: &str, n: usize) -> &str {
    &text[..byte_offset(text, n)]
}

/// The last `n` chars of `text`.
pub(crate) fn tail(text: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    text.char_indices()
        .rev()
        .nth(n - 1)
        .map_or(text, |(idx, _)| &text[idx..])
}
