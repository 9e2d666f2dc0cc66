//! Overlap windows between consecutive chunks.

use super::chars::{head, tail};

/// Extends each chunk with context borrowed from its neighbours.
///
/// - The first chunk gains the first `overlap` characters of the second.
/// - The last chunk is prefixed with the last `overlap` characters of the one before it.
/// - Interior chunks get `ceil(overlap / 2)` characters from the previous chunk and
///   `floor(overlap / 2)` from the next one.
///
/// Windows are cut from the input sequence, never from already-extended chunks, so context
/// does not compound. Each window is joined with a single space; an empty window adds nothing.
/// With `overlap == 0` or fewer than two chunks the input is returned unchanged.
///
/// # Example
///
/// ```rust
/// use chunkline_rag::apply_overlap;
///
/// let windows = apply_overlap(&["AAAA", "BBBB", "CCCC"], 2);
/// assert_eq!(windows, ["AAAA BB", "A BBBB C", "BB CCCC"]);
/// ```
#[must_use]
pub fn apply_overlap<S: AsRef<str>>(chunks: &[S], overlap: usize) -> Vec<String> {
    if overlap == 0 || chunks.len() < 2 {
        return chunks.iter().map(|chunk| chunk.as_ref().to_owned()).collect();
    }

    let last = chunks.len() - 1;
    (0..chunks.len())
        .map(|i| {
            let (before, after) = if i == 0 {
                ("", head(chunks[1].as_ref(), overlap))
            } else if i == last {
                (tail(chunks[i - 1].as_ref(), overlap), "")
            } else {
                (
                    tail(chunks[i - 1].as_ref(), overlap - overlap / 2),
                    head(chunks[i + 1].as_ref(), overlap / 2),
                )
            };
            join_window(before, chunks[i].as_ref(), after)
        })
        .collect()
}

fn join_window(before: &str, chunk: &str, after: &str) -> String {
    let mut out = String::with_capacity(before.len() + chunk.len() + after.len() + 2);
    if !before.is_empty() {
        out.push_str(before);
        out.push(' ');
    }
    out.push_str(chunk);
    if !after.is_empty() {
        out.push(' ');
        out.push_str(after);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_chunks_even_overlap() {
        let windows = apply_overlap(&["AAAA", "BBBB", "CCCC"], 2);
        assert_eq!(windows, ["AAAA BB", "A BBBB C", "BB CCCC"]);
    }

    #[test]
    fn odd_overlap_favours_the_previous_chunk() {
        let windows = apply_overlap(&["abcdef", "ghijkl", "mnopqr"], 3);
        assert_eq!(windows, ["abcdef ghi", "ef ghijkl m", "jkl mnopqr"]);
    }

    #[test]
    fn windows_come_from_unextended_neighbours() {
        let windows = apply_overlap(&["aaaa", "bbbb", "cccc", "dddd"], 4);
        assert_eq!(windows[2], "bb cccc dd");
        assert_eq!(windows[3], "cccc dddd");
        assert!(!windows[2].contains('a'));
    }

    #[test]
    fn overlap_wider_than_neighbour_takes_all_of_it() {
        let windows = apply_overlap(&["ab", "cd"], 5);
        assert_eq!(windows, ["ab cd", "ab cd"]);
    }

    #[test]
    fn empty_window_adds_no_separator() {
        let windows = apply_overlap(&["aa", "bb", "cc"], 1);
        assert_eq!(windows, ["aa b", "a bb", "b cc"]);
    }

    #[test]
    fn zero_overlap_and_short_inputs_are_unchanged() {
        assert_eq!(apply_overlap(&["x", "y"], 0), ["x", "y"]);
        assert_eq!(apply_overlap(&["only"], 10), ["only"]);
        assert!(apply_overlap::<String>(&[], 10).is_empty());
    }

    #[test]
    fn multibyte_windows() {
        let windows = apply_overlap(&["日本語", "中文字"], 2);
        assert_eq!(windows, ["日本語 中文", "本語 中文字"]);
    }

    #[test]
    fn window_size_is_bounded() {
        let chunks: Vec<String> = (0..6).map(|i| format!("chunk-{i}-").repeat(3)).collect();
        let overlap = 5;
        let windows = apply_overlap(&chunks, overlap);
        assert_eq!(windows.len(), chunks.len());
        for (i, (window, chunk)) in windows.iter().zip(&chunks).enumerate() {
            let extra = window.chars().count() - chunk.chars().count();
            let bound = if i == 0 || i == chunks.len() - 1 {
                overlap + 1
            } else {
                overlap + 2
            };
            assert!(extra <= bound);
            assert!(window.contains(chunk.as_str()));
        }
    }
}
