//! Character-based text splitter with overlap.

/// Splits `text` into chunks of at most `chunk_size` characters, carrying
/// `overlap` characters from the end of one chunk into the start of the next.
///
/// Boundaries are character boundaries, so multi-byte text never splits inside
/// a code point. An `overlap` >= `chunk_size` is clamped to `chunk_size - 1`.
///
/// # Example
/// ```
/// use vector_store::chunk_text;
/// let chunks = chunk_text("abcdefgh", 4, 1);
/// assert_eq!(chunks, vec!["abcd", "defg", "gh"]);
/// ```
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    if text.is_empty() || chunk_size == 0 {
        return Vec::new();
    }
    let overlap = overlap.min(chunk_size - 1);

    // Byte offset of every char boundary, including the end of the string.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_count = bounds.len() - 1;

    let mut out = Vec::new();
    let mut start = 0usize;
    while start < char_count {
        let end = (start + chunk_size).min(char_count);
        out.push(text[bounds[start]..bounds[end]].to_string());
        if end == char_count {
            break;
        }
        start = end - overlap;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_a_single_chunk() {
        assert_eq!(chunk_text("hello", 1000, 100), vec!["hello"]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunk_text("", 1000, 100).is_empty());
    }

    #[test]
    fn chunks_respect_size_and_overlap() {
        let text = "a".repeat(2500);
        let chunks = chunk_text(&text, 1000, 100);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 1000);
        assert_eq!(chunks[1].len(), 1000);
        // 2500 chars, step 900: last chunk starts at 1800.
        assert_eq!(chunks[2].len(), 700);
        assert_eq!(&chunks[0][900..], &chunks[1][..100]);
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let text = "🌕🌖🌗🌘🌑🌒🌓🌔".repeat(4);
        let chunks = chunk_text(&text, 10, 2);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 10);
        }
        // Overlap preserved in characters, not bytes.
        let first: Vec<char> = chunks[0].chars().collect();
        let second: Vec<char> = chunks[1].chars().collect();
        assert_eq!(&first[first.len() - 2..], &second[..2]);
    }

    #[test]
    fn oversized_overlap_is_clamped() {
        let chunks = chunk_text("abcdef", 3, 10);
        assert!(chunks.len() > 1);
        assert_eq!(chunks[0], "abc");
    }
}
