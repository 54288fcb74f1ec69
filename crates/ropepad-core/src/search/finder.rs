//! Literal, non-overlapping substring search.
use regex::bytes::Regex;

/// Builds a byte regex that matches `query` literally.
fn literal_pattern(query: &str) -> Result<Regex, regex::Error> {
    Regex::new(&regex::escape(query))
}

/// Returns the start offsets of all non-overlapping occurrences of `query`,
/// scanning left to right. An empty query matches nothing.
///
/// # Errors
///
/// Returns an error if the query is too large to compile.
pub fn find_all(text: &[u8], query: &str) -> Result<Vec<usize>, regex::Error> {
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let regex = literal_pattern(query)?;
    Ok(regex.find_iter(text).map(|m| m.start()).collect())
}

/// Index into `matches` of the first occurrence at or after `from`,
/// wrapping around to the first occurrence.
pub fn next_match(matches: &[usize], from: usize) -> Option<usize> {
    if matches.is_empty() {
        return None;
    }
    Some(matches.iter().position(|&start| start >= from).unwrap_or(0))
}

/// Offset of the first occurrence of `query` at or after `from`, wrapping
/// around to the start of the text.
///
/// # Errors
///
/// Returns an error if the query is too large to compile.
pub fn find_next(text: &[u8], query: &str, from: usize) -> Result<Option<usize>, regex::Error> {
    let matches = find_all(text, query)?;
    Ok(next_match(&matches, from).map(|idx| matches[idx]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_all_counts_occurrences() {
        let text = b"hello\nworld\nhello";
        assert_eq!(find_all(text, "lo").unwrap(), vec![3, 15]);
        assert_eq!(find_all(text, "o").unwrap(), vec![4, 7, 16]);
    }

    #[test]
    fn test_find_all_non_overlapping() {
        assert_eq!(find_all(b"aaaa", "aa").unwrap(), vec![0, 2]);
        assert_eq!(find_all(b"aaa", "aa").unwrap(), vec![0]);
    }

    #[test]
    fn test_find_all_empty_query() {
        assert!(find_all(b"abc", "").unwrap().is_empty());
    }

    #[test]
    fn test_query_is_literal() {
        assert_eq!(find_all(b"a.c abc a.c", "a.c").unwrap(), vec![0, 8]);
        assert_eq!(find_all(b"(x) [y]", "[y]").unwrap(), vec![4]);
    }

    #[test]
    fn test_find_next_wraps() {
        let text = b"hello\nworld\nhello";
        assert_eq!(find_next(text, "lo", 0).unwrap(), Some(3));
        assert_eq!(find_next(text, "lo", 4).unwrap(), Some(15));
        assert_eq!(find_next(text, "lo", 16).unwrap(), Some(3));
        assert_eq!(find_next(text, "xyz", 0).unwrap(), None);
    }

    #[test]
    fn test_next_match_index() {
        assert_eq!(next_match(&[], 0), None);
        assert_eq!(next_match(&[2, 5, 9], 5), Some(1));
        assert_eq!(next_match(&[2, 5, 9], 10), Some(0));
    }
}
