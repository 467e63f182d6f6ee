//! Typed records extracted from tab-block markup.

use std::ops::Range;

/// A single `----<language>` segment inside a tab block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Segment {
    /// Language token from the marker line. Empty for a bare `----`.
    pub language: String,
    /// Code between the marker and the next marker or `--end--`, trimmed.
    pub code: String,
}

impl Segment {
    /// Create a segment from a language token and code body.
    #[must_use]
    pub fn new(language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            code: code.into(),
        }
    }
}

/// A tab block located in a document.
///
/// Titles and segments pair up positionally: `titles[i]` labels the pane
/// rendered from `segments[i]`, and index 0 is the initially active tab.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabBlock {
    /// 1-based block index, counted across the whole document.
    pub index: usize,
    /// 1-based line number of the title line.
    pub line: usize,
    /// Byte range of the matched markup in the source document.
    pub span: Range<usize>,
    /// Tab labels in display order.
    pub titles: Vec<String>,
    /// Code segments in source order.
    pub segments: Vec<Segment>,
}

impl TabBlock {
    /// Whether every title has exactly one segment.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.titles.len() == self.segments.len()
    }
}

/// Split the inner part of a title line into tab labels.
///
/// Pieces are trimmed and empty ones dropped, so `|A| B ||C|` yields
/// `["A", "B", "C"]`.
pub(crate) fn parse_titles(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_titles() {
        assert_eq!(parse_titles("|A|B|C|"), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_parse_titles_trims_whitespace() {
        assert_eq!(
            parse_titles("|  Node.js | Python 3 |"),
            vec!["Node.js", "Python 3"]
        );
    }

    #[test]
    fn test_parse_titles_drops_empty_pieces() {
        assert_eq!(parse_titles("||A|| |B|"), vec!["A", "B"]);
        assert!(parse_titles("||").is_empty());
    }

    #[test]
    fn test_is_balanced() {
        let mut block = TabBlock {
            index: 1,
            line: 1,
            span: 0..0,
            titles: vec!["A".to_owned()],
            segments: vec![Segment::new("js", "1")],
        };
        assert!(block.is_balanced());

        block.titles.push("B".to_owned());
        assert!(!block.is_balanced());
    }
}
