//! Structural scan for tab-block markup.
//!
//! Locates tab blocks line by line and extracts them as [`TabBlock`]
//! records without rendering anything:
//!
//! ```text
//! |JS|Python|
//! ----js
//! console.log(1)
//! --end--
//! ----python
//! print(1)
//! --end--
//! ```
//!
//! A block starts with a title line (`|title|title|`) immediately followed
//! by a `----<language>` marker line. Each marker opens a segment, and the
//! first `--end--` closes the current group of segments. Further groups
//! may follow after blank lines, so both one `--end--` per segment and a
//! single `--end--` closing all segments are accepted.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Segment, TabBlock, parse_titles};

/// Title line: `|A|B|`, optionally indented, with trailing whitespace allowed.
static TITLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*(\|.*\|)\s*$").unwrap());

/// Segment marker line: `----` followed by an optional language token.
static MARKER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^----([A-Za-z0-9_]*)\s*$").unwrap());

/// Literal terminating a group of segments.
const END_MARKER: &str = "--end--";

/// Scan a document for tab blocks.
///
/// Blocks are returned in source order with 1-based indices. Text that
/// does not form a complete block is ignored.
///
/// # Example
///
/// ```
/// use tabsmith_filter::scan;
///
/// let blocks = scan("|JS|\n----js\nconsole.log(1)\n--end--\n");
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].titles, vec!["JS"]);
/// assert_eq!(blocks[0].segments[0].code, "console.log(1)");
/// ```
#[must_use]
pub fn scan(input: &str) -> Vec<TabBlock> {
    Scanner::new(input).scan()
}

/// A line of the input without its trailing `\n`.
#[derive(Clone, Copy, Debug)]
struct Line<'a> {
    /// Byte offset of the line start in the input.
    start: usize,
    text: &'a str,
}

/// Segments closed by a single `--end--`.
#[derive(Debug)]
struct Group {
    segments: Vec<Segment>,
    /// Index of the line holding `--end--`.
    end_line: usize,
    /// Byte offset just past `--end--`.
    end: usize,
    /// Whether `--end--` is the last non-whitespace text on its line.
    line_closed: bool,
}

struct Scanner<'a> {
    input: &'a str,
    lines: Vec<Line<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        let mut start = 0;
        let lines = input
            .split_inclusive('\n')
            .map(|raw| {
                let line = Line {
                    start,
                    text: raw.strip_suffix('\n').unwrap_or(raw),
                };
                start += raw.len();
                line
            })
            .collect();
        Self { input, lines }
    }

    fn scan(&self) -> Vec<TabBlock> {
        let mut blocks = Vec::new();
        let mut at = 0;

        while at < self.lines.len() {
            match self.block_at(at, blocks.len() + 1) {
                Some((block, next)) => {
                    blocks.push(block);
                    at = next;
                }
                None => at += 1,
            }
        }

        blocks
    }

    /// Try to read a block whose title line is at `at`.
    ///
    /// Returns the block and the index of the first line after it.
    fn block_at(&self, at: usize, index: usize) -> Option<(TabBlock, usize)> {
        let line = self.lines[at];
        let caps = TITLE_LINE.captures(line.text)?;
        let title = caps.get(1)?;

        let mut group = self.group_at(at + 1)?;
        let mut segments = Vec::new();
        let (end, end_line) = loop {
            segments.append(&mut group.segments);

            let next = if group.line_closed {
                self.next_content_line(group.end_line + 1)
                    .and_then(|idx| self.group_at(idx))
            } else {
                None
            };

            match next {
                Some(next) => group = next,
                None => break (group.end, group.end_line),
            }
        };

        let block = TabBlock {
            index,
            line: at + 1,
            span: line.start + title.start()..end,
            titles: parse_titles(title.as_str()),
            segments,
        };
        Some((block, end_line + 1))
    }

    /// Try to read a group of segments whose first marker line is at `at`.
    ///
    /// Returns `None` when the line is not a marker or no `--end--` follows.
    fn group_at(&self, at: usize) -> Option<Group> {
        let caps = MARKER_LINE.captures(self.lines.get(at)?.text)?;
        let mut language = caps[1].to_owned();
        let mut body_start = self.next_line_start(at);
        let mut segments = Vec::new();

        for (idx, line) in self.lines.iter().enumerate().skip(at + 1) {
            if let Some(pos) = line.text.find(END_MARKER) {
                let marker_start = line.start + pos;
                segments.push(Segment {
                    language,
                    code: self.body(body_start, marker_start),
                });
                let tail = &line.text[pos + END_MARKER.len()..];
                return Some(Group {
                    segments,
                    end_line: idx,
                    end: marker_start + END_MARKER.len(),
                    line_closed: tail.trim().is_empty(),
                });
            }

            if let Some(caps) = MARKER_LINE.captures(line.text) {
                let previous = std::mem::replace(&mut language, caps[1].to_owned());
                segments.push(Segment {
                    language: previous,
                    code: self.body(body_start, line.start),
                });
                body_start = self.next_line_start(idx);
            }
        }

        None
    }

    /// Index of the first non-blank line at or after `from`.
    fn next_content_line(&self, from: usize) -> Option<usize> {
        (from..self.lines.len()).find(|&idx| !self.lines[idx].text.trim().is_empty())
    }

    /// Byte offset where the line after `idx` begins.
    fn next_line_start(&self, idx: usize) -> usize {
        self.lines
            .get(idx + 1)
            .map_or(self.input.len(), |line| line.start)
    }

    fn body(&self, start: usize, end: usize) -> String {
        self.input
            .get(start..end)
            .map(str::trim)
            .unwrap_or_default()
            .to_owned()
    }
}
