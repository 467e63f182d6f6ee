//! Filter error types.

/// Error returned by content filters and pipelines.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// A tab block has a different number of titles and code segments.
    #[error(
        "Malformed tab block #{block} at line {line}: {titles} titles but {segments} code segments"
    )]
    MalformedTabBlock {
        /// 1-based block index within the document.
        block: usize,
        /// 1-based line of the block's title line.
        line: usize,
        /// Number of titles on the title line.
        titles: usize,
        /// Number of `----<language>` segments.
        segments: usize,
    },
    /// A pipeline step names a filter that is not registered.
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),
    /// A pipeline step failed.
    #[error("Filter {filter} failed")]
    Step {
        /// Identifier of the failing filter.
        filter: String,
        /// Underlying error.
        #[source]
        source: Box<FilterError>,
    },
}
