//! Tab block transformer: scan, validate, render, splice.

use crate::FilterError;
use crate::block::TabBlock;
use crate::render::render_block;
use crate::scanner::scan;

/// How to handle a tab block whose title and segment counts differ.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MismatchPolicy {
    /// Fail with [`FilterError::MalformedTabBlock`].
    #[default]
    Strict,
    /// Render one pane per title, leaving panes without a segment empty and
    /// dropping segments without a title.
    Lenient,
}

/// Rewrites tab-block markup into Bootstrap tab HTML.
///
/// Text outside tab blocks is copied byte for byte. Block indices start
/// at 1 for every call, so one transformer can be shared across documents
/// and threads.
///
/// # Example
///
/// ```
/// use tabsmith_filter::{MismatchPolicy, TabTransformer};
///
/// let transformer = TabTransformer::new().with_policy(MismatchPolicy::Lenient);
/// let html = transformer
///     .transform("|A|B|\n----js\nconsole.log(1)\n--end--\n")
///     .unwrap();
///
/// assert!(html.contains(r#"<div id="content-1-1" class="tab-pane fade in ">"#));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TabTransformer {
    policy: MismatchPolicy,
}

impl TabTransformer {
    /// Create a transformer with the strict mismatch policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mismatch policy.
    #[must_use]
    pub fn with_policy(mut self, policy: MismatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current mismatch policy.
    #[must_use]
    pub fn policy(&self) -> MismatchPolicy {
        self.policy
    }

    /// Transform a document.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::MalformedTabBlock`] for the first unbalanced
    /// block when the policy is [`MismatchPolicy::Strict`].
    pub fn transform(&self, document: &str) -> Result<String, FilterError> {
        let blocks = scan(document);
        if blocks.is_empty() {
            return Ok(document.to_owned());
        }

        let mut output = String::with_capacity(document.len() + blocks.len() * 512);
        let mut cursor = 0;

        for block in &blocks {
            self.check(block)?;

            output.push_str(&document[cursor..block.span.start]);
            output.push_str(&render_block(block));
            cursor = block.span.end;

            tracing::debug!(
                block = block.index,
                line = block.line,
                tabs = block.titles.len(),
                "Rendered tab block"
            );
        }

        output.push_str(&document[cursor..]);
        Ok(output)
    }

    fn check(&self, block: &TabBlock) -> Result<(), FilterError> {
        if block.is_balanced() {
            return Ok(());
        }

        match self.policy {
            MismatchPolicy::Strict => Err(FilterError::MalformedTabBlock {
                block: block.index,
                line: block.line,
                titles: block.titles.len(),
                segments: block.segments.len(),
            }),
            MismatchPolicy::Lenient => {
                tracing::warn!(
                    block = block.index,
                    line = block.line,
                    titles = block.titles.len(),
                    segments = block.segments.len(),
                    "Tab block title and segment counts differ"
                );
                Ok(())
            }
        }
    }
}

/// Transform a document with the strict mismatch policy.
///
/// # Errors
///
/// Returns [`FilterError::MalformedTabBlock`] if any block has a different
/// number of titles and code segments.
pub fn transform(document: &str) -> Result<String, FilterError> {
    TabTransformer::new().transform(document)
}
