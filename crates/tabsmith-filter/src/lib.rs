//! Content filter that rewrites tab-block markup into Bootstrap tabs.
//!
//! A tab block is a title line followed by `----<language>` code segments
//! closed by `--end--`:
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
//! # Architecture
//!
//! Filtering runs in two passes:
//!
//! 1. **Scanning** ([`scan`]): locates blocks and extracts typed
//!    [`TabBlock`] records with their byte spans.
//! 2. **Rendering**: maps each block to Bootstrap tab HTML, which replaces
//!    the block's span. All other text is copied unchanged.
//!
//! The transform is exposed directly ([`transform`], [`TabTransformer`])
//! and as the `bootstrap_tab` [`Filter`] for build pipelines that select
//! filters by identifier ([`FilterRegistry`], [`Pipeline`]).
//!
//! # Example
//!
//! ```
//! let html = tabsmith_filter::transform(
//!     "|JS|Python|\n----js\nconsole.log(1)\n--end--\n----python\nprint(1)\n--end--\n",
//! )
//! .unwrap();
//!
//! assert!(html.contains(r#"<code class="language-js">console.log(1)</code>"#));
//! assert!(html.contains(r#"<div id="content-1-1" class="tab-pane fade in ">"#));
//! ```

mod block;
mod error;
mod filter;
mod pipeline;
mod registry;
mod render;
mod scanner;
mod transformer;

pub use block::{Segment, TabBlock};
pub use error::FilterError;
pub use filter::{BOOTSTRAP_TAB, BootstrapTabFilter, Filter, FilterParams};
pub use pipeline::{Pipeline, PipelineStep};
pub use registry::FilterRegistry;
pub use scanner::scan;
pub use transformer::{MismatchPolicy, TabTransformer, transform};
