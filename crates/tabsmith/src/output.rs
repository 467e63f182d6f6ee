//! Status reporting on stderr.
//!
//! stdout is reserved for filtered documents, so every status line, file
//! report and error goes through [`Output`].

use std::error::Error;
use std::path::Path;

use console::{Style, Term};
use tabsmith_filter::TabBlock;

/// Status writer for the `run` and `build` commands.
pub(crate) struct Output {
    term: Term,
    heading: Style,
    arrow: Style,
    warning: Style,
    failure: Style,
    done: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            heading: Style::new().cyan().bold(),
            arrow: Style::new().dim(),
            warning: Style::new().yellow(),
            failure: Style::new().red(),
            done: Style::new().green(),
        }
    }

    /// Announce a batch of files.
    pub(crate) fn building(&self, files: usize) {
        self.line(&self.heading.apply_to(format!("Building {files} file(s)")).to_string());
    }

    /// Report one built file and how many tab blocks it held.
    pub(crate) fn built(&self, input: &Path, target: &Path, blocks: usize) {
        self.line(&format_built(input, target, blocks, &self.arrow));
    }

    /// Report the end of a batch.
    pub(crate) fn finished(&self, files: usize) {
        self.line(&self.done.apply_to(format!("Built {files} file(s)")).to_string());
    }

    /// Warn about tab blocks rendered with missing or dropped panes.
    ///
    /// `source` names the document; `None` means stdin.
    pub(crate) fn unbalanced(&self, source: Option<&Path>, blocks: &[TabBlock]) {
        for block in blocks.iter().filter(|block| !block.is_balanced()) {
            let message = format_unbalanced(source, block);
            self.line(&self.warning.apply_to(message).to_string());
        }
    }

    /// Print an error with its whole cause chain.
    pub(crate) fn error(&self, err: &dyn Error) {
        let message = format!("Error: {}", error_chain(err));
        self.line(&self.failure.apply_to(message).to_string());
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }
}

fn format_built(input: &Path, target: &Path, blocks: usize, arrow: &Style) -> String {
    let noun = if blocks == 1 { "tab block" } else { "tab blocks" };
    format!(
        "  {} {} {} ({blocks} {noun})",
        input.display(),
        arrow.apply_to("->"),
        target.display()
    )
}

fn format_unbalanced(source: Option<&Path>, block: &TabBlock) -> String {
    let source = source.map_or_else(|| "<stdin>".to_owned(), |path| path.display().to_string());
    format!(
        "warning: {source}:{}: tab block #{} has {} titles but {} code segments",
        block.line,
        block.index,
        block.titles.len(),
        block.segments.len()
    )
}

/// Walk the error source chain and join all messages.
fn error_chain(err: &dyn Error) -> String {
    let mut msgs = vec![err.to_string()];
    let mut source = err.source();
    while let Some(s) = source {
        msgs.push(s.to_string());
        source = s.source();
    }
    msgs.join(": ")
}
