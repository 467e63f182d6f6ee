//! `tabsmith run` command implementation.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use tabsmith_filter::scan;

use super::{PipelineArgs, build_pipeline};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the run command.
#[derive(Args)]
pub(crate) struct RunArgs {
    /// Input document (default: stdin; `-` also reads stdin).
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

impl RunArgs {
    /// Execute the run command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input cannot be read,
    /// a filter fails, or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.pipeline.load_config(None)?;
        let pipeline = build_pipeline(&config)?;

        let input = input_file(self.input.as_deref());
        let content = match input {
            Some(path) => std::fs::read_to_string(path).map_err(CliError::file_io(path))?,
            None => read_stdin()?,
        };
        let filtered = pipeline.run(&content)?;

        match &self.output {
            Some(path) => std::fs::write(path, &filtered).map_err(CliError::file_io(path))?,
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(filtered.as_bytes())?;
                stdout.flush()?;
            }
        }

        Output::new().unbalanced(input, &scan(&content));
        tracing::info!(
            input_bytes = content.len(),
            output_bytes = filtered.len(),
            "Document filtered"
        );
        Ok(())
    }
}

/// The input file to read, or `None` for stdin (no path, or `-`).
fn input_file(input: Option<&Path>) -> Option<&Path> {
    input.filter(|path| *path != Path::new("-"))
}

fn read_stdin() -> io::Result<String> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(content)
}
