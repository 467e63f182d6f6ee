//! `tabsmith build` command implementation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::Args;
use tabsmith_filter::scan;

use super::{PipelineArgs, build_pipeline};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Files to filter.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Directory for built files (overrides config; default: next to each input).
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// Every output path is checked before any file is written. Stops at
    /// the first file that fails.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, an output would overwrite an
    /// input or another output, a file cannot be read or written, or a
    /// filter fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.pipeline.load_config(self.out_dir)?;
        let pipeline = build_pipeline(&config)?;
        let targets = plan_targets(
            &self.files,
            config.output_resolved.dir.as_deref(),
            &config.output_resolved.extension,
        )?;

        output.building(self.files.len());

        for (file, target) in self.files.iter().zip(&targets) {
            let content =
                std::fs::read_to_string(file).map_err(CliError::file_io(file))?;
            let filtered = pipeline.run(&content).map_err(|source| CliError::File {
                path: file.clone(),
                source,
            })?;

            if let Some(parent) = target.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).map_err(CliError::file_io(parent))?;
            }
            std::fs::write(target, filtered).map_err(CliError::file_io(target))?;

            let blocks = scan(&content);
            output.unbalanced(Some(file), &blocks);
            output.built(file, target, blocks.len());
            tracing::info!(input = %file.display(), output = %target.display(), "Built file");
        }

        output.finished(self.files.len());
        Ok(())
    }
}

/// Output paths for `files`, in order.
///
/// Paths are compared after normalization, so `page.html` and
/// `./page.html` name the same file.
fn plan_targets(
    files: &[PathBuf],
    out_dir: Option<&Path>,
    extension: &str,
) -> Result<Vec<PathBuf>, CliError> {
    let inputs = files
        .iter()
        .map(|file| normalize(file).map_err(CliError::file_io(file)))
        .collect::<Result<HashSet<_>, _>>()?;

    let mut written = HashSet::new();
    let mut targets = Vec::with_capacity(files.len());
    for file in files {
        let target = output_path(file, out_dir, extension);
        let key = normalize(&target).map_err(CliError::file_io(&target))?;

        if inputs.contains(&key) {
            return Err(CliError::Validation(format!(
                "{}: output {} would overwrite an input file",
                file.display(),
                target.display()
            )));
        }
        if !written.insert(key) {
            return Err(CliError::Validation(format!(
                "{}: output {} is also produced by an earlier input",
                file.display(),
                target.display()
            )));
        }
        targets.push(target);
    }
    Ok(targets)
}

/// Absolute form of `path` with symlinks and `..` resolved as far as the
/// file system allows.
///
/// A path that does not exist yet keeps its file name under its resolved
/// parent directory.
fn normalize(path: &Path) -> std::io::Result<PathBuf> {
    if let Ok(resolved) = path.canonicalize() {
        return Ok(resolved);
    }
    let absolute = std::path::absolute(path)?;
    let resolved_parent = absolute.parent().and_then(|parent| normalize(parent).ok());
    Ok(match (resolved_parent, absolute.file_name()) {
        (Some(parent), Some(name)) => parent.join(name),
        _ => absolute,
    })
}

/// Path of the built file for `input`.
///
/// The input's extension is replaced with `extension`. With `out_dir`, the
/// file is placed in that directory under the same file name.
fn output_path(input: &Path, out_dir: Option<&Path>, extension: &str) -> PathBuf {
    let target = input.with_extension(extension);
    match (out_dir, target.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => target,
    }
}
