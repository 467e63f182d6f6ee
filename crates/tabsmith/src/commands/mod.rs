//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod run;

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use tabsmith_config::{CliSettings, Config};
use tabsmith_filter::{BootstrapTabFilter, FilterRegistry, MismatchPolicy, Pipeline};

use crate::error::CliError;

pub(crate) use build::BuildArgs;
pub(crate) use run::RunArgs;

/// Arguments shared by commands that run the filter pipeline.
#[derive(Args)]
pub(crate) struct PipelineArgs {
    /// Path to configuration file (default: auto-discover tabsmith.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Filter to apply; repeat to chain filters (overrides config).
    #[arg(short, long = "filter", value_name = "FILTER")]
    filters: Vec<String>,

    /// Render tab blocks with mismatched titles and segments instead of failing.
    #[arg(long)]
    lenient: bool,

    /// Enable verbose output (per-block and per-filter logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl PipelineArgs {
    /// Load configuration with these arguments applied.
    pub(crate) fn load_config(&self, out_dir: Option<PathBuf>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            filters: (!self.filters.is_empty()).then(|| self.filters.clone()),
            on_mismatch: self.lenient.then_some(MismatchPolicy::Lenient),
            out_dir,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Build the filter pipeline described by the configuration.
///
/// # Errors
///
/// Returns an error if the configuration names an unknown filter.
pub(crate) fn build_pipeline(config: &Config) -> Result<Pipeline, CliError> {
    let registry = FilterRegistry::new()
        .with_filter(BootstrapTabFilter::new().with_policy(config.bootstrap_tab.on_mismatch));

    let mut pipeline = Pipeline::new(registry);
    for filter in &config.pipeline.filters {
        pipeline.push(filter.as_str(), config.params_for(filter));
    }
    pipeline.validate()?;

    tracing::info!(
        filters = ?config.pipeline.filters,
        config = ?config.config_path,
        "Filter pipeline ready"
    );
    Ok(pipeline)
}

/// List the identifiers of built-in filters on stdout.
pub(crate) fn list_filters() -> Result<(), CliError> {
    let registry = FilterRegistry::with_defaults();
    let mut stdout = std::io::stdout().lock();
    for identifier in registry.identifiers() {
        writeln!(stdout, "{identifier}")?;
    }
    Ok(())
}

#[cfg(test)]
impl PipelineArgs {
    /// Arguments reading an empty `tabsmith.toml` written to `dir`.
    pub(crate) fn in_dir(dir: &std::path::Path) -> Self {
        let config = dir.join("tabsmith.toml");
        std::fs::write(&config, "").unwrap();
        Self {
            config: Some(config),
            filters: Vec::new(),
            lenient: false,
            verbose: false,
        }
    }

    pub(crate) fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }
}
