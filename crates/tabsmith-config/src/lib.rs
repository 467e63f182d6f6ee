//! Configuration management for tabsmith.
//!
//! Parses `tabsmith.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [pipeline]
//! filters = ["bootstrap_tab"]
//!
//! [bootstrap_tab]
//! on_mismatch = "lenient"
//!
//! [params.bootstrap_tab]
//! theme = "dark"
//!
//! [output]
//! dir = "_site"
//! extension = "html"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tabsmith_filter::{BOOTSTRAP_TAB, FilterParams, MismatchPolicy};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the filter chain.
    pub filters: Option<Vec<String>>,
    /// Override the tab block mismatch policy.
    pub on_mismatch: Option<MismatchPolicy>,
    /// Override the output directory.
    pub out_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tabsmith.toml";

/// Default output file extension.
const DEFAULT_EXTENSION: &str = "html";

/// Application configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Filter chain configuration.
    pub pipeline: PipelineConfig,
    /// `bootstrap_tab` filter configuration.
    pub bootstrap_tab: BootstrapTabConfig,
    /// Per-filter parameters, keyed by filter identifier.
    pub params: BTreeMap<String, BTreeMap<String, String>>,
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,

    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Filter chain configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Filter identifiers, applied in order.
    pub filters: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            filters: vec![BOOTSTRAP_TAB.to_owned()],
        }
    }
}

/// `bootstrap_tab` filter configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct BootstrapTabConfig {
    /// What to do when a block's title and segment counts differ.
    pub on_mismatch: MismatchPolicy,
}

/// Raw output configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
    extension: Option<String>,
}

/// Resolved output configuration with absolute paths.
#[derive(Debug)]
pub struct OutputConfig {
    /// Directory for built files. `None` writes next to each input.
    pub dir: Option<PathBuf>,
    /// Extension for built files, without the leading dot.
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            extension: DEFAULT_EXTENSION.to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("Failed to read configuration file")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("Invalid TOML in configuration file")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tabsmith.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(filters) = &settings.filters {
            self.pipeline.filters.clone_from(filters);
        }
        if let Some(on_mismatch) = settings.on_mismatch {
            self.bootstrap_tab.on_mismatch = on_mismatch;
        }
        if let Some(out_dir) = &settings.out_dir {
            self.output_resolved.dir = Some(out_dir.clone());
        }
    }

    /// Parameters configured for a filter.
    ///
    /// Returns empty parameters if the filter has no `[params.<id>]` table.
    #[must_use]
    pub fn params_for(&self, filter: &str) -> FilterParams {
        self.params
            .get(filter)
            .map(|values| values.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect())
            .unwrap_or_default()
    }

    /// Search for config file in `start` and its parents.
    #[must_use]
    pub fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI settings
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_pipeline()?;
        self.validate_output()?;
        Ok(())
    }

    /// Validate filter chain configuration.
    fn validate_pipeline(&self) -> Result<(), ConfigError> {
        if self.pipeline.filters.is_empty() {
            return Err(ConfigError::Validation(
                "pipeline.filters cannot be empty".to_owned(),
            ));
        }
        if self
            .pipeline
            .filters
            .iter()
            .any(|filter| filter.trim().is_empty())
        {
            return Err(ConfigError::Validation(
                "pipeline.filters cannot contain empty identifiers".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate output configuration.
    fn validate_output(&self) -> Result<(), ConfigError> {
        let extension = &self.output_resolved.extension;
        if extension.is_empty() {
            return Err(ConfigError::Validation(
                "output.extension cannot be empty".to_owned(),
            ));
        }
        if extension.starts_with('.') {
            return Err(ConfigError::Validation(format!(
                "output.extension must not start with a dot (use \"{}\")",
                extension.trim_start_matches('.')
            )));
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.output_resolved = OutputConfig {
            dir: self.output.dir.as_deref().map(|dir| config_dir.join(dir)),
            extension: self
                .output
                .extension
                .clone()
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_owned()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.pipeline.filters, vec!["bootstrap_tab"]);
        assert_eq!(config.bootstrap_tab.on_mismatch, MismatchPolicy::Strict);
        assert!(config.params.is_empty());
        assert_eq!(config.output_resolved.dir, None);
        assert_eq!(config.output_resolved.extension, "html");
        assert!(config.config_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.pipeline.filters, vec!["bootstrap_tab"]);
        assert_eq!(config.bootstrap_tab.on_mismatch, MismatchPolicy::Strict);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[pipeline]
filters = ["bootstrap_tab", "other"]

[bootstrap_tab]
on_mismatch = "lenient"

[params.bootstrap_tab]
theme = "dark"

[output]
dir = "_site"
extension = "htm"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.pipeline.filters, vec!["bootstrap_tab", "other"]);
        assert_eq!(config.bootstrap_tab.on_mismatch, MismatchPolicy::Lenient);
        assert_eq!(config.params_for("bootstrap_tab").get("theme"), Some("dark"));
        assert_eq!(
            config.output_resolved.dir,
            Some(PathBuf::from("/project/_site"))
        );
        assert_eq!(config.output_resolved.extension, "htm");
    }

    #[test]
    fn test_parse_invalid_policy() {
        let result: Result<Config, _> =
            toml::from_str("[bootstrap_tab]\non_mismatch = \"loose\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_params_for_unknown_filter_is_empty() {
        let config = Config::default();
        assert!(config.params_for("bootstrap_tab").is_empty());
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.output_resolved.dir, None);
        assert_eq!(config.output_resolved.extension, "html");
    }

    #[test]
    fn test_validate_empty_filters() {
        let mut config = Config::default();
        config.pipeline.filters.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("pipeline.filters cannot be empty"));
    }

    #[test]
    fn test_validate_blank_filter_identifier() {
        let mut config = Config::default();
        config.pipeline.filters.push("  ".to_owned());
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_extension() {
        let mut config = Config::default();
        config.output_resolved.extension = String::new();
        assert!(config.validate().is_err());

        config.output_resolved.extension = ".html".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("use \"html\""));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings {
            filters: Some(vec!["a".to_owned(), "b".to_owned()]),
            on_mismatch: Some(MismatchPolicy::Lenient),
            out_dir: Some(PathBuf::from("/out")),
        });

        assert_eq!(config.pipeline.filters, vec!["a", "b"]);
        assert_eq!(config.bootstrap_tab.on_mismatch, MismatchPolicy::Lenient);
        assert_eq!(config.output_resolved.dir, Some(PathBuf::from("/out")));
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.pipeline.filters, vec!["bootstrap_tab"]);
        assert_eq!(config.bootstrap_tab.on_mismatch, MismatchPolicy::Strict);
        assert_eq!(config.output_resolved.dir, None);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[output]\ndir = \"public\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.config_path, Some(path));
        assert_eq!(config.output_resolved.dir, Some(dir.path().join("public")));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/tabsmith.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tabsmith.toml");
        std::fs::write(&path, "[pipeline\n").unwrap();

        assert!(matches!(
            Config::load(Some(&path), None),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_error_keeps_toml_detail_in_source() {
        let err = toml::from_str::<Config>("[pipeline\n")
            .map(|_| ())
            .map_err(ConfigError::from)
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid TOML in configuration file");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_load_validates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tabsmith.toml");
        std::fs::write(&path, "[pipeline]\nfilters = []\n").unwrap();

        assert!(matches!(
            Config::load(Some(&path), None),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_load_validates_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tabsmith.toml");
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            filters: Some(Vec::new()),
            ..CliSettings::default()
        };
        assert!(Config::load(Some(&path), Some(&settings)).is_err());
    }

    #[test]
    fn test_discover_from_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("content/guides");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            Config::discover_from(&nested),
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_discover_from_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let found = Config::discover_from(dir.path());
        // A tabsmith.toml above the temp dir would be found; none should be there.
        assert!(found.is_none_or(|path| !path.starts_with(dir.path())));
    }
}
