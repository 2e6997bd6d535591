//! Configuration management for noundry.
//!
//! Parses `noundry.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [render]
//! id_strategy = "sequential"
//! id_prefix = ""
//! max_depth = 64
//! orphans = "ignore"
//!
//! [components]
//! prefix = "nd-"
//!
//! [defaults]
//! select_placeholder = "Select option"
//! data_table_per_page = 10
//! breadcrumb_separator = "/"
//! ```

use std::path::{Path, PathBuf};

use nd_render::{ComponentDefaults, DEFAULT_PREFIX, IdStrategy, OrphanPolicy, RenderOptions};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override orphan handling.
    pub orphans: Option<OrphanPolicy>,
    /// Override maximum nesting depth.
    pub max_depth: Option<usize>,
    /// Override id generation strategy.
    pub id_strategy: Option<IdStrategy>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "noundry.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Render configuration.
    pub render: RenderConfig,
    /// Component registration configuration.
    pub components: ComponentsConfig,
    /// Attribute fallbacks for built-in components.
    pub defaults: DefaultsConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Render configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Element id generation.
    pub id_strategy: IdStrategy,
    /// Prefix prepended to generated ids.
    pub id_prefix: String,
    /// Maximum element nesting depth.
    pub max_depth: usize,
    /// Handling of child declarations without a parent.
    pub orphans: OrphanPolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::default(),
            id_prefix: String::new(),
            max_depth: 64,
            orphans: OrphanPolicy::default(),
        }
    }
}

/// Component registration configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ComponentsConfig {
    /// Tag prefix of the built-in components.
    pub prefix: String,
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_owned(),
        }
    }
}

/// Component defaults configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Placeholder shown by an empty select.
    pub select_placeholder: String,
    /// Rows per page of a data table.
    pub data_table_per_page: usize,
    /// Separator between breadcrumb items.
    pub breadcrumb_separator: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let defaults = ComponentDefaults::default();
        Self {
            select_placeholder: defaults.select_placeholder,
            data_table_per_page: defaults.data_table_per_page,
            breadcrumb_separator: defaults.breadcrumb_separator,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a numeric field to be greater than zero.
fn require_positive(value: usize, field: &str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Validation(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `noundry.toml` in current directory and parents,
    /// falling back to defaults when none exists.
    ///
    /// CLI settings are applied after loading and validated with the rest of
    /// the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let discovered = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::discover_from(&cwd)),
        };

        let mut config = match discovered {
            Some(path) => Self::load_from_file(&path)?,
            None => {
                tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
                Self::default()
            }
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(orphans) = settings.orphans {
            self.render.orphans = orphans;
        }
        if let Some(max_depth) = settings.max_depth {
            self.render.max_depth = max_depth;
        }
        if let Some(id_strategy) = settings.id_strategy {
            self.render.id_strategy = id_strategy;
        }
    }

    /// Search for config file in `start` and its parents.
    #[must_use]
    pub fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
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
        config.config_path = Some(path.to_path_buf());

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive(self.render.max_depth, "render.max_depth")?;
        require_positive(
            self.defaults.data_table_per_page,
            "defaults.data_table_per_page",
        )?;

        let prefix = &self.components.prefix;
        require_non_empty(prefix, "components.prefix")?;
        if !prefix.ends_with('-') {
            return Err(ConfigError::Validation(format!(
                "components.prefix must end with '-', got {prefix:?}"
            )));
        }

        Ok(())
    }

    /// Renderer options described by this configuration.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::default()
            .with_id_strategy(self.render.id_strategy)
            .with_id_prefix(self.render.id_prefix.clone())
            .with_max_depth(self.render.max_depth)
            .with_orphans(self.render.orphans)
            .with_component_prefix(self.components.prefix.clone())
            .with_defaults(ComponentDefaults {
                select_placeholder: self.defaults.select_placeholder.clone(),
                data_table_per_page: self.defaults.data_table_per_page,
                breadcrumb_separator: self.defaults.breadcrumb_separator.clone(),
            })
    }
}
