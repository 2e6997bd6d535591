//! `nd render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use nd_config::{CliSettings, Config};
use nd_render::{IdStrategy, OrphanPolicy, RenderResult, Renderer};

use crate::error::CliError;
use crate::output::Output;

/// Orphan handling selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum OrphansArg {
    Ignore,
    Warn,
    Error,
}

impl From<OrphansArg> for OrphanPolicy {
    fn from(arg: OrphansArg) -> Self {
        match arg {
            OrphansArg::Ignore => Self::Ignore,
            OrphansArg::Warn => Self::Warn,
            OrphansArg::Error => Self::Error,
        }
    }
}

/// Id strategy selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum IdStrategyArg {
    Sequential,
    Uuid,
}

impl From<IdStrategyArg> for IdStrategy {
    fn from(arg: IdStrategyArg) -> Self {
        match arg {
            IdStrategyArg::Sequential => Self::Sequential,
            IdStrategyArg::Uuid => Self::Uuid,
        }
    }
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markup file to render.
    input: PathBuf,

    /// Output file for the rendered HTML (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover noundry.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Handling of child declarations without a parent (overrides config).
    #[arg(long, value_enum)]
    orphans: Option<OrphansArg>,

    /// Maximum element nesting depth (overrides config).
    #[arg(long)]
    max_depth: Option<usize>,

    /// Element id generation (overrides config).
    #[arg(long, value_enum)]
    id_strategy: Option<IdStrategyArg>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            orphans: self.orphans.map(Into::into),
            max_depth: self.max_depth,
            id_strategy: self.id_strategy.map(Into::into),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let result = render_file(&self.input, &config)?;
        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        match &self.output {
            Some(path) => {
                std::fs::write(path, &result.html).map_err(|source| CliError::Write {
                    path: path.clone(),
                    source,
                })?;
                output.success(&format!("Rendered to {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", result.html)?;
            }
        }

        Ok(())
    }
}

/// Read `input` and render it with the renderer described by `config`.
fn render_file(input: &Path, config: &Config) -> Result<RenderResult, CliError> {
    let markup = std::fs::read_to_string(input).map_err(|source| CliError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let renderer = Renderer::new(config.render_options()).with_builtins();
    let result = renderer.render_markup(&markup)?;

    tracing::info!(
        input = %input.display(),
        bytes = result.html.len(),
        warnings = result.warnings.len(),
        "Rendered markup"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_input(dir: &Path, markup: &str) -> PathBuf {
        let path = dir.join("page.xml");
        std::fs::write(&path, markup).unwrap();
        path
    }

    #[test]
    fn test_render_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            dir.path(),
            r#"<nd-breadcrumbs show-home="false"><nd-breadcrumb-item text="Docs" /></nd-breadcrumbs>"#,
        );

        let result = render_file(&input, &Config::default()).unwrap();

        assert_eq!(
            result.html,
            r#"<nav aria-label="breadcrumb"><ol><li><span>Docs</span></li></ol></nav>"#
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_render_file_reports_orphans_with_warn_policy() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), r#"<nd-tab-item title="Lost">x</nd-tab-item>"#);
        let mut config = Config::default();
        config.render.orphans = OrphanPolicy::Warn;

        let result = render_file(&input, &config).unwrap();

        assert_eq!(result.html, "");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_render_file_uses_configured_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            dir.path(),
            r#"<ui-breadcrumbs show-home="false"><ui-breadcrumb-item text="A" /></ui-breadcrumbs>"#,
        );
        let mut config = Config::default();
        config.components.prefix = "ui-".to_owned();

        let result = render_file(&input, &config).unwrap();

        assert!(result.html.starts_with("<nav"));
    }

    #[test]
    fn test_render_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_file(&dir.path().join("missing.xml"), &Config::default()).unwrap_err();

        assert!(matches!(err, CliError::Read { .. }));
        assert!(err.to_string().contains("missing.xml"));
    }

    #[test]
    fn test_render_file_propagates_render_errors() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "<nd-tabs>");

        let err = render_file(&input, &Config::default()).unwrap_err();

        assert!(matches!(err, CliError::Render(_)));
    }

    #[test]
    fn test_cli_args_convert() {
        assert_eq!(OrphanPolicy::from(OrphansArg::Warn), OrphanPolicy::Warn);
        assert_eq!(IdStrategy::from(IdStrategyArg::Uuid), IdStrategy::Uuid);
    }
}
