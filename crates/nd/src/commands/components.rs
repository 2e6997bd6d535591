//! `nd components` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use nd_config::Config;
use nd_render::Renderer;

use crate::error::CliError;

/// Arguments for the components command.
#[derive(Args)]
pub(crate) struct ComponentsArgs {
    /// Path to configuration file (default: auto-discover noundry.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ComponentsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let mut stdout = std::io::stdout().lock();
        for tag in component_tags(&config) {
            writeln!(stdout, "{tag}")?;
        }
        Ok(())
    }
}

/// Sorted tags of the built-in components under the configured prefix.
fn component_tags(config: &Config) -> Vec<String> {
    let renderer = Renderer::new(config.render_options()).with_builtins();
    renderer
        .registry()
        .tags()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_tags() {
        let tags = component_tags(&Config::default());

        assert_eq!(tags.len(), 12);
        assert!(tags.contains(&"nd-tabs".to_owned()));
        assert!(tags.contains(&"nd-data-table-cell".to_owned()));
        assert!(tags.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_component_tags_follow_prefix() {
        let mut config = Config::default();
        config.components.prefix = "x-ui-".to_owned();

        let tags = component_tags(&config);

        assert!(tags.iter().all(|t| t.starts_with("x-ui-")));
    }
}
