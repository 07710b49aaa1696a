//! `ibs serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use ibs_config::{CliSettings, Config};
use ibs_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover ibs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (request logs and render details).
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable the render cache (default: enabled).
    #[arg(long)]
    cache: Option<bool>,

    /// Disable the render cache.
    #[arg(long, conflicts_with = "cache")]
    no_cache: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host.clone(),
            port: self.port,
            cache_enabled: self.resolve_cache_enabled(),
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config_path = ?config.config_path, "Configuration loaded");

        output.heading(&format!(
            "Starting server on http://{}:{}",
            config.server.host, config.server.port
        ));
        output.field("Project", &config.content.project_id);
        output.field("Dataset", &config.content.dataset);
        output.field(
            "API",
            &format!(
                "v{}{}",
                config.content.api_version,
                if config.content.use_cdn { " (CDN)" } else { "" }
            ),
        );
        if let Some(path) = &config.config_path {
            output.field("Config file", &path.display().to_string());
        }
        output.field(
            "Render cache",
            if config.cache.enabled { "enabled" } else { "disabled" },
        );
        if !config.revalidation_enabled() {
            output.warning("Revalidation webhook disabled: no secret configured");
        }

        let server_config = server_config_from_config(&config, version.to_owned(), self.verbose);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }

    /// Resolve `cache_enabled` from --cache/--no-cache flags.
    fn resolve_cache_enabled(&self) -> Option<bool> {
        self.no_cache.then_some(false).or(self.cache)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: ServeArgs,
    }

    fn parse(args: &[&str]) -> ServeArgs {
        Wrapper::try_parse_from(std::iter::once("serve").chain(args.iter().copied()))
            .unwrap()
            .args
    }

    #[test]
    fn test_cache_flags() {
        assert_eq!(parse(&[]).resolve_cache_enabled(), None);
        assert_eq!(parse(&["--no-cache"]).resolve_cache_enabled(), Some(false));
        assert_eq!(parse(&["--cache", "true"]).resolve_cache_enabled(), Some(true));
    }

    #[test]
    fn test_no_cache_conflicts_with_cache() {
        let result = Wrapper::try_parse_from(["serve", "--cache", "true", "--no-cache"]);
        assert!(result.is_err());
    }
}
