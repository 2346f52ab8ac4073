//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Flags shared by every command.
///
/// Values here already reflect the flag and environment layers. The config
/// file and built-in defaults are applied by `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format override (pretty, table, json)
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.scalectl/config.yaml)
    pub config: Option<String>,

    /// Backend URL override
    pub api_url: Option<String>,

    /// Debug logging enabled
    pub debug: bool,
}

impl GlobalOptions {
    /// Snapshot the global flags of a parsed command line.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_url: cli.api_url.clone(),
            debug: cli.debug,
        }
    }

    /// Config file override.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Backend URL override.
    pub fn api_url_ref(&self) -> Option<&str> {
        self.api_url.as_deref()
    }
}
