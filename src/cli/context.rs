//! Command execution context
//!
//! Provides a unified context for command execution, eliminating boilerplate
//! for config loading, session restoration, and client initialization.

use std::sync::Arc;

use log::debug;

use crate::auth::{FileTokenStore, Screen, Session, TerminalNavigator};
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{BackendClient, HttpClient};
use crate::config::Config;
use crate::error::{Error, Result};

/// Context for command execution containing config, session, client, and runtime options.
pub struct CommandContext {
    /// Loaded configuration (defaults when no file exists)
    pub config: Config,
    /// Session restored from the credentials file
    pub session: Arc<Session>,
    /// Backend client sharing `session` with its HTTP pipeline
    pub client: Arc<BackendClient>,
    /// Resolved output format
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a context without requiring a session.
    ///
    /// `screen` is where the command starts; a forced logout navigates away
    /// from it to the login screen.
    pub fn new(opts: &GlobalOptions, screen: Screen) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let config = Config::load_or_default(&config_path)?;

        let store = Arc::new(FileTokenStore::new(Config::credentials_path(&config_path)));
        let navigator = Arc::new(TerminalNavigator::new(screen));
        let session = Arc::new(Session::new(store, navigator));

        let base_url = config.api_url(opts.api_url_ref());
        debug!("Using backend {}", base_url);
        let http = Arc::new(HttpClient::new(base_url, session.clone())?);
        let client = Arc::new(BackendClient::new(http));

        let format = resolve_format(opts.format, &config);

        Ok(Self {
            config,
            session,
            client,
            format,
        })
    }

    /// Create a context for a command that needs a signed-in user.
    ///
    /// # Errors
    /// Returns `Error::NotLoggedIn` when no valid token is stored.
    pub fn authenticated(opts: &GlobalOptions, screen: Screen) -> Result<Self> {
        let ctx = Self::new(opts, screen)?;
        ctx.require_auth()?;
        Ok(ctx)
    }

    /// Route guard: fail unless the session is authenticated.
    pub fn require_auth(&self) -> Result<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(Error::NotLoggedIn)
        }
    }
}

/// Flag/env format wins, then the config preference, then pretty.
fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.or_else(|| {
        config
            .preferences
            .format
            .as_deref()
            .and_then(OutputFormat::from_name)
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::tests::token_expiring_at;
    use crate::auth::{FileTokenStore, TokenStore};
    use crate::config::Preferences;
    use tempfile::TempDir;

    fn opts_for(dir: &TempDir) -> GlobalOptions {
        GlobalOptions {
            config: Some(dir.path().join("config.yaml").display().to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_format_precedence() {
        let mut config = Config::default();
        assert_eq!(resolve_format(None, &config), OutputFormat::Pretty);

        config.preferences = Preferences {
            format: Some("json".to_string()),
        };
        assert_eq!(resolve_format(None, &config), OutputFormat::Json);
        assert_eq!(
            resolve_format(Some(OutputFormat::Table), &config),
            OutputFormat::Table
        );
    }

    #[test]
    fn test_guard_rejects_missing_token() {
        let dir = TempDir::new().unwrap();
        let result = CommandContext::authenticated(&opts_for(&dir), Screen::Instances);
        assert!(matches!(result, Err(Error::NotLoggedIn)));
    }

    #[test]
    fn test_guard_rejects_expired_token() {
        let dir = TempDir::new().unwrap();
        let opts = opts_for(&dir);
        let path = Config::credentials_path(&dir.path().join("config.yaml"));
        FileTokenStore::new(path)
            .save(&token_expiring_at(1_000))
            .unwrap();

        let result = CommandContext::authenticated(&opts, Screen::Instances);
        assert!(matches!(result, Err(Error::NotLoggedIn)));
    }

    #[test]
    fn test_guard_accepts_valid_token() {
        let dir = TempDir::new().unwrap();
        let opts = opts_for(&dir);
        let path = Config::credentials_path(&dir.path().join("config.yaml"));
        let far_future = chrono::Utc::now().timestamp() + 3600;
        FileTokenStore::new(path)
            .save(&token_expiring_at(far_future))
            .unwrap();

        let ctx = CommandContext::authenticated(&opts, Screen::Instances).unwrap();
        assert!(ctx.session.is_authenticated());
        assert_eq!(ctx.format, OutputFormat::Pretty);
    }
}
