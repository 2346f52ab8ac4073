//! Status command implementation

use colored::Colorize;

use crate::auth::{FileTokenStore, TokenStore, jwt};
use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration and session status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "scalectl Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;

    let config = match Config::load_from(&config_path) {
        Ok(config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());
            config
        }
        Err(crate::error::Error::Config(crate::error::ConfigError::NotFound)) => {
            println!(
                "{} No config file at {} (using defaults)",
                "○".dimmed(),
                config_path.display()
            );
            println!("  → Run 'scalectl init' to create one");
            Config::default()
        }
        Err(e) => return Err(e),
    };

    println!("API URL: {}", config.api_url(opts.api_url_ref()).cyan());
    println!();

    let store = FileTokenStore::new(Config::credentials_path(&config_path));
    println!("Credentials file: {}", store.path().display().to_string().dimmed());
    match store.read() {
        None => {
            println!("{} Not logged in", "✗".red());
            println!("  → Run 'scalectl login' to sign in");
        }
        Some(_) if !store.is_valid() => {
            println!("{} Session token expired or malformed", "⚠".yellow());
            println!("  → Run 'scalectl login' to sign in again");
        }
        Some(token) => match jwt::expiry(&token).flatten() {
            Some(expires) => {
                let remaining = expires.signed_duration_since(chrono::Utc::now());
                let hours = remaining.num_hours();
                let mins = remaining.num_minutes() % 60;
                println!(
                    "{} Logged in (token expires in {}h {}m)",
                    "✓".green(),
                    hours,
                    mins
                );
            }
            None => println!("{} Logged in (token has no expiry)", "✓".green()),
        },
    }

    println!();

    Ok(())
}
