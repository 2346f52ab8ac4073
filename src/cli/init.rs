//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::config::{Config, DEFAULT_API_URL};
use crate::error::Result;

/// Run the init command
///
/// Prompts for the backend URL and writes the config file, keeping any other
/// settings an existing file already has.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to scalectl!".bold().green());
    println!("Let's point scalectl at your scaling monitor backend.\n");

    let config_path = Config::resolve_path(opts.config_ref())?;
    let mut config = Config::load_or_default(&config_path)?;

    let current = opts
        .api_url
        .clone()
        .or_else(|| config.api_url.clone())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let api_url: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Backend URL")
        .default(current)
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if input.starts_with("http://") || input.starts_with("https://") {
                Ok(())
            } else {
                Err("URL must start with http:// or https://")
            }
        })
        .interact_text()?;

    config.api_url = Some(api_url.trim_end_matches('/').to_string());
    config.save_to(&config_path)?;

    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Create an account", "scalectl register".cyan());
    println!("  {} - Sign in", "scalectl login".cyan());
    println!("  {} - Show configuration status", "scalectl status".cyan());

    Ok(())
}
