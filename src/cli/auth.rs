//! Account commands: login, register, logout, whoami

use std::io::{self, BufRead};

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use log::debug;

use crate::auth::Screen;
use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::client::AuthApi;
use crate::client::models::Credentials;
use crate::error::{Error, Result};
use crate::models::ProfileDisplay;
use crate::output::{Formattable, print_success, progress};
use crate::validation;

/// Sign in and store the returned token
pub async fn login(opts: &GlobalOptions, email: Option<String>, password_stdin: bool) -> Result<()> {
    let ctx = CommandContext::new(opts, Screen::Login)?;

    let email = match email {
        Some(email) => email,
        None => prompt_email()?,
    };
    let password = if password_stdin {
        read_password_stdin()?
    } else {
        prompt_password("Password")?
    };

    validation::validate_login(&email, &password)?;

    let credentials = Credentials {
        email: email.trim().to_string(),
        password,
    };

    let spinner = progress::spinner("Signing in...");
    let result = ctx.client.login(&credentials).await;
    spinner.finish_and_clear();
    let response = result?;

    ctx.session.login(&response.token)?;
    ctx.session.navigator().navigate(Screen::Instances);
    debug!("Signed in as user {}", response.user_id);

    print_success(
        ctx.format,
        &format!("Logged in as {}", credentials.email.bold()),
        &serde_json::json!({ "user_id": response.user_id, "email": credentials.email }),
    )
}

/// Create an account; the user signs in separately afterwards
pub async fn register(
    opts: &GlobalOptions,
    email: Option<String>,
    password_stdin: bool,
) -> Result<()> {
    let ctx = CommandContext::new(opts, Screen::Register)?;

    let email = match email {
        Some(email) => email,
        None => prompt_email()?,
    };
    let (password, confirmation) = if password_stdin {
        let password = read_password_stdin()?;
        (password.clone(), password)
    } else {
        (
            prompt_password("Password")?,
            prompt_password("Confirm password")?,
        )
    };

    validation::validate_registration(&email, &password, &confirmation)?;

    let credentials = Credentials {
        email: email.trim().to_string(),
        password,
    };

    let spinner = progress::spinner("Creating account...");
    let result = ctx.client.register(&credentials).await;
    spinner.finish_and_clear();
    let response = result?;

    ctx.session.navigator().navigate(Screen::Login);

    print_success(
        ctx.format,
        &format!(
            "Account created for {}. Run {} to sign in.",
            credentials.email.bold(),
            "scalectl login".cyan()
        ),
        &serde_json::json!({ "user_id": response.user_id, "email": credentials.email }),
    )
}

/// Forget the stored token
pub fn logout(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts, Screen::Other)?;
    let was_authenticated = ctx.session.is_authenticated();
    ctx.session.logout()?;

    let message = if was_authenticated {
        "Logged out"
    } else {
        "No active session"
    };
    print_success(
        ctx.format,
        message,
        &serde_json::json!({ "logged_out": true }),
    )
}

/// Show the signed-in user's profile
pub async fn whoami(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::authenticated(opts, Screen::Profile)?;

    let spinner = progress::spinner("Fetching profile...");
    let result = ctx.client.me().await;
    spinner.finish_and_clear();

    let profile = result?;
    vec![ProfileDisplay::from(profile)].print(ctx.format)
}

fn prompt_email() -> Result<String> {
    Ok(Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Email")
        .interact_text()?)
}

fn prompt_password(prompt: &str) -> Result<String> {
    Ok(Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()?)
}

/// Read a single line from stdin, without its line terminator
fn read_password_stdin() -> Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err(Error::Validation(
            crate::error::ValidationError::Required("Password"),
        ));
    }
    Ok(password)
}
