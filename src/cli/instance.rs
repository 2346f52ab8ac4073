//! Instance management commands

use colored::Colorize;
use dialoguer::Confirm;
use log::debug;

use crate::auth::Screen;
use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::client::InstanceApi;
use crate::client::models::NewInstance;
use crate::error::Result;
use crate::models::InstanceDisplay;
use crate::output::{Formattable, print_success, progress};
use crate::validation;

/// Run the instance list command
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::authenticated(opts, Screen::Instances)?;

    let spinner = progress::spinner("Fetching instances...");
    let result = ctx.client.list_instances().await;
    spinner.finish_and_clear();

    let instances = result?;
    debug!("Fetched {} instances", instances.len());

    let display: Vec<InstanceDisplay> = instances.into_iter().map(InstanceDisplay::from).collect();
    display.print(ctx.format)
}

/// Register a new instance
pub async fn add(opts: &GlobalOptions, instance: NewInstance) -> Result<()> {
    let ctx = CommandContext::authenticated(opts, Screen::Instances)?;
    validation::validate_new_instance(&instance)?;

    let response = ctx.client.register_instance(&instance).await?;
    let message = if response.message.is_empty() {
        format!("Instance {} registered", response.instance.instance_id)
    } else {
        response.message.clone()
    };

    print_success(
        ctx.format,
        &message,
        &InstanceDisplay::from(response.instance),
    )
}

/// Start monitoring an instance
pub async fn start(opts: &GlobalOptions, instance_id: &str) -> Result<()> {
    let ctx = CommandContext::authenticated(opts, Screen::Instances)?;
    let message = ctx.client.start_monitoring(instance_id).await?;
    print_toggle(&ctx, instance_id, true, message)
}

/// Stop monitoring an instance
pub async fn stop(opts: &GlobalOptions, instance_id: &str) -> Result<()> {
    let ctx = CommandContext::authenticated(opts, Screen::Instances)?;
    let message = ctx.client.stop_monitoring(instance_id).await?;
    print_toggle(&ctx, instance_id, false, message)
}

/// Delete an instance, asking first unless `yes` is set
pub async fn delete(opts: &GlobalOptions, instance_id: &str, yes: bool) -> Result<()> {
    let ctx = CommandContext::authenticated(opts, Screen::Instances)?;

    if !yes {
        eprintln!(
            "{} Delete instance \"{}\"? Its metrics and scaling history will be removed.",
            "⚠".yellow(),
            instance_id
        );
        eprintln!();

        let confirm = Confirm::new()
            .with_prompt("Confirm deletion?")
            .default(false)
            .interact()?;

        if !confirm {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    let message = ctx.client.delete_instance(instance_id).await?;
    let message = if message.is_empty() {
        format!("Instance \"{}\" deleted", instance_id)
    } else {
        message
    };

    print_success(
        ctx.format,
        &message,
        &serde_json::json!({ "deleted": true, "instance_id": instance_id }),
    )
}

fn print_toggle(
    ctx: &CommandContext,
    instance_id: &str,
    monitoring: bool,
    message: String,
) -> Result<()> {
    let message = if message.is_empty() {
        let state = if monitoring { "started" } else { "stopped" };
        format!("Monitoring {} for {}", state, instance_id)
    } else {
        message
    };

    print_success(
        ctx.format,
        &message,
        &serde_json::json!({ "instance_id": instance_id, "is_monitoring": monitoring }),
    )
}
