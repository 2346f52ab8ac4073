//! Metrics commands: show, decisions, simulate and the live watch screen

use std::io::{BufRead, IsTerminal};
use std::time::Duration;

use chrono::{Local, Utc};
use colored::Colorize;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use indicatif::ProgressBar;
use log::debug;
use tokio::sync::mpsc;

use crate::auth::{Screen, SessionState};
use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::MetricsApi;
use crate::client::models::{DecisionQuery, MetricSample, SimulateRequest};
use crate::error::{Error, Result};
use crate::models::{DecisionDisplay, MetricDisplay};
use crate::output::formatters::{format_age, format_percent, parse_timestamp};
use crate::output::table::{format_details, format_table};
use crate::output::{Formattable, json, progress};
use crate::validation;
use crate::watch::{DetailController, DetailView, PollOptions, Snapshot};

/// Rows per table on the pretty watch screen
const WATCH_ROWS: usize = 10;

/// Decisions shown on the pretty watch screen
const WATCH_DECISIONS: usize = 5;

/// Show recent metric samples
pub async fn show(opts: &GlobalOptions, instance_id: &str, limit: Option<usize>) -> Result<()> {
    let ctx = CommandContext::authenticated(opts, Screen::Metrics(instance_id.to_string()))?;
    let limit = limit.unwrap_or(ctx.config.metrics_limit);

    let spinner = progress::spinner(format!("Fetching metrics for {}...", instance_id));
    let result = ctx.client.get_metrics(instance_id, limit).await;
    spinner.finish_and_clear();

    let mut metrics = result?;
    debug!("Fetched {} samples for {}", metrics.len(), instance_id);
    sort_newest_first(&mut metrics);

    let display: Vec<MetricDisplay> = metrics.into_iter().map(MetricDisplay::from).collect();
    display.print(ctx.format)
}

/// Show scaling decisions, either the most recent `limit` or one page
pub async fn decisions(
    opts: &GlobalOptions,
    instance_id: &str,
    limit: Option<usize>,
    page: Option<usize>,
    page_size: usize,
) -> Result<()> {
    let ctx = CommandContext::authenticated(opts, Screen::Metrics(instance_id.to_string()))?;

    let query = match page {
        Some(page) => DecisionQuery::Page {
            page: page.max(1),
            page_size,
        },
        None => DecisionQuery::Limit(limit.unwrap_or(ctx.config.decisions_limit)),
    };

    let spinner = progress::spinner(format!("Fetching decisions for {}...", instance_id));
    let result = ctx.client.get_decisions(instance_id, query).await;
    spinner.finish_and_clear();
    let response = result?;

    let display: Vec<DecisionDisplay> = response
        .decisions
        .into_iter()
        .map(DecisionDisplay::from)
        .collect();
    display.print(ctx.format)?;

    let pagination = response
        .pagination
        .filter(|_| ctx.format != OutputFormat::Json);
    if let Some(pagination) = pagination {
        eprintln!(
            "Page {} of {} ({} decisions)",
            pagination.page,
            pagination.total_pages.max(1),
            pagination.total
        );
        if pagination.has_next() {
            eprintln!(
                "  → Next: {}",
                format!(
                    "scalectl metrics decisions {} --page {} --page-size {}",
                    instance_id,
                    pagination.page + 1,
                    pagination.page_size
                )
                .cyan()
            );
        }
    }

    Ok(())
}

/// Arguments of `metrics simulate`
#[derive(Debug, Clone, Default)]
pub struct SimulateArgs {
    pub cpu: Option<f64>,
    pub memory: Option<f64>,
    pub duration: Option<u32>,
    pub interval: Option<u32>,
}

/// Ask the backend to generate simulated samples
pub async fn simulate(opts: &GlobalOptions, instance_id: &str, args: SimulateArgs) -> Result<()> {
    let ctx = CommandContext::authenticated(opts, Screen::Metrics(instance_id.to_string()))?;

    let request = SimulateRequest {
        instance_id: instance_id.to_string(),
        cpu_utilization: args.cpu,
        memory_usage: args.memory,
        duration_minutes: args.duration,
        interval_seconds: args.interval,
    };
    validation::validate_simulation(&request)?;

    let spinner = progress::spinner("Simulating metrics...");
    let result = ctx.client.simulate(&request).await;
    spinner.finish_and_clear();
    let response = result?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&response)?),
        _ => {
            let message = if response.message.is_empty() {
                "Simulation complete"
            } else {
                response.message.as_str()
            };
            eprintln!("{} {}", "✓".green(), message);
            if !response.details.is_empty() {
                let pairs: Vec<(&str, String)> = response
                    .details
                    .iter()
                    .map(|(key, value)| (key.as_str(), display_value(value)))
                    .collect();
                println!("{}", format_details(&pairs));
            }
        }
    }

    Ok(())
}

/// Live detail screen for one instance.
///
/// Polls in the background until Ctrl-C or a forced logout. Pressing Enter
/// triggers a foreground refresh.
pub async fn watch(
    opts: &GlobalOptions,
    instance_id: &str,
    interval: Option<u64>,
    limit: Option<usize>,
) -> Result<()> {
    let ctx = CommandContext::authenticated(opts, Screen::Metrics(instance_id.to_string()))?;

    let options = PollOptions {
        interval: Duration::from_secs(interval.unwrap_or(ctx.config.poll_interval_secs).max(1)),
        metrics_limit: limit.unwrap_or(ctx.config.metrics_limit),
        decisions_limit: ctx.config.decisions_limit,
    };
    let renderer = Renderer {
        format: ctx.format,
        interval: options.interval,
        clear: ctx.format == OutputFormat::Pretty && std::io::stdout().is_terminal(),
    };

    let mut controller = DetailController::new(ctx.client.clone(), options);
    let mut views = controller.subscribe();
    let mut session = ctx.session.subscribe();

    let spinner = progress::spinner(format!("Loading {}...", instance_id));
    controller.activate(instance_id).await;
    spinner.finish_and_clear();

    if !ctx.session.is_authenticated() {
        return Err(Error::NotLoggedIn);
    }
    renderer.render(&views.borrow_and_update())?;

    let mut enter = spawn_enter_listener();
    let mut stdin_open = true;
    // A manual refresh runs alongside the other branches so Ctrl-C and a
    // forced logout are still seen while it is in flight
    let mut refreshing: Option<LocalBoxFuture<'_, ()>> = None;
    let mut spinner: Option<ProgressBar> = None;

    let outcome = loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                debug!("Interrupted, leaving watch");
                break Ok(());
            }
            changed = session.changed() => {
                if changed.is_err() || *session.borrow_and_update() == SessionState::Unauthenticated {
                    break Err(Error::NotLoggedIn);
                }
            }
            changed = views.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
                let view = views.borrow_and_update().clone();
                if !view.loading {
                    renderer.render(&view)?;
                }
            }
            () = async {
                if let Some(refresh) = refreshing.as_mut() {
                    refresh.await;
                }
            }, if refreshing.is_some() => {
                refreshing = None;
                if let Some(spinner) = spinner.take() {
                    spinner.finish_and_clear();
                }
            }
            pressed = enter.recv(), if stdin_open => match pressed {
                Some(()) if refreshing.is_none() => {
                    spinner = Some(progress::spinner("Refreshing..."));
                    refreshing = Some(controller.refresh().boxed_local());
                }
                Some(()) => debug!("Refresh already in flight"),
                None => stdin_open = false,
            },
        }
    };

    if let Some(spinner) = spinner.take() {
        spinner.finish_and_clear();
    }
    drop(refreshing);
    controller.deactivate();
    outcome
}

/// Forward each line read from stdin as a refresh request.
///
/// Runs on a plain thread so a pending read never holds up runtime shutdown.
fn spawn_enter_listener() -> mpsc::UnboundedReceiver<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            if line.is_err() || tx.send(()).is_err() {
                break;
            }
        }
    });
    rx
}

/// Draws the detail view in the selected output format
struct Renderer {
    format: OutputFormat,
    interval: Duration,
    /// Redraw in place instead of appending
    clear: bool,
}

impl Renderer {
    fn render(&self, view: &DetailView) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let data = serde_json::json!({
                    "instance_id": view.subject,
                    "snapshot": view.snapshot,
                    "error": view.error,
                    "updated_at": view.updated_at.map(|t| t.to_rfc3339()),
                });
                println!("{}", json::format_json_line(&data)?);
            }
            OutputFormat::Table => {
                if let Some(error) = &view.error {
                    eprintln!("{} {}", "✗".red(), error);
                }
                if let Some(snapshot) = &view.snapshot {
                    let (metrics, decisions) = snapshot_tables(snapshot, usize::MAX, usize::MAX);
                    println!("{}\n{}", metrics, decisions);
                }
            }
            OutputFormat::Pretty => {
                if self.clear {
                    print!("\x1B[2J\x1B[H");
                }
                println!("{}", render_pretty(view, self.interval));
            }
        }
        Ok(())
    }
}

/// Human-oriented detail screen
fn render_pretty(view: &DetailView, interval: Duration) -> String {
    let mut out = Vec::new();
    let subject = view.subject.as_deref().unwrap_or("--");

    let heading = match view.snapshot.as_ref().and_then(|s| s.instance.as_ref()) {
        Some(instance) => {
            let status = if instance.is_monitoring {
                "● monitoring".green()
            } else {
                "○ stopped".dimmed()
            };
            format!(
                "{}  ({}, {})  {}",
                subject.bold(),
                instance.instance_type.as_deref().unwrap_or("--"),
                instance.region,
                status
            )
        }
        None => subject.bold().to_string(),
    };
    out.push(heading);

    let updated = match view.updated_at {
        Some(at) => format!(
            "Updated {} ({})",
            at.with_timezone(&Local).format("%H:%M:%S"),
            format_age(at, Utc::now())
        ),
        None => "Not loaded yet".to_string(),
    };
    out.push(
        format!(
            "{} · refresh every {}s · Enter to refresh · Ctrl-C to stop",
            updated,
            interval.as_secs()
        )
        .dimmed()
        .to_string(),
    );

    if let Some(error) = &view.error {
        out.push(format!("{} {}", "✗".red(), error));
    }

    if let Some(snapshot) = &view.snapshot {
        if let Some(latest) = latest_sample(&snapshot.metrics) {
            out.push(String::new());
            out.push(format!(
                "Latest: CPU {}  Memory {}",
                format_percent(latest.cpu_utilization).bold(),
                format_percent(latest.memory_usage).bold()
            ));
        }

        let (metrics, decisions) = snapshot_tables(snapshot, WATCH_ROWS, WATCH_DECISIONS);
        out.push(String::new());
        out.push(metrics);
        out.push(String::new());
        out.push("Recent decisions".bold().to_string());
        out.push(decisions);
    }

    out.join("\n")
}

fn snapshot_tables(snapshot: &Snapshot, max_metrics: usize, max_decisions: usize) -> (String, String) {
    let mut metrics = snapshot.metrics.clone();
    sort_newest_first(&mut metrics);
    let metrics: Vec<MetricDisplay> = metrics
        .into_iter()
        .take(max_metrics)
        .map(MetricDisplay::from)
        .collect();

    let decisions: Vec<DecisionDisplay> = snapshot
        .decisions
        .iter()
        .take(max_decisions)
        .cloned()
        .map(DecisionDisplay::from)
        .collect();

    (format_table(&metrics), format_table(&decisions))
}

/// Strings without quotes, everything else as compact JSON
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn latest_sample(metrics: &[MetricSample]) -> Option<&MetricSample> {
    metrics.iter().max_by_key(|m| parse_timestamp(&m.timestamp))
}

/// Order samples newest first; unparseable timestamps sort last
fn sort_newest_first(metrics: &mut [MetricSample]) {
    metrics.sort_by_key(|m| std::cmp::Reverse(parse_timestamp(&m.timestamp)));
}
