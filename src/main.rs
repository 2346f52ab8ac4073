//! scalectl - CLI companion for the instance auto-scaling monitor

use clap::{CommandFactory, Parser};

mod auth;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod validation;
mod watch;

use cli::args::GlobalOptions;
use cli::metrics::SimulateArgs;
use cli::{Cli, Commands, InstanceCommands, MetricsCommands};
use client::models::NewInstance;
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let opts = GlobalOptions::from_cli(&cli);
    init_logging(opts.debug);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Login {
            email,
            password_stdin,
        } => cli::auth::login(&opts, email, password_stdin).await,
        Commands::Register {
            email,
            password_stdin,
        } => cli::auth::register(&opts, email, password_stdin).await,
        Commands::Logout => cli::auth::logout(&opts),
        Commands::Whoami => cli::auth::whoami(&opts).await,
        Commands::Instance(instance_cmd) => match instance_cmd {
            InstanceCommands::List => cli::instance::list(&opts).await,
            InstanceCommands::Add {
                instance_id,
                region,
                instance_type,
                mock,
            } => {
                let instance = NewInstance {
                    instance_id,
                    region,
                    instance_type,
                    is_mock: mock.then_some(true),
                };
                cli::instance::add(&opts, instance).await
            }
            InstanceCommands::Start { instance_id } => {
                cli::instance::start(&opts, &instance_id).await
            }
            InstanceCommands::Stop { instance_id } => cli::instance::stop(&opts, &instance_id).await,
            InstanceCommands::Delete { instance_id, yes } => {
                cli::instance::delete(&opts, &instance_id, yes).await
            }
        },
        Commands::Metrics(metrics_cmd) => match metrics_cmd {
            MetricsCommands::Show { instance_id, limit } => {
                cli::metrics::show(&opts, &instance_id, limit).await
            }
            MetricsCommands::Decisions {
                instance_id,
                limit,
                page,
                page_size,
            } => cli::metrics::decisions(&opts, &instance_id, limit, page, page_size).await,
            MetricsCommands::Simulate {
                instance_id,
                cpu,
                memory,
                duration,
                interval,
            } => {
                let args = SimulateArgs {
                    cpu,
                    memory,
                    duration,
                    interval,
                };
                cli::metrics::simulate(&opts, &instance_id, args).await
            }
            MetricsCommands::Watch {
                instance_id,
                interval,
                limit,
            } => cli::metrics::watch(&opts, &instance_id, interval, limit).await,
        },
        Commands::Version => {
            println!("scalectl version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "scalectl",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

/// Warnings only by default; `--debug` turns on this crate's debug logs.
/// `RUST_LOG` takes precedence over both.
fn init_logging(debug: bool) {
    let default_filter = if debug { "warn,scalectl=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
