//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod auth;
pub mod context;
pub mod init;
pub mod instance;
pub mod metrics;
pub mod status;

pub use args::OutputFormat;
pub use context::CommandContext;

/// scalectl - CLI companion for the instance auto-scaling monitor
#[derive(Parser, Debug)]
#[command(name = "scalectl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "SCALECTL_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "SCALECTL_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the backend URL
    #[arg(long, global = true, env = "SCALECTL_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "SCALECTL_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize scalectl configuration
    Init,

    /// Show configuration and session status
    Status,

    /// Sign in and store the session token
    Login {
        /// Account email (prompted when omitted)
        #[arg(long, short = 'e')]
        email: Option<String>,

        /// Read the password from stdin instead of prompting
        #[arg(long)]
        password_stdin: bool,
    },

    /// Create a new account
    Register {
        /// Account email (prompted when omitted)
        #[arg(long, short = 'e')]
        email: Option<String>,

        /// Read the password from stdin instead of prompting
        #[arg(long)]
        password_stdin: bool,
    },

    /// Sign out and forget the stored token
    Logout,

    /// Show the signed-in user's profile
    Whoami,

    /// Manage monitored instances
    #[command(subcommand)]
    Instance(InstanceCommands),

    /// Inspect metrics and scaling decisions
    #[command(subcommand)]
    Metrics(MetricsCommands),

    /// Display version information
    Version,

    /// Generate shell completions (static)
    #[command(after_help = "\
Static completions (subcommands/flags only):
  bash:   scalectl completion bash > /etc/bash_completion.d/scalectl
  zsh:    scalectl completion zsh > \"${fpath[1]}/_scalectl\"
  fish:   scalectl completion fish > ~/.config/fish/completions/scalectl.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Instance management subcommands
#[derive(Subcommand, Debug)]
pub enum InstanceCommands {
    /// List registered instances
    #[command(visible_alias = "ls")]
    List,

    /// Register an instance for monitoring
    #[command(after_help = "EXAMPLES:\n  \
            scalectl instance add i-0abc123 --region us-east-1\n  \
            scalectl instance add i-demo --region us-west-2 --type t3.micro --mock")]
    Add {
        /// Cloud provider instance ID
        instance_id: String,

        /// Region the instance runs in
        #[arg(long, short = 'r')]
        region: String,

        /// Declared instance type (e.g. t3.micro)
        #[arg(long = "type", short = 't')]
        instance_type: Option<String>,

        /// Simulated instance without a cloud counterpart
        #[arg(long)]
        mock: bool,
    },

    /// Start collecting metrics for an instance
    Start {
        /// Instance ID
        instance_id: String,
    },

    /// Stop collecting metrics for an instance
    Stop {
        /// Instance ID
        instance_id: String,
    },

    /// Remove an instance
    Delete {
        /// Instance ID
        instance_id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Metrics subcommands
#[derive(Subcommand, Debug)]
pub enum MetricsCommands {
    /// Show recent metric samples
    Show {
        /// Instance ID
        instance_id: String,

        /// Maximum samples to fetch (defaults to config metrics_limit)
        #[arg(long, short = 'l')]
        limit: Option<usize>,
    },

    /// Show scaling decisions
    #[command(after_help = "EXAMPLES:\n  \
            scalectl metrics decisions i-1                 # Most recent decisions\n  \
            scalectl metrics decisions i-1 --limit 5\n  \
            scalectl metrics decisions i-1 --page 2 --page-size 10")]
    Decisions {
        /// Instance ID
        instance_id: String,

        /// Maximum decisions to fetch (defaults to config decisions_limit)
        #[arg(long, short = 'l', conflicts_with = "page")]
        limit: Option<usize>,

        /// Page number, starting at 1
        #[arg(long)]
        page: Option<usize>,

        /// Decisions per page
        #[arg(long, default_value_t = 20, requires = "page")]
        page_size: usize,
    },

    /// Generate simulated metrics for an instance
    Simulate {
        /// Instance ID
        instance_id: String,

        /// CPU utilization in percent
        #[arg(long)]
        cpu: Option<f64>,

        /// Memory usage in percent
        #[arg(long)]
        memory: Option<f64>,

        /// Minutes of data to generate
        #[arg(long)]
        duration: Option<u32>,

        /// Seconds between generated samples
        #[arg(long)]
        interval: Option<u32>,
    },

    /// Continuously refresh metrics and decisions until Ctrl-C
    Watch {
        /// Instance ID
        instance_id: String,

        /// Seconds between refreshes (defaults to config poll_interval_secs)
        #[arg(long, short = 'i')]
        interval: Option<u64>,

        /// Maximum samples to fetch (defaults to config metrics_limit)
        #[arg(long, short = 'l')]
        limit: Option<usize>,
    },
}
