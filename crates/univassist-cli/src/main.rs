use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use univassist_core::Workspace;

mod commands;
mod server;

#[derive(Parser)]
#[command(name = "univassist", version, about = "UnivAssist study assistant")]
struct Cli {
    /// Data directory (defaults to $UNIVASSIST_DATA_DIR or ~/.config/univassist)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Canned assistant replies
    Chat {
        #[command(subcommand)]
        action: commands::chat::ChatAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Study planning
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Study timers
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Mood journal
    Mood {
        #[command(subcommand)]
        action: commands::mood::MoodAction,
    },
    /// Productivity reports
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Study goals
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Notifications
    Notify {
        #[command(subcommand)]
        action: commands::notify::NotifyAction,
    },
    /// Quote of the day
    Quote,
    /// Liveness check
    Health,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Serve the HTTP API
    Serve {
        /// Bind host (defaults to server.host)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (defaults to server.port)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Data directory without touching `config.toml` or the collections.
fn resolve_data_dir(data_dir: Option<PathBuf>) -> std::io::Result<PathBuf> {
    match data_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            Ok(dir)
        }
        None => univassist_core::storage::data_dir(),
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "univassist", &mut std::io::stdout());
        return Ok(());
    }

    let dir = resolve_data_dir(cli.data_dir)?;

    // These must keep working when config.toml is broken.
    let command = match cli.command {
        Commands::Health => return commands::print_json(&serde_json::json!({ "status": "ok" })),
        Commands::Config { action } => return commands::config::run(&dir, action),
        command => command,
    };

    let workspace = Workspace::open_at(&dir)?;

    match command {
        Commands::Chat { action } => commands::chat::run(&workspace, action),
        Commands::Task { action } => commands::task::run(&workspace, action),
        Commands::Plan { action } => commands::plan::run(&workspace, action),
        Commands::Timer { action } => commands::timer::run(&workspace, action),
        Commands::Mood { action } => commands::mood::run(&workspace, action),
        Commands::Stats { action } => commands::stats::run(&workspace, action),
        Commands::Goal { action } => commands::goal::run(&workspace, action),
        Commands::Notify { action } => commands::notify::run(&workspace, action),
        Commands::Quote => commands::print_json(&serde_json::json!({
            "quote": workspace.quote_of_day()
        })),
        Commands::Serve { host, port } => {
            let bind = &workspace.config().server;
            let addr = format!(
                "{}:{}",
                host.unwrap_or_else(|| bind.host.clone()),
                port.unwrap_or(bind.port)
            );
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(workspace, &addr))
        }
        Commands::Completions { .. } | Commands::Health | Commands::Config { .. } => Ok(()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
