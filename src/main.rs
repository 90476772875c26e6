//! Wabash CLI
//!
//! Terminal front end for the process tracker. Shares the state machine and
//! the persisted session with the browser app, so `start` in one invocation
//! and `stop` in a later one behave like a page reload.

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wabash::api::TrackerApi;
use wabash::tracker::parse_start_time;
use wabash::{
    AdminDashboard, AdminGate, Config, Connectivity, ConnectivityMonitor, FileBackend, HttpClient,
    LoggingConfig, Process, ProcessDraft, SessionStore, Ticker, TimeTracker, TrackerPhase,
};

/// How often `watch` re-checks the backend and the session file
const CHECK_PERIOD: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(name = "wabash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Shop-floor process time tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/wabash/config.toml, then ./wabash.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding the configuration
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Select who is working
    Operator {
        /// Operator name
        #[arg(required_unless_present = "clear")]
        name: Option<String>,
        /// Clear the operator (the running session is kept)
        #[arg(long, conflicts_with = "name")]
        clear: bool,
    },

    /// Show the selected operator
    Whoami,

    /// List the processes that can be tracked
    Processes,

    /// Start working on a process
    Start {
        /// Process id (see `wabash processes`)
        process_id: String,
    },

    /// Stop the running work session
    Stop,

    /// Show the tracker state and elapsed time
    Status,

    /// Live elapsed-time display until Ctrl-C
    Watch,

    /// Manage process definitions
    Admin {
        /// Admin password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,

        #[command(subcommand)]
        command: AdminCommand,
    },

    /// Print a default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// List process definitions
    List,

    /// Create a process definition
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "general")]
        category: String,
        /// Estimated duration in minutes
        #[arg(long, default_value = "0")]
        estimated_duration: u32,
    },

    /// Delete a process definition
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::debug!("{:#}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_ref());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    init_logging(&config.logging);

    let api = HttpClient::new(&config.api.resolved_base_url());
    tracing::debug!(base_url = api.base_url(), "Using backend");

    let mut store = SessionStore::open(FileBackend::new(&config.session.file))
        .with_context(|| format!("Failed to open session file {}", config.session.file))?;

    match cli.command {
        Commands::Operator { name, clear } => {
            let mut tracker = TimeTracker::new(&api, &mut store);
            if clear {
                tracker.change_operator()?;
                println!("Operator cleared");
                return Ok(());
            }

            if !tracker.submit_operator(name.as_deref().unwrap_or_default())? {
                bail!("Enter your name");
            }
            println!("Operator: {}", tracker.state().person_name);
            if let Some(active) = &tracker.state().active {
                println!(
                    "Resuming {} ({})",
                    active.process_name,
                    tracker.elapsed(Utc::now())
                );
            }
        }

        Commands::Whoami => {
            if store.state().has_operator() {
                println!("{}", store.person_name());
            } else {
                println!("No operator selected");
            }
        }

        Commands::Processes => {
            let processes = api.list_processes().await?;
            print_processes(&processes);
        }

        Commands::Start { process_id } => {
            let mut tracker = TimeTracker::new(&api, &mut store);
            tracker.load_processes().await;
            let session = tracker.start(&process_id).await?;
            println!(
                "Started {} for {} (log {})",
                session.process_name,
                tracker.state().person_name,
                session.log_id
            );
        }

        Commands::Stop => {
            let mut tracker = TimeTracker::new(&api, &mut store);
            let elapsed = tracker.elapsed(Utc::now());
            match tracker.stop().await? {
                Some(log) => {
                    let duration = log
                        .duration
                        .map(|secs| wabash::format_elapsed(chrono::Duration::seconds(secs as i64)))
                        .unwrap_or(elapsed);
                    println!("Stopped after {} ({})", duration, log.status);
                }
                None => println!("No work in progress"),
            }
        }

        Commands::Status => print_status(&store),

        Commands::Watch => watch(&api, store).await?,

        Commands::Admin { password, command } => {
            let password = match password {
                Some(password) => password,
                None => prompt("Password: ")?,
            };
            let mut dashboard = AdminDashboard::new(&api, AdminGate::new(&config.admin.password));
            dashboard.unlock(&password)?;
            run_admin(&mut dashboard, command).await?;
        }

        Commands::Config { .. } => unreachable!("handled before loading config"),
    }

    Ok(())
}

async fn run_admin(dashboard: &mut AdminDashboard<'_, HttpClient>, command: AdminCommand) -> Result<()> {
    match command {
        AdminCommand::List => {
            dashboard.refresh().await?;
            print_processes(dashboard.catalog().processes());
        }

        AdminCommand::Create {
            name,
            description,
            category,
            estimated_duration,
        } => {
            *dashboard.form_mut() = ProcessDraft::new(name)
                .description(description)
                .category(category)
                .estimated_duration(estimated_duration);
            let created = dashboard.create().await?;
            println!("Created process {}: {}", created.id, created.name);
        }

        AdminCommand::Delete { id, yes } => {
            dashboard.refresh().await?;
            let Some(process) = dashboard.catalog().get(&id).cloned() else {
                bail!("No process with id {}", id);
            };

            if !yes {
                let answer = prompt(&format!(
                    "Are you sure you want to delete this process? ({}) [y/N] ",
                    process.name
                ))?;
                if !matches!(answer.as_str(), "y" | "Y" | "yes") {
                    println!("Cancelled");
                    return Ok(());
                }
            }

            dashboard.delete(&id).await?;
            println!("Deleted process {}: {}", process.id, process.name);
        }
    }

    Ok(())
}

async fn watch(api: &HttpClient, store: SessionStore<FileBackend>) -> Result<()> {
    let Some(active) = store.active().cloned() else {
        bail!("No work in progress");
    };
    let start = parse_start_time(&active.start_time)
        .ok_or_else(|| anyhow!("Unreadable start time: {}", active.start_time))?;
    let backend = store.into_backend();

    let (ticker, mut elapsed) = Ticker::spawn(start);
    let (checker, mut statuses) = spawn_connectivity_check(api.clone(), CHECK_PERIOD);
    let mut monitor = ConnectivityMonitor::default();

    let mut stdout = io::stdout();
    loop {
        tokio::select! {
            changed = elapsed.changed() => {
                if changed.is_err() {
                    break;
                }
                let banner = monitor
                    .banner()
                    .map(|b| format!("[{}] ", b))
                    .unwrap_or_default();
                print!("\r{}{}  {}   ", banner, active.process_name, *elapsed.borrow());
                stdout.flush()?;
            }
            Some(status) = statuses.recv() => {
                monitor.observe(status);

                // Stopped from another terminal
                let current = SessionStore::open(backend.clone())?;
                if current.active().map(|s| &s.log_id) != Some(&active.log_id) {
                    println!();
                    println!("Session ended");
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    checker.abort();
    ticker.cancel();
    Ok(())
}

/// Check the backend every `period` off the display loop
///
/// Each check is bounded by the client's check timeout; results arrive on
/// the returned channel, the first one immediately.
fn spawn_connectivity_check(
    api: HttpClient,
    period: Duration,
) -> (tokio::task::JoinHandle<()>, mpsc::Receiver<Connectivity>) {
    let (tx, rx) = mpsc::channel(1);
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            if tx.send(api.check_connectivity().await).await.is_err() {
                break;
            }
        }
    });
    (handle, rx)
}

fn print_status(store: &SessionStore<FileBackend>) {
    let state = store.state();
    match TrackerPhase::of(state) {
        TrackerPhase::NoOperator => println!("No operator selected"),
        TrackerPhase::Idle => println!("{}: idle", state.person_name),
        TrackerPhase::Running => {
            if let Some(active) = &state.active {
                println!(
                    "{}: tracking {} for {}",
                    state.person_name,
                    active.process_name,
                    wabash::elapsed_display(Some(active), Utc::now())
                );
            }
        }
    }

    // A session survives clearing the operator
    if !state.has_operator() {
        if let Some(active) = &state.active {
            println!("Session still running: {} (log {})", active.process_name, active.log_id);
        }
    }
}

fn print_processes(processes: &[Process]) {
    if processes.is_empty() {
        println!("No processes defined yet.");
        return;
    }

    let id_width = processes.iter().map(|p| p.id.len()).max().unwrap_or(2).max(2);
    let name_width = processes.iter().map(|p| p.name.len()).max().unwrap_or(4).max(4);

    println!(
        "{:<id_width$}  {:<name_width$}  {:<12}  {:>8}",
        "ID", "NAME", "CATEGORY", "EST(MIN)"
    );
    for p in processes {
        println!(
            "{:<id_width$}  {:<name_width$}  {:<12}  {:>8}",
            p.id, p.name, p.category, p.estimated_duration
        );
        if !p.description.is_empty() {
            println!("{:<id_width$}  {}", "", p.description);
        }
    }
}

fn prompt(question: &str) -> Result<String> {
    print!("{}", question);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn write_default_config(output: Option<&PathBuf>) -> Result<()> {
    let content = wabash::config::generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wabash={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}
