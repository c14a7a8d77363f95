//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use courseboard_core::{CompletionRanking, build_snapshot, distinct_logins};
use courseboard_course::CourseClient;
use courseboard_github::GithubClient;
use courseboard_shared::{
    AppConfig, config_file_path, init_config, load_config, validate_course_access, validate_repos,
};
use courseboard_storage::DataStore;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Courseboard — merge submissions, profiles, and grades into one snapshot.
#[derive(Parser)]
#[command(
    name = "courseboard",
    version,
    about = "Aggregate course submissions, GitHub profiles, and grading results into a ranked snapshot.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Data directory override (defaults to the configured one).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch pull requests for every tracked repository.
    FetchPulls {
        /// Re-fetch repositories that already have stored pulls.
        #[arg(long)]
        force: bool,
    },

    /// Fetch GitHub profiles for every distinct pull author.
    FetchProfiles {
        /// Re-fetch even if profiles were already stored.
        #[arg(long)]
        force: bool,
    },

    /// Fetch assignment results from the course backend.
    FetchResults,

    /// Build the consolidated snapshot from stored data.
    Build,

    /// Fetch everything and build the snapshot in one go.
    Run {
        /// Re-fetch data that is already stored.
        #[arg(long)]
        force: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "courseboard=info",
        1 => "courseboard=debug",
        _ => "courseboard=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::FetchPulls { force } => cmd_fetch_pulls(cli.data_dir, force).await,
        Command::FetchProfiles { force } => cmd_fetch_profiles(cli.data_dir, force).await,
        Command::FetchResults => cmd_fetch_results(cli.data_dir).await,
        Command::Build => cmd_build(cli.data_dir).await,
        Command::Run { force } => cmd_run(cli.data_dir, force).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

/// Resolve the data store from config plus an optional CLI override.
fn open_store(config: &AppConfig, data_dir: Option<PathBuf>) -> DataStore {
    let root = data_dir.unwrap_or_else(|| PathBuf::from(&config.defaults.data_dir));
    DataStore::new(root)
}

// ---------------------------------------------------------------------------
// Fetch commands
// ---------------------------------------------------------------------------

async fn cmd_fetch_pulls(data_dir: Option<PathBuf>, force: bool) -> Result<()> {
    let config = load_config()?;
    validate_repos(&config)?;

    let store = open_store(&config, data_dir);
    let client = GithubClient::new(&config.github)?;
    let progress = CliProgress::new();

    let mut fetched = 0usize;
    let mut skipped = 0usize;

    for repo in &config.github.repos {
        if !force && store.has_pulls(repo) {
            info!(repo, "pulls already stored, skipping");
            skipped += 1;
            continue;
        }

        progress.message(format!("Fetching pulls: {repo}"));
        let pulls = client.list_pulls(&config.github.organization, repo).await?;
        info!(repo, count = pulls.len(), "fetched pull requests");
        store.write_pulls(repo, &pulls)?;
        fetched += 1;
    }

    progress.finish();
    println!();
    println!("  Pulls fetched for {fetched} repo(s), {skipped} skipped.");
    println!();
    Ok(())
}

async fn cmd_fetch_profiles(data_dir: Option<PathBuf>, force: bool) -> Result<()> {
    let config = load_config()?;
    validate_repos(&config)?;

    let store = open_store(&config, data_dir);

    if !force && store.has_profiles() {
        info!("profiles already stored, skipping");
        println!("  Profiles already fetched. Use --force to refresh.");
        return Ok(());
    }

    let repo_pulls = store.read_all_pulls(&config.github.repos)?;
    let logins = distinct_logins(&repo_pulls);
    info!(count = logins.len(), "resolving distinct pull authors");

    let client = GithubClient::new(&config.github)?;
    let progress = CliProgress::new();

    let mut profiles = Vec::with_capacity(logins.len());
    for (i, login) in logins.iter().enumerate() {
        progress.message(format!("Fetching profile [{}/{}] {login}", i + 1, logins.len()));
        profiles.push(client.get_profile(login).await?);
    }

    store.write_profiles(&profiles)?;
    progress.finish();

    println!();
    println!("  Fetched {} profile(s).", profiles.len());
    println!();
    Ok(())
}

async fn cmd_fetch_results(data_dir: Option<PathBuf>) -> Result<()> {
    let config = load_config()?;
    validate_course_access(&config)?;

    let store = open_store(&config, data_dir);
    let client = CourseClient::new(&config.course)?;
    let progress = CliProgress::new();

    progress.message("Fetching assignment results");
    let results = client.assignment_results().await?;
    store.write_assignment_results(&results)?;
    progress.finish();

    println!();
    println!("  Fetched {} assignment result(s).", results.len());
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// Build
// ---------------------------------------------------------------------------

async fn cmd_build(data_dir: Option<PathBuf>) -> Result<()> {
    let config = load_config()?;
    validate_repos(&config)?;

    let store = open_store(&config, data_dir);

    let repo_pulls = store.read_all_pulls(&config.github.repos)?;
    let profiles = store.read_profiles()?;
    let results = store.read_assignment_results()?;
    let repo_count = config.github.repos.len();

    info!(
        repos = repo_count,
        profiles = profiles.len(),
        results = results.len(),
        "building snapshot"
    );

    let ranking = CompletionRanking;
    let snapshot = build_snapshot(&repo_pulls, &profiles, &results, repo_count, &ranking);

    store.write_snapshot(&snapshot)?;

    println!();
    println!("  Snapshot built successfully!");
    println!("  Users:       {}", snapshot.users.len());
    println!("  Feedbacks:   {}", snapshot.feedbacks.len());
    println!("  Assignments: {}", snapshot.assignment_details.len());
    println!("  Path:        {}", store.root().join("app-data.json").display());
    println!();
    Ok(())
}

async fn cmd_run(data_dir: Option<PathBuf>, force: bool) -> Result<()> {
    cmd_fetch_pulls(data_dir.clone(), force).await?;
    cmd_fetch_profiles(data_dir.clone(), force).await?;
    cmd_fetch_results(data_dir.clone()).await?;
    cmd_build(data_dir).await
}

// ---------------------------------------------------------------------------
// Config commands
// ---------------------------------------------------------------------------

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    println!("# {}", config_file_path()?.display());
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// Spinner wrapper for long-running fetches.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn message(&self, msg: impl Into<String>) {
        self.spinner.set_message(msg.into());
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}
