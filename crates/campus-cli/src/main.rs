//! `campus`: terminal dashboard for university student and course records.
//!
//! # Usage
//!
//! ```
//! campus                                  # dashboard against http://localhost:8000
//! campus --env production                 # dashboard against http://api:8000
//! campus --url http://records:9000 health
//! campus --config ~/.config/campus.toml report --json
//! ```

mod app;
mod client;
mod config;
mod report;
mod ui;
mod views;

use std::{
  fs::File,
  io::{self, IsTerminal},
  path::{Path, PathBuf},
  sync::Mutex,
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use campus_core::service::DataService;
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use config::{ConfigFile, Environment, Settings};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "campus", version, about = "Terminal dashboard for university records")]
struct Args {
  /// Path to a TOML config file (api_url, env, log_file).
  #[arg(short, long, value_name = "FILE", env = "CAMPUS_CONFIG")]
  config: Option<PathBuf>,

  /// Base URL of the data service; overrides the environment default.
  #[arg(long, env = "CAMPUS_API_URL")]
  url: Option<String>,

  /// Deployment environment [default: development].
  #[arg(long, value_enum, env = "CAMPUS_ENV")]
  env: Option<Environment>,

  /// Write logs to this file. The dashboard logs nowhere without it.
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
  /// Interactive dashboard (the default).
  Dashboard,
  /// Check that the data service is up.
  Health,
  /// Print the aggregated statistics.
  Report {
    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let command = args.command.unwrap_or(Command::Dashboard);

  let file = ConfigFile::load(args.config.as_deref())?;
  let settings = Settings::resolve(args.url, args.env, args.log_file, file);

  init_tracing(command, settings.log_file.as_deref())?;
  tracing::info!(env = ?settings.env, url = %settings.api_url, "starting campus");

  let client = ApiClient::new(ApiConfig {
    base_url: settings.api_url,
  })
  .context("building HTTP client")?;

  match command {
    Command::Dashboard => run_dashboard(client).await,
    Command::Health => {
      let health = client
        .health()
        .await
        .with_context(|| format!("checking {}", client.base_url()))?;
      println!("{} ({})", health.status, health.service);
      if !health.is_healthy() {
        anyhow::bail!("data service reports {}", health.status);
      }
      Ok(())
    }
    Command::Report { json } => {
      let snapshot = report::Snapshot::fetch(&client)
        .await
        .context("fetching statistics")?;
      let report = snapshot.report();
      if json {
        println!("{}", report.to_json().context("serializing report")?);
      } else {
        print!("{report}");
      }
      Ok(())
    }
  }
}

// ─── Logging ──────────────────────────────────────────────────────────────────

/// The dashboard owns the terminal, so it only logs when given a file.
/// Plain subcommands log to stderr.
fn init_tracing(command: Command, log_file: Option<&Path>) -> Result<()> {
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy();

  match log_file {
    Some(path) => {
      let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    }
    None if command == Command::Dashboard => {}
    None => {
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    }
  }
  Ok(())
}

// ─── Dashboard ────────────────────────────────────────────────────────────────

async fn run_dashboard(client: ApiClient) -> Result<()> {
  let mut app = App::new(client, io::stdout().is_terminal());
  if !app.interactive {
    anyhow::bail!("the dashboard needs an interactive terminal; try `campus report`");
  }

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  app.start().await;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop<S: DataService>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<S>,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    match maybe_event {
      Some(Event::Key(key)) => {
        if !app.handle_key(key).await {
          break;
        }
      }
      // Resize and everything else redraw on the next iteration.
      Some(_) | None => {}
    }
  }

  Ok(())
}
