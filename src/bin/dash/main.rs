//! Flowwatch Dashboard - Workflow error monitoring
//!
//! Polls the error feed and displays:
//! - Summary indicators (total, workflows, top workflows, severities)
//! - Filterable error cards
//! - Full record detail on demand
//!
//! Usage:
//!   flowwatch-dash [OPTIONS]
//!
//! Examples:
//!   flowwatch-dash                                   # Read data/errors.json
//!   flowwatch-dash --feed https://example.org/errors.json
//!   flowwatch-dash --refresh-ms 60000                # Refresh every minute
//!   flowwatch-dash --once --format json              # Print one snapshot and exit

mod app;
mod colors;
mod panels;
mod widgets;

use anyhow::{bail, Context, Result};
use app::{Action, App};
use chrono::Local;
use clap::{Parser, ValueEnum};
use colors::DashboardColors;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use flowwatch_core::dashboard::{FetchCompletion, RefreshSchedule};
use flowwatch_core::render::{JsonRenderer, Renderer, TextRenderer};
use flowwatch_core::{
    Dashboard, DashboardConfig, DashboardView, ErrorSource, FilterCriteria, PipelinePhase,
    RefreshOutcome,
};
use panels::{ErrorListPanel, FilterBar, IndicatorsPanel};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{
    fs::OpenOptions,
    io,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use tokio::sync::mpsc;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Output format for `--once`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Dashboard CLI arguments
#[derive(Parser)]
#[command(name = "flowwatch-dash")]
#[command(about = "Auto-refreshing dashboard for workflow execution errors")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(long, env = "FLOWWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Error feed URL or local file path
    #[arg(long, env = "FLOWWATCH_FEED")]
    feed: Option<String>,

    /// Refresh interval in milliseconds
    #[arg(long, env = "FLOWWATCH_REFRESH_MS")]
    refresh_ms: Option<u64>,

    /// Maximum number of cards to display (0 = all)
    #[arg(long, env = "FLOWWATCH_LIMIT")]
    limit: Option<usize>,

    /// Severity assumed for records that carry none
    #[arg(long, env = "FLOWWATCH_DEFAULT_SEVERITY")]
    severity_default: Option<String>,

    /// Display timestamps at this UTC offset (minutes) instead of local time
    #[arg(long, env = "FLOWWATCH_UTC_OFFSET", allow_hyphen_values = true)]
    utc_offset: Option<i32>,

    /// Initial workflow filter
    #[arg(long)]
    workflow: Option<String>,

    /// Initial node filter
    #[arg(long)]
    node: Option<String>,

    /// Initial severity filter
    #[arg(long)]
    severity: Option<String>,

    /// Fetch once, print the dashboard and exit
    #[arg(long)]
    once: bool,

    /// Output format for --once
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", env = "FLOWWATCH_LOG_LEVEL")]
    log_level: String,

    /// Log file used while the terminal UI is active
    #[arg(long, default_value = "/tmp/flowwatch-dash.log", env = "FLOWWATCH_LOG_FILE")]
    log_file: PathBuf,
}

impl Args {
    /// Defaults, then the config file, then flags/environment
    fn load_config(&self) -> Result<DashboardConfig> {
        let mut config = match &self.config {
            Some(path) => DashboardConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => DashboardConfig::default(),
        };

        if let Some(feed) = &self.feed {
            config.feed_url = feed.clone();
        }
        if let Some(ms) = self.refresh_ms {
            config.refresh_interval_ms = ms;
        }
        if let Some(limit) = self.limit {
            config.display_limit = limit;
        }
        if let Some(severity) = &self.severity_default {
            config.default_severity = severity.clone();
        }
        if self.utc_offset.is_some() {
            config.utc_offset_minutes = self.utc_offset;
        }

        config.validate()?;
        Ok(config)
    }

    fn initial_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            workflow: self.workflow.clone(),
            node: self.node.clone(),
            severity: self.severity.clone(),
        }
    }

    fn init_logging(&self) -> Result<()> {
        let filter = EnvFilter::try_from_default_env().or_else(|_| {
            EnvFilter::try_new(format!(
                "flowwatch_core={level},flowwatch_dash={level}",
                level = self.log_level.to_lowercase()
            ))
        })?;

        if self.once {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        } else {
            // The terminal belongs to the UI; logs go to a file
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.log_file)
                .with_context(|| format!("Failed to open log file {}", self.log_file.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    args.init_logging()?;

    let config = args.load_config()?;
    debug!("Dashboard v{} starting...", env!("CARGO_PKG_VERSION"));
    debug!("Feed: {}", config.feed_url);

    let mut dashboard = Dashboard::from_config(&config)?;
    dashboard.apply_filters(args.initial_criteria());

    if args.once {
        return run_once(&mut dashboard, args.format).await;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (source, state) = dashboard.into_parts();
    let mut app = App::new(state, source.describe());
    let schedule = RefreshSchedule::new(config.refresh_interval());
    debug!("Refreshing every {:?}", schedule.interval());

    // Run app
    let result = run_app(&mut terminal, &mut app, source, schedule).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!("Error: {:?}", err);
        return Err(err);
    }

    debug!("Dashboard exiting cleanly");
    Ok(())
}

/// Single refresh rendered to stdout; fails when the feed could not be loaded
async fn run_once(dashboard: &mut Dashboard, format: OutputFormat) -> Result<()> {
    let outcome = dashboard.refresh().await;
    let view = dashboard.view();

    let stdout = io::stdout();
    match format {
        OutputFormat::Text => TextRenderer::new(stdout.lock()).render(&view)?,
        OutputFormat::Json => JsonRenderer::new(stdout.lock()).render(&view)?,
    }

    if let RefreshOutcome::Failed { message } = outcome {
        bail!("Failed to load data: {}", message);
    }
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    source: Arc<dyn ErrorSource>,
    mut schedule: RefreshSchedule,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchCompletion>();

    loop {
        // Initial load happens on the first pass; later ones once per interval
        if schedule.poll_due(Instant::now()) {
            app.start_refresh(&source, &tx);
        }

        while let Ok(completion) = rx.try_recv() {
            match app.finish_refresh(completion) {
                RefreshOutcome::Applied { records } => debug!("Showing {} errors", records),
                RefreshOutcome::Failed { message } => debug!("Showing failure: {}", message),
                RefreshOutcome::Stale => debug!("Discarded stale refresh"),
            }
        }

        let view = app.state.view(chrono::Utc::now());
        terminal.draw(|f| draw(f, app, &view))?;

        // Handle input with keyboard shortcuts
        let wait = schedule.remaining(Instant::now()).min(Duration::from_millis(100));
        if event::poll(wait)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match app.handle_key(key.code) {
                    Action::Quit => return Ok(()),
                    Action::Refresh => {
                        debug!("Manual refresh");
                        app.start_refresh(&source, &tx);
                        schedule.reset(Instant::now());
                    }
                    Action::None => {}
                }
            }
        }
    }
}

fn draw(f: &mut Frame, app: &App, view: &DashboardView) {
    let mut constraints = Vec::new();
    if !app.fullscreen {
        constraints.push(Constraint::Length(3)); // header
        constraints.push(Constraint::Length(7)); // indicators
    }
    constraints.push(Constraint::Length(1)); // filters
    constraints.push(Constraint::Min(5)); // list
    constraints.push(Constraint::Length(1)); // footer

    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut idx = 0;
    if !app.fullscreen {
        let (status, color) = match view.phase {
            PipelinePhase::Idle => ("Waiting".to_string(), DashboardColors::IDLE),
            PipelinePhase::Loading => ("Loading...".to_string(), DashboardColors::WARNING),
            PipelinePhase::Rendered => ("OK".to_string(), DashboardColors::SUCCESS),
            PipelinePhase::LoadFailed => ("Load failed".to_string(), DashboardColors::ERROR),
        };
        let updated = view
            .last_loaded_at
            .map(|at| at.with_timezone(&Local).format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string());
        let title = format!(
            "Flowwatch | {} | Updated {} | {}",
            app.source_name, updated, status
        );
        let header = Paragraph::new(title)
            .style(Style::default().fg(color))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(header, chunks[idx]);
        IndicatorsPanel::render(&view.indicators, f, chunks[idx + 1]);
        idx += 2;
    }

    FilterBar::render(view, f, chunks[idx]);
    ErrorListPanel::render(&view.list, app.selected, f, chunks[idx + 1]);

    let footer = Paragraph::new(
        "'r' refresh | 'w/n/s' filter | 'c' clear | 'l' limit | Enter detail | 'f' fullscreen | 'q' quit",
    )
    .style(Style::default().fg(DashboardColors::SECONDARY));
    f.render_widget(footer, chunks[idx + 2]);

    if let Some(dialog) = &app.detail {
        let area = f.area();
        dialog.render(f, area);
    }
}
