//! Tenant Dashboard CLI
//!
//! Loads the tenant summary once and renders the dashboard in the terminal:
//! - Show the dashboard (optionally interactive)
//! - Print the signup chart series
//! - Export the series as CSV/JSON
//! - Generate a default config file

use anyhow::{Context, Result};
use chrono::Duration;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tenant_dashboard::config::generate_default_config;
use tenant_dashboard::render::render_chart;
use tenant_dashboard::{
    export_to_path, render_dashboard, write_series, Config, DashboardState, DataLoader,
    ExportFormat, Granularity, HttpSummarySource, LoadOutcome, LoggingConfig, RenderOptions,
    ScreenCommand, ScreenLifetime, SystemClock, ZoneSuffixNormalizer,
};

#[derive(Parser)]
#[command(name = "tenant-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tenant signup dashboard for the school admin backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations, then environment)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides the config file
    #[arg(long, global = true)]
    pub backend_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the summary and render the dashboard
    Show {
        /// Chart granularity (day, month)
        #[arg(short, long)]
        granularity: Option<Granularity>,
        /// Keep reading commands from stdin (day, month, select <id>, quit)
        #[arg(short, long)]
        interactive: bool,
        /// Select a tenant from the latest table by school id (or row number)
        #[arg(long)]
        select: Option<String>,
    },

    /// Print the signup chart series
    Chart {
        /// Chart granularity (day, month)
        #[arg(short, long)]
        granularity: Option<Granularity>,
        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Export the signup chart series
    Export {
        /// Chart granularity (day, month)
        #[arg(short, long)]
        granularity: Option<Granularity>,
        /// Export format (csv, json)
        #[arg(short, long, default_value = "csv")]
        format: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Everything needed to draw the screen
struct ScreenContext {
    config: Config,
    normalizer: ZoneSuffixNormalizer,
}

impl ScreenContext {
    fn render(&self, state: &DashboardState, granularity: Granularity) -> String {
        let window = Duration::hours(self.config.dashboard.latest_window_hours);
        let cards = state.cards(&self.normalizer, &SystemClock, window);
        let series = state.signup_series(granularity, &self.normalizer);

        let options = RenderOptions {
            chart_height: self.config.dashboard.chart_height,
            bar_width: self.config.dashboard.bar_width,
            icons: self.config.dashboard.icons,
        };

        render_dashboard(state.phase(), &cards, &series, state.latest(), &options)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, search) = match &cli.config {
        Some(path) => {
            let config = Config::load_with_env(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?;
            (config, None)
        }
        None => {
            let search = Config::load_default();
            (search.config, Some((search.source, search.failures)))
        }
    };
    if let Some(url) = cli.backend_url {
        config.backend.url = url;
    }

    init_logging(&config.logging);

    // Config search ran before logging existed; report it now
    if let Some((source, failures)) = search {
        for failure in &failures {
            tracing::warn!("Ignoring config file: {}", failure);
        }
        match &source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }

    let normalizer = config
        .timezone
        .normalizer()
        .context("Invalid [timezone] configuration")?;
    let ctx = ScreenContext { config, normalizer };

    match cli.command {
        Commands::Show {
            granularity,
            interactive,
            select,
        } => {
            let Some(state) = load_screen(&ctx.config).await? else {
                return Ok(());
            };
            let granularity = granularity.unwrap_or(ctx.config.dashboard.granularity);
            print!("{}", ctx.render(&state, granularity));

            if let Some(school_id) = select {
                select_target(&state, &school_id);
            }

            if interactive {
                run_interactive(&ctx, &state, granularity).await?;
            }
        }

        Commands::Chart {
            granularity,
            format,
        } => {
            let Some(state) = load_screen(&ctx.config).await? else {
                return Ok(());
            };
            ensure_loaded(&state)?;
            let granularity = granularity.unwrap_or(ctx.config.dashboard.granularity);
            let series = state.signup_series(granularity, &ctx.normalizer);

            match format.as_str() {
                "table" => print!(
                    "{}",
                    render_chart(
                        &series,
                        ctx.config.dashboard.chart_height,
                        ctx.config.dashboard.bar_width
                    )
                ),
                other => {
                    let format: ExportFormat = other.parse()?;
                    write_series(&series, format, std::io::stdout().lock())?;
                }
            }
        }

        Commands::Export {
            granularity,
            format,
            output,
        } => {
            // Validate the format before touching the network
            let format: ExportFormat = format.parse()?;
            let Some(state) = load_screen(&ctx.config).await? else {
                return Ok(());
            };
            ensure_loaded(&state)?;
            let granularity = granularity.unwrap_or(ctx.config.dashboard.granularity);
            let series = state.signup_series(granularity, &ctx.normalizer);

            match output {
                Some(path) => {
                    export_to_path(&series, format, &path)?;
                    println!("Exported {} points to {:?}", series.len(), path);
                    if series.skipped > 0 {
                        println!(
                            "{} records skipped (missing or unparseable createdAt)",
                            series.skipped
                        );
                    }
                }
                None => write_series(&series, format, std::io::stdout().lock())?,
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("tenant_dashboard={}", logging.level).into());

    // Logs go to stderr so chart/export output on stdout stays clean
    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Run the one-shot load; Ctrl-C dismisses the screen while it is in flight
///
/// Returns `None` when the screen was dismissed before the summary arrived.
async fn load_screen(config: &Config) -> Result<Option<DashboardState>> {
    let source = HttpSummarySource::new(&config.backend).context("Failed to build HTTP client")?;
    let loader = DataLoader::new(source);
    let lifetime = ScreenLifetime::new();

    let outcome = tokio::select! {
        outcome = loader.load_once(&lifetime) => outcome,
        _ = tokio::signal::ctrl_c() => {
            lifetime.dismiss();
            LoadOutcome::Discarded
        }
    };

    let mut state = DashboardState::new();
    if !state.apply(outcome) {
        eprintln!("Cancelled before the summary arrived");
        return Ok(None);
    }
    Ok(Some(state))
}

fn ensure_loaded(state: &DashboardState) -> Result<()> {
    state
        .load_result()
        .context("Tenant summary unavailable")
}

fn select_target(state: &DashboardState, target: &str) {
    match state.select(target) {
        Some(tenant) => println!("Selected {} ({})", tenant.school_id, tenant.display_name()),
        None => println!("No tenant {} in the latest list", target),
    }
}

async fn run_interactive(
    ctx: &ScreenContext,
    state: &DashboardState,
    mut granularity: Granularity,
) -> Result<()> {
    println!();
    println!("Commands: day | month | toggle | select <schoolId|row> | <row> | quit");
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();

        if input.is_empty() {
            prompt()?;
            continue;
        }

        match input.parse::<ScreenCommand>() {
            Ok(ScreenCommand::Quit) => break,
            Ok(ScreenCommand::Toggle) => {
                granularity = granularity.toggle();
                print!("{}", ctx.render(state, granularity));
            }
            Ok(ScreenCommand::View(g)) => {
                granularity = g;
                print!("{}", ctx.render(state, granularity));
            }
            Ok(ScreenCommand::Select(target)) => select_target(state, &target),
            Err(e) => println!("{}", e),
        }

        prompt()?;
    }

    Ok(())
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}
