use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{LevelFilter, info};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

mod cli;

use cli::Cli;
use cli::commands::Commands;
use toolhub::backend::{Backend, HttpBackend};
use toolhub::catalog::{Catalog, CatalogLoader, filter};
use toolhub::config::Config;
use toolhub::dispatch::{FALLBACK_PREFIX, Resolution};
use toolhub::hub::{Hub, execute};
use toolhub::tui::{self, App, EventHandler, TuiRunner};
use toolhub::widgets::{WidgetKind, WidgetOutput, WidgetRegistry};

fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolhub")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("toolhub.log");

    // The TUI owns the screen, so logs go to a file
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // Let everything through the filter; the configured level is applied
    // with set_max_level once the config is loaded
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace"))
        .target(env_logger::Target::Pipe(target))
        .init();
    if env::var_os("RUST_LOG").is_none() {
        log::set_max_level(if verbose { LevelFilter::Debug } else { LevelFilter::Info });
    }

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn apply_log_level(config: &Config, verbose: bool) {
    if env::var_os("RUST_LOG").is_some() {
        return;
    }
    let level = config.level_filter(verbose);
    log::set_max_level(level);
    log::debug!("Log level set to {}", level);
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application against {}", config.backend_url);

    if cli.is_verbose() {
        println!("{} {}", "Backend:".yellow(), config.backend_url);
    }

    let backend: Arc<dyn Backend> = Arc::new(
        HttpBackend::with_options(&config.backend_url, config.http_options()).context("Failed to create HTTP client")?,
    );

    match &cli.command {
        None => run_tui(backend, config).await,
        Some(Commands::List { query }) => handle_list_command(backend.as_ref(), query.as_deref()).await,
        Some(Commands::Run { slug, fields }) => handle_run_command(backend.as_ref(), slug, fields).await,
        Some(Commands::Widgets) => handle_widgets_command(),
    }
}

async fn run_tui(backend: Arc<dyn Backend>, config: &Config) -> Result<()> {
    info!("Launching TUI mode");
    let app = App::new(Hub::new(WidgetRegistry::builtin(), backend.base_url()));

    let terminal = tui::init_terminal().context("Failed to initialize terminal")?;
    let mut runner = TuiRunner::new(terminal, app, backend, EventHandler::new(config.tick_rate()));
    let result = runner.run().await;

    // Restore even when the loop failed
    tui::restore_terminal().context("Failed to restore terminal")?;
    result
}

/// Load the catalog; a failure is reported and treated as an empty catalog.
async fn load_catalog(backend: &dyn Backend) -> Catalog {
    let outcome = CatalogLoader::fetch(backend).await;
    if let Err(e) = &outcome {
        eprintln!("{} {}", "Catalog unavailable:".yellow(), e);
    }
    let mut catalog = Catalog::loading();
    catalog.finish(outcome);
    catalog
}

async fn handle_list_command(backend: &dyn Backend, query: Option<&str>) -> Result<()> {
    info!("Listing tools, query: {:?}", query);
    let catalog = load_catalog(backend).await;
    let registry = WidgetRegistry::builtin();
    let tools = filter(catalog.snapshot().tools(), query.unwrap_or(""));

    if tools.is_empty() {
        println!("{}", "No tools found".dimmed());
        return Ok(());
    }

    let width = tools.iter().map(|t| t.slug.len()).max().unwrap_or(0);
    for tool in &tools {
        let marker = if registry.contains(&tool.slug) {
            "widget".green()
        } else {
            "external".dimmed()
        };
        println!(
            "{:<width$}  {:<8}  {}  {}",
            tool.slug.bold(),
            marker,
            tool.name,
            format!("[{}]", tool.category).magenta(),
            width = width
        );
    }
    println!("{}", format!("{} of {} tools", tools.len(), catalog.snapshot().len()).dimmed());
    Ok(())
}

async fn handle_run_command(backend: &dyn Backend, slug: &str, fields: &[(String, String)]) -> Result<()> {
    info!("Running tool: {} with {} field(s)", slug, fields.len());
    let catalog = load_catalog(backend).await;
    let mut hub = Hub::with_snapshot(WidgetRegistry::builtin(), backend.base_url(), catalog.snapshot().clone());

    let auto_request = hub.select_slug(slug)?;

    if let Resolution::Fallback { descriptor } = hub.resolution() {
        println!("{} {}", descriptor.name.bold(), FALLBACK_PREFIX);
        println!("{}", descriptor.endpoint.blue().underline());
        return Ok(());
    }

    let Some(instance) = hub.active_mut() else {
        eyre::bail!("{} has no widget", slug);
    };
    for (name, value) in fields {
        instance.set_field(name, value)?;
    }
    let is_fetch = matches!(instance.spec().kind, WidgetKind::Fetch { .. });
    if let Some(missing) = instance.fields().missing_required(instance.spec()) {
        eyre::bail!("Field '{}' is required", missing);
    }

    // An auto-load with default values is superseded by explicit fields
    let request = match auto_request {
        Some(request) if fields.is_empty() => Some(request),
        _ => hub.trigger(),
    };

    if let Some(request) = request {
        let completion = execute(backend, request).await;
        hub.apply(completion);
    } else if is_fetch {
        eyre::bail!("{} cannot be run from the command line", slug);
    }

    let Some(instance) = hub.active() else {
        eyre::bail!("{} was closed", slug);
    };
    match instance.output(hub.base_url()) {
        WidgetOutput::Ready(blocks) => {
            for block in blocks {
                println!("{}", block.plain());
            }
            Ok(())
        }
        WidgetOutput::Failed(message) => {
            eprintln!("{} {}", "Error:".red(), message);
            eyre::bail!("{} failed", slug)
        }
        WidgetOutput::Idle | WidgetOutput::Loading => {
            println!("{}", "No result".dimmed());
            Ok(())
        }
    }
}

fn handle_widgets_command() -> Result<()> {
    let registry = WidgetRegistry::builtin();
    for spec in registry.iter() {
        let kind = if spec.is_image() { "image" } else { "json" };
        let fields: Vec<&str> = spec.fields.iter().map(|f| f.name).collect();
        println!(
            "{:<18}  {:<20}  {:<5}  {}",
            spec.slug.bold(),
            spec.path,
            kind,
            fields.join(", ").dimmed()
        );
    }
    println!("{}", format!("{} widgets", registry.len()).dimmed());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    setup_logging(cli.is_verbose()).context("Failed to setup logging")?;

    // Load configuration, then apply TOOLHUB_BACKEND_URL and --backend-url
    let config = Config::load(cli.config.as_ref())
        .context("Failed to load configuration")?
        .with_backend_override(Config::backend_url_from_env(), cli.backend_url.as_deref());
    config.validate().context("Invalid configuration")?;

    apply_log_level(&config, cli.is_verbose());
    info!("Starting with config from: {:?}", cli.config);

    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
