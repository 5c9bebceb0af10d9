//! JobDash CLI - data service and terminal dashboard

use anyhow::Context;
use clap::Parser;
use jobdash::api::ApiServer;
use jobdash::client::HttpFetcher;
use jobdash::config::{CliArgs, ClientArgs, Commands, DashboardConfig, ServiceConfig};
use jobdash::dashboard::{render, run_session, DashboardController};
use jobdash::storage::{DocumentStore, MongoStore};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse CLI arguments
    let args = CliArgs::parse();

    init_logging(&args);

    // Handle result
    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(args: &CliArgs) {
    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    match args.command {
        Commands::Serve {
            mongodb_uri,
            port,
            bind,
            database,
        } => {
            let config = ServiceConfig::new(mongodb_uri, port, bind, database)?;
            let rt = tokio::runtime::Runtime::new().context("Failed to create runtime")?;
            rt.block_on(cmd_serve(config))
        }
        Commands::Dashboard { client } => {
            let rt = current_thread_runtime()?;
            rt.block_on(cmd_dashboard(&client))
        }
        Commands::Snapshot { identity, client } => {
            let rt = current_thread_runtime()?;
            rt.block_on(cmd_snapshot(&identity, &client))
        }
    }
}

/// The dashboard runs on one thread; fetches interleave only at await points.
fn current_thread_runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create runtime")
}

async fn cmd_serve(config: ServiceConfig) -> anyhow::Result<()> {
    info!("Connecting to MongoDB...");
    let store = MongoStore::connect(&config.mongodb_uri, config.database.as_deref())
        .await
        .context("MongoDB connection error")?;
    info!(
        "Connected to MongoDB successfully! Serving '{}' via {}",
        store.database_name(),
        store.backend()
    );

    let server = ApiServer::new(config.server, Arc::new(store));
    server.run().await?;
    Ok(())
}

fn build_controller(client: &ClientArgs) -> anyhow::Result<DashboardController> {
    let config = DashboardConfig::from_cli(client)?;
    let fetcher = HttpFetcher::new(&config.api_url, config.timeout)?;
    info!("Using data service at {}", config.api_url);

    Ok(DashboardController::new(
        Arc::new(fetcher),
        config.stale_policy,
    ))
}

async fn cmd_dashboard(client: &ClientArgs) -> anyhow::Result<()> {
    let mut controller = build_controller(client)?;

    let input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    run_session(&mut controller, input, &mut out).await?;
    Ok(())
}

async fn cmd_snapshot(identity: &str, client: &ClientArgs) -> anyhow::Result<()> {
    let mut controller = build_controller(client)?;

    if !controller.submit_login(identity) {
        anyhow::bail!("Login failed: Please enter a username.");
    }
    controller.settle().await;

    println!("{}", render(controller.state()));

    let failed = controller.failed();
    if !failed.is_empty() {
        let names: Vec<String> = failed.iter().map(|kind| kind.to_string()).collect();
        anyhow::bail!("Failed to load: {}", names.join(", "));
    }
    Ok(())
}
