use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use voyager_config::VoyagerConfig;
use voyager_db::VoyagerDb;
use voyager_db::service::VoyagerService;

mod cli;
mod http_error;
mod routes;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        tracing::error!(error = format!("{error:#}"), "voyager exited with an error");
        eprintln!("voyager error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = VoyagerConfig::load_with_dotenv().context("failed to load configuration")?;
    cli.apply(&mut config);

    let db = VoyagerDb::open(&config.database)
        .await
        .context("failed to open database")?;

    // Schema must be current before the listener binds.
    let report = db
        .run_migrations()
        .await
        .context("schema migration failed; refusing to serve")?;
    tracing::info!(
        applied = report.applied.len(),
        skipped = report.skipped.len(),
        "migrations complete"
    );

    let service = Arc::new(VoyagerService::from_db(db));
    let app = routes::router(Arc::clone(&service), &config.server);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    service.db().pool().close();
    tracing::info!("shut down");
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("VOYAGER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
