//! Web front end for `envscan`: a single page plus a JSON `/analyze`
//! endpoint.

use anyhow::Context;
use clap::Parser;
use envscan_core::{Analyzer, Config};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod routes;

#[derive(Debug, Parser)]
#[command(name = "envscan-web", version, about = "Serve envscan analyses over HTTP")]
struct Args {
    /// Listen address; overrides `bind` from the config file.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "envscan_web=info,envscan_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = Config::load()?;
    let bind = args.bind.unwrap_or_else(|| config.bind.clone());

    let state = routes::AppState { analyzer: Arc::new(Analyzer::from_config(&config)?) };
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;

    tracing::info!(addr = %bind, "envscan web listening");
    axum::serve(listener, app).await.context("HTTP server failed")?;

    Ok(())
}
