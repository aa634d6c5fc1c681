mod board;
mod config;
mod errors;
mod message;
mod models;
mod session;
mod submitter;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::board::HabrBoard;
use crate::config::{Cli, Config};
use crate::session::Session;
use crate::submitter::{FixedCooldown, Submitter, TerminalOperator};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_cli(Cli::parse())?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting habr-responder v{}", env!("CARGO_PKG_VERSION"));

    // Cookie problems surface here, before any request is made
    let session = Session::build(&config.cookie, &config.user_agent, config.base_url.clone())
        .context("Failed to set up the HTTP session")?;
    info!(
        "Session ready for {} (query: {})",
        config.base_url,
        config.query.as_deref().unwrap_or("<none>")
    );

    let submitter = Submitter::new(
        HabrBoard::new(session),
        FixedCooldown {
            duration: config.cooldown,
        },
        TerminalOperator,
        config.query.clone(),
        config.contact.clone(),
    )
    .starting_at(config.start_page);

    let summary = submitter.run().await.context("Run aborted")?;

    info!(
        "Done: {} pages, {} applications sent, {} captchas, {} refused, {} unrecognised",
        summary.pages, summary.submitted, summary.captchas, summary.rejected, summary.anomalies
    );

    Ok(())
}
