use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Url;

pub const DEFAULT_BASE_URL: &str = "https://career.habr.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/104.0.5112.79 Safari/537.36";
/// Pause after every submission or captcha.
pub const DEFAULT_COOLDOWN_SECS: u64 = 11;

#[derive(Parser, Debug)]
#[command(
    name = "habr-responder",
    version,
    about = "Send job applications to every vacancy matching a search query"
)]
pub struct Cli {
    #[arg(
        short,
        long,
        help = "Client cookies as a raw Cookie header (copy from the devtools network tab)"
    )]
    pub cookie: String,
    #[arg(long, help = "Contact to put in the message, e.g. a Telegram handle")]
    pub contact: String,
    #[arg(short, long, help = "Vacancy search query")]
    pub query: Option<String>,
    #[arg(short, long, default_value = DEFAULT_USER_AGENT, help = "HTTP user agent")]
    pub user_agent: String,
    #[arg(long, default_value = DEFAULT_BASE_URL, help = "Job board base URL")]
    pub base_url: String,
    #[arg(long, default_value_t = DEFAULT_COOLDOWN_SECS, help = "Seconds to wait between applications")]
    pub cooldown_secs: u64,
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..), help = "First result page to process")]
    pub start_page: u32,
}

/// Run configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub cookie: String,
    pub contact: String,
    pub query: Option<String>,
    pub user_agent: String,
    pub base_url: Url,
    pub cooldown: Duration,
    pub start_page: u32,
    pub rust_log: String,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        dotenvy::dotenv().ok(); // only used for RUST_LOG; ignore if missing

        let base_url = Url::parse(&cli.base_url)
            .with_context(|| format!("--base-url '{}' is not a valid URL", cli.base_url))?;

        Ok(Config {
            cookie: cli.cookie,
            contact: cli.contact,
            query: cli.query.filter(|q| !q.trim().is_empty()),
            user_agent: cli.user_agent,
            base_url,
            cooldown: Duration::from_secs(cli.cooldown_secs),
            start_page: cli.start_page,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
