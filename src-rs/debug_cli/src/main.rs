mod cli;
mod models;
mod render;
mod repl;

use std::sync::Arc;

use anyhow::Context;
use browser_console_rs::backend::HttpTaskBackend;
use browser_console_rs::ViewController;
use repl::REPL;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = cli::parse_config();
    let backend = HttpTaskBackend::from_config(&config.console).context("building backend client")?;
    let controller = Arc::new(ViewController::new(config.console.clone(), Arc::new(backend)));
    let mut repl = REPL::new(config, controller);
    repl.run().await
}
