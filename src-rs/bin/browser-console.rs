use browser_console_rs::api::server::ConsoleServer;
use browser_console_rs::ConsoleConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ConsoleConfig::from_env();
    let server = ConsoleServer::from_config(config)?;
    server.start().await
}
