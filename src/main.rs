mod bot;
mod calendar;
mod config;
mod utils;

use anyhow::Result;
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG overrides the default per-crate levels
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "motogp_calendar_bot=info,poise=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Token, data file path and time settings from .env / the environment
    let config = Config::from_env()?;

    // Reads races.json once; commands are registered when the gateway is ready
    let mut client = bot::create_bot(config).await?;

    tracing::info!("Connecting to Discord...");

    if let Err(why) = client.start().await {
        tracing::error!("Gateway connection ended with an error: {:?}", why);
    }

    Ok(())
}
