use std::time::Duration;

use afridata::{
    build_store,
    constants::START_TIME,
    graceful_shutdown::shutdown_signal,
    session::{CounterSettings, Session},
    settings::AppConfig,
    telemetry::init_tracing,
    utils::placeholder_image::StockPhotoSource,
};
use anyhow::Context;
use tokio::io::{stdin, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let started = *START_TIME;
    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.log_format);
    tracing::info!("Loaded configuration: {:?}", config);

    let store = build_store(&config)
        .await
        .context("Failed to set up the project store")?;

    let counter = CounterSettings {
        seed: config.counter_seed,
        tick: config.counter_tick()?,
    };

    tracing::info!("🚀 Starting {} v{}", config.name, env!("CARGO_PKG_VERSION"));

    let mut session = Session::start(
        store,
        StockPhotoSource,
        counter,
        BufReader::new(stdin()),
        std::io::stdout(),
    )
    .await;

    let result = tokio::select! {
        res = session.run() => res.context("Terminal session failed"),
        _ = shutdown_signal() => Ok(()),
    };

    let elapsed = (chrono::Utc::now() - started).num_seconds().max(0) as u64;
    tracing::info!(
        "Session closed after {}",
        humantime::format_duration(Duration::from_secs(elapsed))
    );
    result
}
