//! Headless runner that plays a tree grid frame by frame.

mod player;
mod telemetry;

use anyhow::{Context, Result};
use arbor_core::RunnerConfig;
use player::{FrameOutcome, Player};
use tokio::signal;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = load_config()?;

    // Initialize telemetry
    telemetry::init_telemetry(config.log_json)?;

    info!("Starting Arbor runner");

    let frame_interval = Duration::from_millis(config.frame_interval_ms.max(1));
    let mut player = Player::new(config)?;

    let mut ticker = interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if player.play_frame()? == FrameOutcome::Finished {
                    info!(frames = player.frames(), "Frame limit reached");
                    break;
                }
            }
            _ = &mut shutdown => {
                break;
            }
        }
    }

    player.emit_summary();
    Ok(())
}

/// Configuration path comes from the first argument, then `ARBOR_CONFIG`
fn load_config() -> Result<RunnerConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("ARBOR_CONFIG").ok());

    match path {
        Some(path) => RunnerConfig::from_file(&path)
            .with_context(|| format!("failed to load configuration from {}", path)),
        None => Ok(RunnerConfig::default()),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
