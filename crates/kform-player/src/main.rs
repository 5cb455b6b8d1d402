//! Demo formation viewer.
//!
//! Seeds the bundled sample into an in-memory store, plays it on a simulated
//! clock and logs each formation change.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kform_player::demo::seed_sample;
use kform_player::{
    ApiLoader, PlaybackClock, PlaybackDriver, PlayerConfig, PlayerState, SimulatedClock, SyncSession,
};
use kform_store::MemoryRepository;
use kform_sync::seek_time;

/// Length of the sample video in seconds.
const SAMPLE_DURATION: f64 = 50.0;

fn init_tracing() -> anyhow::Result<()> {
    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("kform_player=info".parse()?)
        .add_directive("kform_store=info".parse()?)
        .add_directive("kform_viewer=info".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    info!("Starting kform-viewer");

    let config = PlayerConfig::from_env();
    info!("Viewer config: {:?}", config);

    let repo = MemoryRepository::new();
    let video_id = seed_sample(&repo).await.context("failed to seed sample data")?;

    let session = Arc::new(
        SyncSession::open(&repo, &video_id, config.engine())
            .await
            .context("failed to open sync session")?,
    );

    let loader: ApiLoader<Arc<SimulatedClock>> = ApiLoader::new("simulated-player");
    let clock = loader
        .load(|| async { Ok(Arc::new(SimulatedClock::new(SAMPLE_DURATION))) })
        .await?
        .clone();

    let player: Arc<dyn PlaybackClock> = clock.clone();
    let driver = Arc::new(PlaybackDriver::new(player, config.poll_interval));

    let driver_task = tokio::spawn({
        let driver = Arc::clone(&driver);
        async move { driver.run().await }
    });
    let session_task = tokio::spawn({
        let session = Arc::clone(&session);
        let samples = driver.subscribe();
        let shutdown = driver.shutdown_signal();
        async move { session.run(samples, shutdown).await }
    });

    clock.play()?;
    driver.on_state_change(PlayerState::Playing).await?;

    // Halfway through, jump to the middle of the timeline bar.
    let half = config.demo_duration / 2;
    tokio::select! {
        _ = tokio::time::sleep(half) => {
            if let Some(target) = seek_time(0.5, SAMPLE_DURATION) {
                let target = clock.seek(target)?;
                driver.on_seek(target);
                info!(target, "Seeked to middle of timeline");
            }
            tokio::select! {
                _ = tokio::time::sleep(config.demo_duration.saturating_sub(half)) => {}
                _ = tokio::signal::ctrl_c() => info!("Received shutdown signal"),
            }
        }
        _ = tokio::signal::ctrl_c() => info!("Received shutdown signal"),
    }

    clock.pause()?;
    driver.on_state_change(PlayerState::Paused).await?;
    // Let the session observe the final sample before stopping.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let last = driver.latest();
    let frame = session.frame_at(last.time);
    for marker in session.markers(&last) {
        info!(label = %marker.label, percent = marker.percent, active = marker.active, "Marker");
    }
    println!("{}", serde_json::to_string_pretty(&frame)?);

    driver.shutdown();
    driver_task.await.ok();
    let frames = session_task.await.unwrap_or(0);

    info!(frames, "Viewer shutdown complete");
    Ok(())
}
