//! Playback polling.
//!
//! [`PlaybackDriver`] samples a [`PlaybackClock`] every poll interval while
//! the video plays and publishes each sample on a `watch` channel. Seeks and
//! state changes publish right away. Subscribers only ever see the latest
//! sample, so a slow consumer skips stale times instead of queueing them.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace, warn};

use crate::clock::PlaybackClock;
use crate::error::PlayerResult;
use crate::state::PlayerState;

/// One observation of the player.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaybackSample {
    pub time: f64,
    pub duration: f64,
    pub state: PlayerState,
}

/// Publishes playback samples from a clock.
pub struct PlaybackDriver {
    clock: Arc<dyn PlaybackClock>,
    poll_interval: Duration,
    samples: watch::Sender<PlaybackSample>,
    shutdown: watch::Sender<bool>,
}

impl PlaybackDriver {
    pub fn new(clock: Arc<dyn PlaybackClock>, poll_interval: Duration) -> Self {
        let (samples, _) = watch::channel(PlaybackSample::default());
        let (shutdown, _) = watch::channel(false);
        Self {
            clock,
            poll_interval,
            samples,
            shutdown,
        }
    }

    /// Receive every published sample (latest value only).
    pub fn subscribe(&self) -> watch::Receiver<PlaybackSample> {
        self.samples.subscribe()
    }

    /// Receive the shutdown signal.
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    /// Most recently published sample.
    pub fn latest(&self) -> PlaybackSample {
        *self.samples.borrow()
    }

    /// Read the clock and publish if anything changed.
    pub async fn poll(&self) -> PlayerResult<PlaybackSample> {
        let sample = PlaybackSample {
            time: self.clock.current_time().await?,
            duration: self.clock.duration().await?,
            state: self.clock.state().await?,
        };
        self.publish(sample);
        Ok(sample)
    }

    /// Publish the player's new state immediately.
    pub async fn on_state_change(&self, state: PlayerState) -> PlayerResult<()> {
        let time = self.clock.current_time().await?;
        let duration = self.clock.duration().await?;
        debug!(state = %state, time, "Player state changed");
        self.publish(PlaybackSample { time, duration, state });
        Ok(())
    }

    /// Publish a seek target immediately, without waiting for the next poll.
    ///
    /// The caller seeks the player itself; this only updates subscribers.
    pub fn on_seek(&self, time: f64) {
        debug!(time, "Seek");
        self.samples.send_if_modified(|sample| {
            if sample.time == time {
                return false;
            }
            sample.time = time;
            true
        });
    }

    fn publish(&self, next: PlaybackSample) {
        self.samples.send_if_modified(|sample| {
            if *sample == next {
                return false;
            }
            trace!(time = next.time, state = %next.state, "Publishing playback sample");
            *sample = next;
            true
        });
    }

    /// Poll until shutdown. Ticks only while the latest sample says playing.
    pub async fn run(&self) {
        info!(poll_interval_ms = self.poll_interval.as_millis() as u64, "Starting playback driver");

        let mut shutdown_rx = self.shutdown.subscribe();
        let mut samples_rx = self.samples.subscribe();
        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Pick up the clock's state before the first tick.
        if let Err(e) = self.poll().await {
            warn!(error = %e, "Initial playback poll failed");
        }

        loop {
            let playing = samples_rx.borrow_and_update().state.is_playing();

            tokio::select! {
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("Shutdown signal received, stopping playback driver");
                        break;
                    }
                }
                changed = samples_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let now_playing = samples_rx.borrow().state.is_playing();
                    if now_playing && !playing {
                        interval.reset();
                    }
                }
                _ = interval.tick(), if playing => {
                    if let Err(e) = self.poll().await {
                        warn!(error = %e, "Playback poll failed");
                    }
                }
            }
        }
    }

    /// Signal shutdown.
    pub fn shutdown(&self) {
        let _ = self.shutdown.send(true);
    }
}
