//! Playback clock abstraction.
//!
//! The viewer only needs to ask the video player three things: where it is,
//! how long the video is and whether it is playing. [`SimulatedClock`] answers
//! them without a real player and drives the demo viewer and tests.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::{PlayerError, PlayerResult};
use crate::state::PlayerState;

/// Read access to a video player's playback position.
#[async_trait]
pub trait PlaybackClock: Send + Sync {
    /// Current playback time in seconds.
    async fn current_time(&self) -> PlayerResult<f64>;

    /// Video length in seconds, zero while unknown.
    async fn duration(&self) -> PlayerResult<f64>;

    async fn state(&self) -> PlayerResult<PlayerState>;
}

#[derive(Debug)]
struct SimState {
    state: PlayerState,
    /// Position when `started_at` was set, or the frozen position
    base: f64,
    started_at: Option<Instant>,
}

/// A clock that advances with (tokio) wall time while playing.
#[derive(Debug)]
pub struct SimulatedClock {
    duration: f64,
    inner: Mutex<SimState>,
}

impl SimulatedClock {
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            inner: Mutex::new(SimState {
                state: PlayerState::Unstarted,
                base: 0.0,
                started_at: None,
            }),
        }
    }

    fn lock(&self) -> PlayerResult<std::sync::MutexGuard<'_, SimState>> {
        self.inner
            .lock()
            .map_err(|_| PlayerError::clock("simulated clock lock poisoned"))
    }

    fn position(&self, sim: &SimState) -> f64 {
        let elapsed = sim
            .started_at
            .map(|at| at.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        (sim.base + elapsed).min(self.duration)
    }

    fn settle(&self, sim: &mut SimState) {
        // Reaching the end stops playback like a real player.
        if sim.state.is_playing() && self.position(sim) >= self.duration {
            sim.base = self.duration;
            sim.started_at = None;
            sim.state = PlayerState::Ended;
        }
    }

    pub fn play(&self) -> PlayerResult<()> {
        let mut sim = self.lock()?;
        if !sim.state.is_playing() {
            // Only replay from the start when still parked at the end.
            if sim.state == PlayerState::Ended && sim.base >= self.duration {
                sim.base = 0.0;
            }
            sim.started_at = Some(Instant::now());
            sim.state = PlayerState::Playing;
        }
        Ok(())
    }

    pub fn pause(&self) -> PlayerResult<()> {
        let mut sim = self.lock()?;
        self.settle(&mut sim);
        if sim.state.is_playing() {
            sim.base = self.position(&sim);
            sim.started_at = None;
            sim.state = PlayerState::Paused;
        }
        Ok(())
    }

    /// Jump to `time`, clamped to the video. Playback continues if it was
    /// running; an ended video is paused at the new position.
    pub fn seek(&self, time: f64) -> PlayerResult<f64> {
        let mut sim = self.lock()?;
        self.settle(&mut sim);
        let time = if time.is_nan() { 0.0 } else { time.clamp(0.0, self.duration) };
        sim.base = time;
        if sim.started_at.is_some() {
            sim.started_at = Some(Instant::now());
        }
        if sim.state == PlayerState::Ended && time < self.duration {
            sim.state = PlayerState::Paused;
        }
        Ok(time)
    }
}

#[async_trait]
impl PlaybackClock for SimulatedClock {
    async fn current_time(&self) -> PlayerResult<f64> {
        let mut sim = self.lock()?;
        self.settle(&mut sim);
        Ok(self.position(&sim))
    }

    async fn duration(&self) -> PlayerResult<f64> {
        Ok(self.duration)
    }

    async fn state(&self) -> PlayerResult<PlayerState> {
        let mut sim = self.lock()?;
        self.settle(&mut sim);
        Ok(sim.state)
    }
}
