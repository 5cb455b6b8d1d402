//! Formation sync session for one video.
//!
//! A [`SyncSession`] owns a loaded timeline and turns playback samples into
//! [`SyncFrame`]s. Frames are published on a `watch` channel, so a renderer
//! that falls behind only ever draws the newest one.

use kform_models::{format_time, FormationId};
use kform_store::{load_timeline, FormationRepository, VideoTimeline};
use kform_sync::{markers, playback_percent, FormationSync, SyncFrame, TimelineMarker};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::driver::PlaybackSample;
use crate::error::{PlayerError, PlayerResult};

pub struct SyncSession {
    engine: FormationSync,
    timeline: VideoTimeline,
    frames: watch::Sender<SyncFrame>,
}

impl SyncSession {
    pub fn new(timeline: VideoTimeline, engine: FormationSync) -> Self {
        let initial = engine.frame(timeline.formations(), timeline.members(), 0.0);
        let (frames, _) = watch::channel(initial);
        Self {
            engine,
            timeline,
            frames,
        }
    }

    /// Load a video's timeline from the repository and start a session on it.
    pub async fn open<R>(repo: &R, video_id: &str, engine: FormationSync) -> PlayerResult<Self>
    where
        R: FormationRepository + ?Sized,
    {
        let timeline = load_timeline(repo, video_id)
            .await?
            .ok_or_else(|| PlayerError::NoFormationData(video_id.to_string()))?;

        info!(
            video_id,
            youtube_id = %timeline.video.youtube_video_id,
            formations = timeline.formations().len(),
            policy = %engine.policy(),
            "Opened sync session"
        );
        Ok(Self::new(timeline, engine))
    }

    pub fn timeline(&self) -> &VideoTimeline {
        &self.timeline
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncFrame> {
        self.frames.subscribe()
    }

    /// Frame for `time` without publishing it.
    pub fn frame_at(&self, time: f64) -> SyncFrame {
        self.engine
            .frame(self.timeline.formations(), self.timeline.members(), time)
    }

    /// Compute and publish the frame for `time`.
    pub fn update(&self, time: f64) -> SyncFrame {
        let frame = self.frame_at(time);
        self.frames.send_replace(frame.clone());
        frame
    }

    /// Timeline bar markers for the current playback position.
    pub fn markers(&self, sample: &PlaybackSample) -> Vec<TimelineMarker> {
        markers(self.timeline.formations(), sample.time, sample.duration)
    }

    /// Seek target for jumping to a formation.
    pub fn formation_time(&self, id: &FormationId) -> Option<f64> {
        self.timeline
            .formations()
            .iter()
            .find(|f| &f.id == id)
            .map(|f| f.time)
    }

    /// Follow playback samples until the sample channel closes or shutdown
    /// is signalled. Returns the number of frames published.
    pub async fn run(
        &self,
        mut samples: watch::Receiver<PlaybackSample>,
        mut shutdown: watch::Receiver<bool>,
    ) -> usize {
        let mut published = 0usize;
        let mut current: Option<FormationId> = None;

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        break;
                    }
                }
                changed = samples.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let sample = *samples.borrow_and_update();
                    let frame = self.update(sample.time);
                    published += 1;

                    if frame.current_formation_id != current {
                        current = frame.current_formation_id.clone();
                        debug!(
                            time = %format_time(sample.time),
                            progress = playback_percent(sample.time, sample.duration),
                            formation = frame.current_formation_name.as_deref().unwrap_or("-"),
                            "Formation changed"
                        );
                    }
                }
            }
        }

        published
    }
}
