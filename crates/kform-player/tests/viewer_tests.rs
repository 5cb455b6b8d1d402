//! End-to-end viewer tests: stored timeline, simulated player, sync session.

use std::sync::Arc;
use std::time::Duration;

use kform_player::demo::seed_sample;
use kform_player::{
    PlaybackClock, PlaybackDriver, PlayerError, PlayerState, SimulatedClock, SyncSession,
};
use kform_store::MemoryRepository;
use kform_sync::FormationSync;

#[tokio::test]
async fn test_open_missing_video() {
    let repo = MemoryRepository::new();
    let result = SyncSession::open(&repo, "missing", FormationSync::default()).await;
    assert!(matches!(result, Err(PlayerError::NoFormationData(_))));
}

#[tokio::test(start_paused = true)]
async fn test_playback_drives_frames() {
    let repo = MemoryRepository::new();
    let video_id = seed_sample(&repo).await.unwrap();
    let session = Arc::new(
        SyncSession::open(&repo, &video_id, FormationSync::default())
            .await
            .unwrap(),
    );

    let clock = Arc::new(SimulatedClock::new(50.0));
    let player: Arc<dyn PlaybackClock> = clock.clone();
    let driver = Arc::new(PlaybackDriver::new(player, Duration::from_millis(100)));
    let mut frames = session.subscribe();

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

    // Start 2.5s into "Opening" (0s) -> "V Formation" (5s).
    clock.seek(2.5).unwrap();
    driver.on_seek(2.5);
    clock.play().unwrap();
    driver.on_state_change(PlayerState::Playing).await.unwrap();

    frames.changed().await.unwrap();
    {
        let frame = frames.borrow_and_update();
        assert_eq!(frame.current_formation_name.as_deref(), Some("Opening"));
        // Luna moves from (50, 30) to (50, 25).
        let luna = frame.positions.iter().find(|p| p.member.name == "Luna").unwrap();
        assert!((luna.y - 27.5).abs() < 0.1, "luna.y was {}", luna.y);
    }

    // Play past the 10s formation.
    tokio::time::sleep(Duration::from_millis(8000)).await;
    let frame = frames.borrow_and_update().clone();
    assert_eq!(frame.current_formation_name.as_deref(), Some("Line"));
    assert!(frame.time > 10.0 && frame.time < 11.0, "time was {}", frame.time);

    driver.shutdown();
    driver_task.await.unwrap();
    let published = session_task.await.unwrap();
    assert!(published >= 2);
}

#[tokio::test(start_paused = true)]
async fn test_pause_freezes_frames() {
    let repo = MemoryRepository::new();
    let video_id = seed_sample(&repo).await.unwrap();
    let session = SyncSession::open(&repo, &video_id, FormationSync::default())
        .await
        .unwrap();

    let clock = Arc::new(SimulatedClock::new(50.0));
    let player: Arc<dyn PlaybackClock> = clock.clone();
    let driver = Arc::new(PlaybackDriver::new(player, Duration::from_millis(100)));
    let task = tokio::spawn({
        let driver = Arc::clone(&driver);
        async move { driver.run().await }
    });

    clock.play().unwrap();
    driver.on_state_change(PlayerState::Playing).await.unwrap();
    tokio::time::sleep(Duration::from_millis(3000)).await;

    clock.pause().unwrap();
    driver.on_state_change(PlayerState::Paused).await.unwrap();
    let paused_at = driver.latest().time;
    tokio::time::sleep(Duration::from_millis(3000)).await;

    assert_eq!(driver.latest().time, paused_at);
    assert_eq!(driver.latest().state, PlayerState::Paused);
    let frame = session.frame_at(paused_at);
    assert_eq!(frame.current_formation_name.as_deref(), Some("Opening"));
    assert!(frame.next_formation_id.is_some());

    driver.shutdown();
    task.await.unwrap();
}
