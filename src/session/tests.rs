use super::*;
use crate::config::{MediaSettings, PlaybackSettings};
use crate::engine::MediaEvent;
use crate::engine::testing::{ScriptHandle, ScriptedMedia};
use crate::scrub::SliderRect;

fn t(id: &str) -> Track {
    Track {
        id: id.into(),
        title: format!("Track {id}"),
        artist: "artist".into(),
        audio_url: format!("uploads/{id}.mp3"),
        waveform_data: None,
        duration_hint: None,
    }
}

fn settings(throttle_ms: u64) -> Settings {
    Settings {
        media: MediaSettings {
            origin: "http://localhost:8000/media/".into(),
        },
        playback: PlaybackSettings {
            time_throttle_ms: throttle_ms,
            seek_settle_ms: 500,
            stall_retry: true,
        },
    }
}

fn session(throttle_ms: u64) -> (PlayerSession, ScriptHandle) {
    let (media, script) = ScriptedMedia::ready(100.0);
    (
        PlayerSession::new(Box::new(media), settings(throttle_ms)),
        script,
    )
}

/// Session already playing "b" out of queue [a, b, c], metadata applied.
fn playing_session() -> (PlayerSession, ScriptHandle) {
    let (mut session, script) = session(0);
    session
        .play_track_in_queue(t("b"), vec![t("a"), t("b"), t("c")], PlayerSource::Global)
        .unwrap();
    script
        .lock()
        .unwrap()
        .pending_events
        .push_back(MediaEvent::MetadataLoaded { duration: 100.0 });
    session.tick();
    (session, script)
}

const RECT: SliderRect = SliderRect {
    left: 0.0,
    width: 100.0,
};

#[test]
fn play_track_loads_and_starts_the_engine() {
    let (mut session, script) = session(0);
    session.play_track(t("a"), PlayerSource::Global).unwrap();

    let s = script.lock().unwrap();
    assert_eq!(s.loaded, vec!["http://localhost:8000/media/uploads/a.mp3"]);
    assert!(s.playing);
    drop(s);
    assert!(session.state().is_playing);
    assert_eq!(session.state().current_track.as_ref().unwrap().id, "a");
}

#[test]
fn absolute_urls_are_not_prefixed() {
    let (mut session, script) = session(0);
    let mut track = t("a");
    track.audio_url = "https://cdn.example.com/a.mp3".into();
    session.play_track(track, PlayerSource::Global).unwrap();
    assert_eq!(
        script.lock().unwrap().loaded,
        vec!["https://cdn.example.com/a.mp3"]
    );
}

#[test]
fn rejected_play_reconciles_to_paused() {
    let (mut session, script) = session(0);
    script.lock().unwrap().reject_next_play = Some("no gesture".into());

    let err = session.play_track(t("a"), PlayerSource::Global).unwrap_err();
    assert!(matches!(err, PlaybackError::Rejected(_)));
    assert!(!session.state().is_playing);
}

#[test]
fn failed_load_reconciles_to_paused() {
    let (mut session, script) = session(0);
    script.lock().unwrap().fail_next_load = Some("404".into());

    let err = session.play_track(t("a"), PlayerSource::Global).unwrap_err();
    assert!(matches!(err, PlaybackError::Source(_)));
    assert!(!session.state().is_playing);
}

#[test]
fn resume_reuses_the_loaded_source() {
    let (mut session, script) = session(0);
    session.play_track(t("a"), PlayerSource::Global).unwrap();
    session.pause();
    assert!(!script.lock().unwrap().playing);

    session.play_track(t("a"), PlayerSource::Global).unwrap();
    let s = script.lock().unwrap();
    assert_eq!(s.loaded.len(), 1);
    assert!(s.playing);
}

#[test]
fn metadata_signal_sets_the_duration() {
    let (session, _script) = playing_session();
    assert_eq!(session.state().duration, 100.0);
}

#[test]
fn engine_time_flows_into_state() {
    let (mut session, script) = playing_session();
    script
        .lock()
        .unwrap()
        .pending_events
        .push_back(MediaEvent::TimeAdvanced(12.5));
    session.tick();
    assert_eq!(session.state().current_time, 12.5);
}

#[test]
fn time_updates_are_throttled() {
    let (media, script) = ScriptedMedia::ready(100.0);
    let mut session = PlayerSession::new(Box::new(media), settings(100));
    session.play_track(t("a"), PlayerSource::Global).unwrap();
    {
        let mut s = script.lock().unwrap();
        s.pending_events
            .push_back(MediaEvent::MetadataLoaded { duration: 100.0 });
        s.pending_events.push_back(MediaEvent::TimeAdvanced(1.0));
        s.pending_events.push_back(MediaEvent::TimeAdvanced(1.05));
    }
    session.tick();
    // The second update landed inside the throttle window.
    assert_eq!(session.state().current_time, 1.0);
}

#[test]
fn ended_advances_through_the_queue() {
    let (mut session, script) = playing_session();

    script
        .lock()
        .unwrap()
        .pending_events
        .push_back(MediaEvent::Ended);
    session.tick();

    assert_eq!(session.state().current_track.as_ref().unwrap().id, "c");
    assert!(session.state().is_playing);
    assert_eq!(session.state().current_time, 0.0);
    let s = script.lock().unwrap();
    assert_eq!(s.loaded.last().unwrap(), "http://localhost:8000/media/uploads/c.mp3");
    assert!(s.playing);
}

#[test]
fn ended_at_the_last_entry_stops() {
    let (mut session, script) = playing_session();
    session.next_track().unwrap();
    assert_eq!(session.state().current_track.as_ref().unwrap().id, "c");

    script
        .lock()
        .unwrap()
        .pending_events
        .push_back(MediaEvent::Ended);
    session.tick();

    assert!(!session.state().is_playing);
    assert_eq!(session.state().current_track.as_ref().unwrap().id, "c");
    assert!(!script.lock().unwrap().playing);
}

#[test]
fn previous_at_queue_start_restarts_the_track() {
    let (mut session, script) = playing_session();
    session.previous_track().unwrap();
    assert_eq!(session.state().current_track.as_ref().unwrap().id, "a");

    script.lock().unwrap().seeks.clear();
    session.previous_track().unwrap();

    assert_eq!(session.state().current_track.as_ref().unwrap().id, "a");
    assert_eq!(session.state().current_time, 0.0);
    assert_eq!(script.lock().unwrap().seeks, vec![0.0]);
}

#[test]
fn skip_to_track_loads_the_queue_member() {
    let (mut session, script) = playing_session();
    session.skip_to_track("a").unwrap();
    assert_eq!(session.state().current_track.as_ref().unwrap().id, "a");
    assert_eq!(
        script.lock().unwrap().loaded.last().unwrap(),
        "http://localhost:8000/media/uploads/a.mp3"
    );

    // Unknown ids change nothing, engine included.
    let loads = script.lock().unwrap().loaded.len();
    session.skip_to_track("zz").unwrap();
    assert_eq!(script.lock().unwrap().loaded.len(), loads);
}

#[test]
fn seek_to_commits_and_arms_the_settle_window() {
    let (mut session, script) = playing_session();
    session.seek_to(30.0).unwrap();

    assert_eq!(session.state().current_time, 30.0);
    assert_eq!(script.lock().unwrap().position, 30.0);

    // Stale engine echo inside the settle window cannot drag the clock back.
    script
        .lock()
        .unwrap()
        .pending_events
        .push_back(MediaEvent::TimeAdvanced(5.0));
    session.tick();
    assert_eq!(session.state().current_time, 30.0);
}

#[test]
fn seek_to_without_duration_is_a_no_op() {
    let (mut session, script) = session(0);
    session.play_track(t("a"), PlayerSource::Global).unwrap();
    // No metadata tick yet: coordinator duration is still zero.
    session.seek_to(30.0).unwrap();
    assert!(script.lock().unwrap().seeks.is_empty());
    assert_eq!(session.state().current_time, 0.0);
}

#[test]
fn scrub_gesture_previews_and_resumes() {
    let (mut session, script) = playing_session();

    session.scrub_down(40.0, RECT);
    assert!(session.state().is_scrubbing);
    assert!(session.state().is_playing);
    assert!(!script.lock().unwrap().playing);
    assert_eq!(session.state().current_time, 40.0);

    // Engine feedback during the drag is ignored end to end.
    script
        .lock()
        .unwrap()
        .pending_events
        .push_back(MediaEvent::TimeAdvanced(41.0));
    session.tick();
    assert_eq!(session.state().current_time, 40.0);

    session.scrub_move(70.0, RECT);
    assert_eq!(session.state().current_time, 70.0);

    session.scrub_up(70.0, RECT).unwrap();
    assert!(!session.state().is_scrubbing);
    assert!(session.state().is_playing);
    assert!(script.lock().unwrap().playing);
    assert_eq!(session.state().current_time, 70.0);
}

#[test]
fn rejected_scrub_resume_pauses_visibly() {
    let (mut session, script) = playing_session();
    session.scrub_down(40.0, RECT);
    script.lock().unwrap().reject_next_play = Some("policy".into());

    let err = session.scrub_up(40.0, RECT).unwrap_err();
    assert!(matches!(err, PlaybackError::Rejected(_)));
    assert!(!session.state().is_playing);
    assert!(!session.state().is_scrubbing);
}

#[test]
fn mount_helpers_follow_the_source_guidelines() {
    let (mut session, _script) = playing_session();
    assert!(session.is_source_active(PlayerSource::Global));

    // Artist view never auto-acquires.
    session.acquire_on_mount(PlayerSource::ArtistView);
    assert!(session.is_source_active(PlayerSource::Global));

    session.acquire_on_mount(PlayerSource::TrackView);
    assert!(session.is_source_active(PlayerSource::TrackView));

    // Only the owner hands control back.
    session.release_to_global(PlayerSource::ArtistView);
    assert!(session.is_source_active(PlayerSource::TrackView));
    session.release_to_global(PlayerSource::TrackView);
    assert!(session.is_source_active(PlayerSource::Global));
}

#[test]
fn transfers_then_commands_apply_in_order() {
    let (mut session, _script) = playing_session();

    session.transfer_control_to(PlayerSource::TrackView);
    session.pause();
    session.transfer_control_to(PlayerSource::Global);

    assert!(!session.state().is_playing);
    assert!(session.is_source_active(PlayerSource::Global));
    assert_eq!(session.state().current_track.as_ref().unwrap().id, "b");
}

#[test]
fn halt_signal_pauses_the_shared_state() {
    let (mut session, script) = playing_session();
    {
        let mut s = script.lock().unwrap();
        s.pending_events.push_back(MediaEvent::Error("device lost".into()));
    }
    session.tick();
    assert!(!session.state().is_playing);
}
