//! Integration tests for the playback subsystem.
//!
//! Drives the active-item resolver and the transport against real
//! timelines built through clipcast-timeline edits.

use std::time::{Duration, Instant};

use clipcast_playback::{resolve_active_items, Transport, MAX_TICK_DELTA};
use clipcast_timeline::{
    EditCommand, ItemKind, MediaRef, MediaSourceKind, Timeline, TimelineItem, TrackKind,
};

// ── Helpers ────────────────────────────────────────────────────

fn resolved_item(start: f64, duration: f64) -> TimelineItem {
    let mut item = TimelineItem::new(ItemKind::Video);
    item.start_time = start;
    item.duration = duration;
    item.source_out = duration;
    let mut media = MediaRef::new("ep-1-video", MediaSourceKind::Episode);
    media.url = Some("https://cdn/ep-1.mp4".into());
    item.media = Some(media);
    item
}

fn build_timeline() -> Timeline {
    let mut timeline = Timeline::new("pod-1", "ep-1");
    for (kind, name) in [
        (TrackKind::VideoPrimary, "Video"),
        (TrackKind::VideoOverlay, "Overlay"),
        (TrackKind::Music, "Music"),
    ] {
        let mut add = EditCommand::AddTrack {
            kind,
            name: name.into(),
            track_id: None,
            order: None,
        };
        add.apply(&mut timeline);
    }
    for track_index in 0..3 {
        let track_id = timeline.tracks[track_index].id;
        let mut add = EditCommand::AddItem {
            track_id,
            item: resolved_item(0.0, 60.0),
        };
        add.apply(&mut timeline);
    }
    timeline
}

// ── Resolver over an edited timeline ───────────────────────────

#[test]
fn resolver_returns_compositing_order() {
    crate::init_tracing();
    let timeline = build_timeline();
    let active = resolve_active_items(10.0, &timeline.tracks);

    assert_eq!(active.len(), 3);
    assert_eq!(active[0].item.track_id, timeline.tracks[0].id);
    assert_eq!(active[1].item.track_id, timeline.tracks[1].id);
    assert_eq!(active[2].item.track_id, timeline.tracks[2].id);
}

#[test]
fn resolver_respects_half_open_interval() {
    let timeline = build_timeline();
    assert_eq!(resolve_active_items(0.0, &timeline.tracks).len(), 3);
    assert_eq!(resolve_active_items(59.999, &timeline.tracks).len(), 3);
    assert!(resolve_active_items(60.0, &timeline.tracks).is_empty());
}

#[test]
fn solo_track_implicitly_mutes_the_rest() {
    let mut timeline = build_timeline();
    timeline.tracks[2].solo = true;

    let active = resolve_active_items(10.0, &timeline.tracks);
    assert!(active[0].track_muted);
    assert!(active[1].track_muted);
    assert!(!active[2].track_muted);
}

#[test]
fn hidden_track_contributes_nothing() {
    let mut timeline = build_timeline();
    timeline.tracks[1].visible = false;

    let active = resolve_active_items(10.0, &timeline.tracks);
    assert_eq!(active.len(), 2);
    assert!(active
        .iter()
        .all(|a| a.item.track_id != timeline.tracks[1].id));
}

#[test]
fn unresolved_media_is_skipped_not_fatal() {
    let mut timeline = build_timeline();
    timeline.tracks[0].items[0].media.as_mut().unwrap().url = None;

    let active = resolve_active_items(10.0, &timeline.tracks);
    assert_eq!(active.len(), 2);
}

#[test]
fn split_halves_hand_off_seamlessly() {
    let mut timeline = build_timeline();
    let item_id = timeline.tracks[0].items[0].id;
    let mut split = EditCommand::SplitItem {
        item_id,
        at_time: 25.0,
        right_id: uuid::Uuid::new_v4(),
        original: None,
    };
    split.apply(&mut timeline);

    // Just before the cut the left half plays; at the cut the right half
    // takes over at the exact same source position.
    let before = resolve_active_items(24.999, &timeline.tracks);
    let after = resolve_active_items(25.0, &timeline.tracks);
    let left = before
        .iter()
        .find(|a| a.item.track_id == timeline.tracks[0].id)
        .unwrap();
    let right = after
        .iter()
        .find(|a| a.item.track_id == timeline.tracks[0].id)
        .unwrap();

    assert_ne!(left.item.id, right.item.id);
    assert!((left.source_seek_time - 24.999).abs() < 1e-9);
    assert_eq!(right.source_seek_time, 25.0);
}

// ── Transport ──────────────────────────────────────────────────

#[test]
fn playback_stops_exactly_at_timeline_end() {
    let mut transport = Transport::new();
    let start = Instant::now();
    transport.seek(1.95);
    transport.play(start);

    transport.tick(start + Duration::from_millis(80), 2.0);
    assert_eq!(transport.current_time(), 2.0);
    assert!(!transport.is_playing());
}

#[test]
fn out_point_overrides_timeline_end() {
    let mut transport = Transport::new();
    transport.set_out_point(Some(10.0));
    transport.seek(9.95);
    let start = Instant::now();
    transport.play(start);

    transport.tick(start + Duration::from_millis(80), 60.0);
    assert_eq!(transport.current_time(), 10.0);
    assert!(!transport.is_playing());
}

#[test]
fn speed_scales_advancement() {
    let mut transport = Transport::new();
    transport.set_speed(2.0);
    transport.play(Instant::now());
    for _ in 0..60 {
        transport.advance(1.0 / 60.0, 1000.0);
    }
    assert!((transport.current_time() - 2.0).abs() < 1e-9);

    let mut transport = Transport::new();
    transport.set_speed(0.5);
    transport.play(Instant::now());
    for _ in 0..60 {
        transport.advance(1.0 / 60.0, 1000.0);
    }
    assert!((transport.current_time() - 0.5).abs() < 1e-9);
}

#[test]
fn long_stall_advances_at_most_clamp() {
    let mut transport = Transport::new();
    let start = Instant::now();
    transport.play(start);

    transport.tick(start + Duration::from_secs(5), 1000.0);
    assert!((transport.current_time() - MAX_TICK_DELTA).abs() < 1e-9);
}

#[test]
fn playhead_drives_resolver_through_a_session() {
    let timeline = build_timeline();
    let mut transport = Transport::new();
    transport.seek(59.95);
    let start = Instant::now();
    transport.play(start);

    assert_eq!(
        resolve_active_items(transport.current_time(), &timeline.tracks).len(),
        3
    );

    transport.tick(start + Duration::from_millis(80), timeline.duration);
    assert!(!transport.is_playing());
    assert!(resolve_active_items(transport.current_time(), &timeline.tracks).is_empty());
}
