//! Integration tests for the timeline subsystem.
//!
//! Exercises cross-crate interactions between clipcast-core and
//! clipcast-timeline: edits with undo, duration bookkeeping, and
//! versioned serialization.

use clipcast_timeline::{
    EditCommand, History, HistoryEntry, ItemKind, ItemPatch, MediaRef, MediaSourceKind, Timeline,
    TimelineFile, TimelineItem, TrackKind, TrackPatch, CURRENT_VERSION,
};
use uuid::Uuid;

// ── Helpers ────────────────────────────────────────────────────

fn media_item(start: f64, duration: f64) -> TimelineItem {
    let mut item = TimelineItem::new(ItemKind::Audio);
    item.start_time = start;
    item.duration = duration;
    item.source_out = duration;
    let mut media = MediaRef::new("ep-1-audio", MediaSourceKind::Episode);
    media.url = Some("https://cdn/ep-1.mp3".into());
    item.media = Some(media);
    item
}

fn build_timeline() -> Timeline {
    let mut timeline = Timeline::new("pod-1", "ep-1");
    let mut add_audio = EditCommand::AddTrack {
        kind: TrackKind::AudioPrimary,
        name: "Episode audio".into(),
        track_id: None,
        order: None,
    };
    add_audio.apply(&mut timeline);
    let mut add_video = EditCommand::AddTrack {
        kind: TrackKind::VideoPrimary,
        name: "Episode video".into(),
        track_id: None,
        order: None,
    };
    add_video.apply(&mut timeline);

    let audio_track = timeline.tracks[0].id;
    let mut add_item = EditCommand::AddItem {
        track_id: audio_track,
        item: media_item(0.0, 90.0),
    };
    add_item.apply(&mut timeline);
    timeline
}

fn commit(timeline: &mut Timeline, history: &mut History, mut command: EditCommand) -> bool {
    if !command.apply(timeline) {
        return false;
    }
    history.push(HistoryEntry {
        description: command.describe().to_string(),
        command,
    });
    true
}

// ── Duration bookkeeping ───────────────────────────────────────

#[test]
fn duration_is_max_item_end_across_tracks() {
    crate::init_tracing();
    let mut timeline = build_timeline();
    assert_eq!(timeline.duration, 90.0);

    let video_track = timeline.tracks[1].id;
    let mut add = EditCommand::AddItem {
        track_id: video_track,
        item: media_item(100.0, 20.0),
    };
    add.apply(&mut timeline);
    assert_eq!(timeline.duration, 120.0);
}

#[test]
fn add_never_shrinks_duration() {
    let mut timeline = build_timeline();
    let track_id = timeline.tracks[0].id;
    let mut add = EditCommand::AddItem {
        track_id,
        item: media_item(0.0, 5.0),
    };
    add.apply(&mut timeline);
    assert_eq!(timeline.duration, 90.0);
}

#[test]
fn remove_recomputes_duration_fresh() {
    let mut timeline = build_timeline();
    let track_id = timeline.tracks[0].id;
    let short = media_item(0.0, 10.0);
    let short_id = short.id;
    let mut add = EditCommand::AddItem {
        track_id,
        item: short,
    };
    add.apply(&mut timeline);

    let long_id = timeline.tracks[0].items[0].id;
    let mut remove = EditCommand::RemoveItem {
        item_id: long_id,
        removed: None,
    };
    remove.apply(&mut timeline);

    assert_eq!(timeline.duration, 10.0);
    assert!(timeline.find_item(short_id).is_some());
}

// ── Edit operations with undo ──────────────────────────────────

#[test]
fn split_then_undo_restores_original_item() {
    let mut timeline = build_timeline();
    let mut history = History::default();
    let item_id = timeline.tracks[0].items[0].id;
    let original = timeline.find_item(item_id).unwrap().clone();

    let split = EditCommand::SplitItem {
        item_id,
        at_time: 30.0,
        right_id: Uuid::new_v4(),
        original: None,
    };
    assert!(commit(&mut timeline, &mut history, split));
    assert_eq!(timeline.tracks[0].items.len(), 2);

    let mut inverse = history.undo().unwrap();
    inverse.apply(&mut timeline);

    assert_eq!(timeline.tracks[0].items.len(), 1);
    assert_eq!(*timeline.find_item(item_id).unwrap(), original);
}

#[test]
fn split_halves_partition_source_range() {
    let mut timeline = build_timeline();
    let item_id = timeline.tracks[0].items[0].id;
    let right_id = Uuid::new_v4();

    let mut split = EditCommand::SplitItem {
        item_id,
        at_time: 30.0,
        right_id,
        original: None,
    };
    split.apply(&mut timeline);

    let left = timeline.find_item(item_id).unwrap();
    let right = timeline.find_item(right_id).unwrap();

    assert_eq!(left.start_time, 0.0);
    assert_eq!(left.duration, 30.0);
    assert_eq!(left.source_out, 30.0);
    assert_eq!(right.start_time, 30.0);
    assert_eq!(right.duration, 60.0);
    assert_eq!(right.source_in, 30.0);
    assert_eq!(right.source_out, 90.0);
}

#[test]
fn update_track_undo_restores_fields() {
    let mut timeline = build_timeline();
    let mut history = History::default();
    let track_id = timeline.tracks[0].id;

    let update = EditCommand::UpdateTrack {
        track_id,
        patch: TrackPatch {
            muted: Some(true),
            volume: Some(0.25),
            ..Default::default()
        },
        reverse: None,
    };
    assert!(commit(&mut timeline, &mut history, update));
    assert!(timeline.tracks[0].muted);
    assert_eq!(timeline.tracks[0].volume, 0.25);

    let mut inverse = history.undo().unwrap();
    inverse.apply(&mut timeline);
    assert!(!timeline.tracks[0].muted);
    assert_eq!(timeline.tracks[0].volume, 1.0);
}

#[test]
fn move_across_tracks_then_undo() {
    let mut timeline = build_timeline();
    let mut history = History::default();
    let source_track = timeline.tracks[0].id;
    let destination = timeline.tracks[1].id;
    let item_id = timeline.tracks[0].items[0].id;

    let mv = EditCommand::MoveItem {
        item_id,
        start_time: 12.0,
        track_id: Some(destination),
        previous: None,
    };
    assert!(commit(&mut timeline, &mut history, mv));
    assert_eq!(timeline.find_item(item_id).unwrap().track_id, destination);

    let mut inverse = history.undo().unwrap();
    inverse.apply(&mut timeline);
    let restored = timeline.find_item(item_id).unwrap();
    assert_eq!(restored.track_id, source_track);
    assert_eq!(restored.start_time, 0.0);
}

#[test]
fn noop_patch_records_nothing() {
    let mut timeline = build_timeline();
    let mut history = History::default();
    let item_id = timeline.tracks[0].items[0].id;

    let update = EditCommand::UpdateItem {
        item_id,
        patch: ItemPatch {
            speed: Some(1.0),
            ..Default::default()
        },
        reverse: None,
    };
    assert!(!commit(&mut timeline, &mut history, update));
    assert!(!history.can_undo());
}

#[test]
fn history_caps_at_max_depth() {
    let mut timeline = build_timeline();
    let mut history = History::default();
    let track_id = timeline.tracks[0].id;

    for i in 0..105 {
        let add = EditCommand::AddItem {
            track_id,
            item: media_item(100.0 + i as f64, 1.0),
        };
        commit(&mut timeline, &mut history, add);
    }
    assert_eq!(history.undo_count(), 100);
}

// ── Serialization ──────────────────────────────────────────────

#[test]
fn versioned_file_roundtrip_preserves_timeline() {
    let timeline = build_timeline();
    let file = TimelineFile::new(timeline.clone());

    let data = file.to_json().unwrap();
    let loaded = TimelineFile::from_json(&data).unwrap();

    assert_eq!(loaded.version, CURRENT_VERSION);
    assert_eq!(loaded.timeline, timeline);
}

#[test]
fn edit_undo_edit_roundtrips_through_json() {
    let mut timeline = build_timeline();
    let mut history = History::default();
    let item_id = timeline.tracks[0].items[0].id;

    commit(
        &mut timeline,
        &mut history,
        EditCommand::UpdateItem {
            item_id,
            patch: ItemPatch {
                volume: Some(0.5),
                ..Default::default()
            },
            reverse: None,
        },
    );
    let mut inverse = history.undo().unwrap();
    inverse.apply(&mut timeline);

    let data = TimelineFile::new(timeline.clone()).to_json().unwrap();
    let loaded = TimelineFile::from_json(&data).unwrap();
    assert_eq!(loaded.timeline.find_item(item_id).unwrap().volume, 1.0);
}
