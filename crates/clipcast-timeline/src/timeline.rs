//! The timeline root aggregate for one episode's edit session.

use clipcast_core::{unix_now, FrameRate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::item::{MediaRef, TimelineItem};
use crate::marker::{ClipMarker, TimelineMarker};
use crate::track::Track;

/// Output aspect ratio. The full-episode timeline is always 16:9;
/// per-clip export formats are a clip-marker concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectRatio {
    Wide16x9,
}

/// Background behind the composited tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub color: String,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            color: "#000000".into(),
        }
    }
}

/// Multicam configuration: the candidate camera angles and which one is
/// currently active. Angle switching itself is a compositor concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MulticamConfig {
    pub angles: Vec<MediaRef>,
    pub active_angle: usize,
}

/// Default caption styling applied to caption tracks without overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionStyle {
    pub font_family: String,
    pub font_size: f32,
    pub color: String,
    /// Vertical anchor as a percentage of frame height.
    pub position_y: f64,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_family: "Inter".into(),
            font_size: 42.0,
            color: "#ffffff".into(),
            position_y: 85.0,
        }
    }
}

/// Root aggregate for one episode's edit session.
///
/// `duration` is derived: the max item end over all tracks, 0 with no
/// items. It is recomputed after every structural mutation that can change
/// an item's extent — never remembered, except that adding an item only
/// ever extends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// Unique timeline ID
    pub id: Uuid,
    /// Owning podcast reference
    pub podcast_id: String,
    /// Owning episode reference
    pub episode_id: String,
    /// Tracks; storage order is irrelevant, compositing order is `Track::order`
    pub tracks: Vec<Track>,
    /// Derived total duration in seconds
    pub duration: f64,
    /// Fixed at 30 fps for episode timelines
    pub frame_rate: FrameRate,
    /// Output aspect ratio
    pub aspect_ratio: AspectRatio,
    /// Background configuration
    pub background: Background,
    /// Optional multicam configuration
    pub multicam: Option<MulticamConfig>,
    /// Optional caption style default
    pub caption_style: Option<CaptionStyle>,
    /// Point markers
    pub markers: Vec<TimelineMarker>,
    /// Clip-range markers
    pub clip_markers: Vec<ClipMarker>,
    /// Schema version this timeline was created with
    pub schema_version: u32,
    /// Creation unix timestamp (seconds)
    pub created_at: u64,
    /// Last-update unix timestamp (seconds)
    pub updated_at: u64,
}

impl Timeline {
    /// Create an empty timeline for an episode.
    pub fn new(podcast_id: impl Into<String>, episode_id: impl Into<String>) -> Self {
        let now = unix_now();
        Self {
            id: Uuid::new_v4(),
            podcast_id: podcast_id.into(),
            episode_id: episode_id.into(),
            tracks: Vec::new(),
            duration: 0.0,
            frame_rate: FrameRate::FPS_30,
            aspect_ratio: AspectRatio::Wide16x9,
            background: Background::default(),
            multicam: None,
            caption_style: None,
            markers: Vec::new(),
            clip_markers: Vec::new(),
            schema_version: crate::serialization::CURRENT_VERSION,
            created_at: now,
            updated_at: now,
        }
    }

    /// Recompute `duration` as the max item end over all tracks.
    pub fn recompute_duration(&mut self) {
        self.duration = self
            .tracks
            .iter()
            .map(|track| track.max_item_end())
            .fold(0.0, f64::max);
    }

    /// Order value for the next appended track: max existing + 1, or 0.
    pub fn next_track_order(&self) -> u32 {
        self.tracks
            .iter()
            .map(|track| track.order + 1)
            .max()
            .unwrap_or(0)
    }

    /// Find a track by id.
    pub fn find_track(&self, id: Uuid) -> Option<&Track> {
        self.tracks.iter().find(|track| track.id == id)
    }

    /// Find a track mutably by id.
    pub fn find_track_mut(&mut self, id: Uuid) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|track| track.id == id)
    }

    /// Find the track owning an item, scanning all tracks.
    pub fn track_containing_item(&self, item_id: Uuid) -> Option<&Track> {
        self.tracks
            .iter()
            .find(|track| track.items.iter().any(|item| item.id == item_id))
    }

    /// Find an item by id, scanning all tracks.
    pub fn find_item(&self, item_id: Uuid) -> Option<&TimelineItem> {
        self.tracks
            .iter()
            .find_map(|track| track.find_item(item_id))
    }

    /// Find an item mutably by id, scanning all tracks.
    pub fn find_item_mut(&mut self, item_id: Uuid) -> Option<&mut TimelineItem> {
        self.tracks
            .iter_mut()
            .find_map(|track| track.find_item_mut(item_id))
    }

    /// Find a point marker by id.
    pub fn find_marker(&self, id: Uuid) -> Option<&TimelineMarker> {
        self.markers.iter().find(|marker| marker.id == id)
    }

    /// Find a clip marker by id.
    pub fn find_clip_marker(&self, id: Uuid) -> Option<&ClipMarker> {
        self.clip_markers.iter().find(|marker| marker.id == id)
    }
}
