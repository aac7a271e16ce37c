//! Track types for the timeline.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::item::TimelineItem;

/// Kind of track. Fixed per track; determines what the compositor does
/// with the track's items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackKind {
    /// Main episode video lane.
    VideoPrimary,
    /// B-roll / picture-in-picture overlays.
    VideoOverlay,
    /// Main episode audio lane.
    AudioPrimary,
    /// Background music.
    Music,
    /// Sound effects.
    SoundEffects,
    /// Burned-in captions.
    Captions,
    /// Text and graphic overlays.
    Graphics,
}

/// Default row height in pixels for a newly created track.
pub const DEFAULT_TRACK_HEIGHT: f32 = 72.0;

/// One lane of the timeline, owning its items.
///
/// Items are positioned by their own `start_time`; array order is not
/// meaningful. Compositing order across tracks comes from `order` (higher
/// draws on top), never from position in the timeline's track list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track ID
    pub id: Uuid,
    /// Track kind
    pub kind: TrackKind,
    /// Display name
    pub name: String,
    /// Compositing/stacking order (explicit, not inferred)
    pub order: u32,
    /// Edits rejected while locked
    pub locked: bool,
    /// Track is muted for playback
    pub muted: bool,
    /// When any track is solo, non-solo tracks are implicitly muted
    pub solo: bool,
    /// Hidden tracks contribute nothing to playback or compositing
    pub visible: bool,
    /// Volume multiplier [0, 1]
    pub volume: f64,
    /// Opacity multiplier [0, 1]
    pub opacity: f64,
    /// Row display height
    pub height: f32,
    /// Optional user-assigned color
    pub color: Option<String>,
    /// Items owned by this track
    pub items: Vec<TimelineItem>,
}

impl Track {
    /// Create a new track with documented defaults.
    pub fn new(kind: TrackKind, name: impl Into<String>, order: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            name: name.into(),
            order,
            locked: false,
            muted: false,
            solo: false,
            visible: true,
            volume: 1.0,
            opacity: 1.0,
            height: DEFAULT_TRACK_HEIGHT,
            color: None,
            items: Vec::new(),
        }
    }

    /// Find an item by id.
    pub fn find_item(&self, id: Uuid) -> Option<&TimelineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Find an item mutably by id.
    pub fn find_item_mut(&mut self, id: Uuid) -> Option<&mut TimelineItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Index of an item by id.
    pub fn item_index(&self, id: Uuid) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Latest end time of any item on this track, or 0 when empty.
    pub fn max_item_end(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.end_time())
            .fold(0.0, f64::max)
    }

    /// Apply a partial update, returning the reverse patch of fields that
    /// actually changed. Identity is never patched; there is deliberately
    /// no `id` field on [`TrackPatch`].
    pub fn apply_patch(&mut self, patch: &TrackPatch) -> TrackPatch {
        let mut reverse = TrackPatch::default();
        if let Some(name) = &patch.name {
            if *name != self.name {
                reverse.name = Some(std::mem::replace(&mut self.name, name.clone()));
            }
        }
        if let Some(locked) = patch.locked {
            if locked != self.locked {
                reverse.locked = Some(self.locked);
                self.locked = locked;
            }
        }
        if let Some(muted) = patch.muted {
            if muted != self.muted {
                reverse.muted = Some(self.muted);
                self.muted = muted;
            }
        }
        if let Some(solo) = patch.solo {
            if solo != self.solo {
                reverse.solo = Some(self.solo);
                self.solo = solo;
            }
        }
        if let Some(visible) = patch.visible {
            if visible != self.visible {
                reverse.visible = Some(self.visible);
                self.visible = visible;
            }
        }
        if let Some(volume) = patch.volume {
            if volume != self.volume {
                reverse.volume = Some(self.volume);
                self.volume = volume;
            }
        }
        if let Some(opacity) = patch.opacity {
            if opacity != self.opacity {
                reverse.opacity = Some(self.opacity);
                self.opacity = opacity;
            }
        }
        if let Some(height) = patch.height {
            if height != self.height {
                reverse.height = Some(self.height);
                self.height = height;
            }
        }
        if let Some(color) = &patch.color {
            if *color != self.color {
                reverse.color = Some(std::mem::replace(&mut self.color, color.clone()));
            }
        }
        reverse
    }
}

/// Partial update for a track. Identity is never patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackPatch {
    pub name: Option<String>,
    pub locked: Option<bool>,
    pub muted: Option<bool>,
    pub solo: Option<bool>,
    pub visible: Option<bool>,
    pub volume: Option<f64>,
    pub opacity: Option<f64>,
    pub height: Option<f32>,
    /// Outer `Some` = set the color; `Some(None)` clears it.
    pub color: Option<Option<String>>,
}

impl TrackPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
