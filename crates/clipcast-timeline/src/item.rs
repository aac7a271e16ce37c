//! Item types for the timeline.

use clipcast_core::TimeRange;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of content an item places on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Video,
    Audio,
    Image,
    Text,
    Caption,
    Transition,
}

impl ItemKind {
    /// Whether items of this kind reference external media.
    ///
    /// Text, captions, and transitions are self-contained; everything else
    /// plays a slice of an underlying asset.
    pub fn requires_media(self) -> bool {
        matches!(self, Self::Video | Self::Audio | Self::Image)
    }
}

/// Where a referenced media asset lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSourceKind {
    /// The episode's own audio/video.
    Episode,
    /// A user-uploaded asset.
    Upload,
    /// A stock-library asset.
    Stock,
}

/// Reference to an external media asset.
///
/// Resolving `(source_id, kind)` to a playable URL is delegated to the
/// session's media resolver; `url` is only a cache of that lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    /// Opaque id understood by the media collaborator.
    pub source_id: String,
    /// Source kind tag.
    pub kind: MediaSourceKind,
    /// Cached resolved playback URL, if any.
    pub url: Option<String>,
}

impl MediaRef {
    /// Create an unresolved media reference.
    pub fn new(source_id: impl Into<String>, kind: MediaSourceKind) -> Self {
        Self {
            source_id: source_id.into(),
            kind,
            url: None,
        }
    }
}

/// Spatial placement of an item in the output frame.
///
/// Positions are percentages of the frame (50/50 = centered).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position_x: f64,
    pub position_y: f64,
    pub scale: f64,
    pub rotation: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position_x: 50.0,
            position_y: 50.0,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

/// Text overlay configuration for text/caption items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    pub content: String,
    pub font_family: String,
    pub font_size: f32,
    pub color: String,
}

impl TextOverlay {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_family: "Inter".into(),
            font_size: 48.0,
            color: "#ffffff".into(),
        }
    }
}

/// Transition style at an item boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Fade,
    Dissolve,
    Slide,
    Wipe,
}

/// A transition descriptor attached to an item edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub kind: TransitionKind,
    /// Transition length in seconds.
    pub duration: f64,
}

/// A single placed unit of content on exactly one track.
///
/// `start_time`/`duration` position the item in timeline space;
/// `source_in`/`source_out` select the slice of the underlying asset being
/// played. For trimmed media the source slice must be able to supply enough
/// material at the given speed: `source_out - source_in >= duration / speed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    /// Unique item ID
    pub id: Uuid,
    /// Owning track. Reassigned only through a move operation.
    pub track_id: Uuid,
    /// Content kind
    pub kind: ItemKind,
    /// Timeline-space start (seconds, >= 0)
    pub start_time: f64,
    /// Timeline-space duration (seconds)
    pub duration: f64,
    /// Source-space in point (seconds)
    pub source_in: f64,
    /// Source-space out point (seconds)
    pub source_out: f64,
    /// Playback speed multiplier (1.0 = normal)
    pub speed: f64,
    /// Item audio volume [0, 1]
    pub volume: f64,
    /// Item opacity [0, 1]
    pub opacity: f64,
    /// Fade-in length in seconds
    pub fade_in: f64,
    /// Fade-out length in seconds
    pub fade_out: f64,
    /// External media reference (None for pure text/graphic items)
    pub media: Option<MediaRef>,
    /// Spatial transform
    pub transform: Transform,
    /// Text overlay configuration
    pub text: Option<TextOverlay>,
    /// Transition into this item
    pub transition_in: Option<Transition>,
    /// Transition out of this item
    pub transition_out: Option<Transition>,
}

impl TimelineItem {
    /// Create a new item with documented defaults. The owning track id is
    /// assigned when the item is added to a track.
    pub fn new(kind: ItemKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            track_id: Uuid::nil(),
            kind,
            start_time: 0.0,
            duration: 0.0,
            source_in: 0.0,
            source_out: 0.0,
            speed: 1.0,
            volume: 1.0,
            opacity: 1.0,
            fade_in: 0.0,
            fade_out: 0.0,
            media: None,
            transform: Transform::default(),
            text: None,
            transition_in: None,
            transition_out: None,
        }
    }

    /// Timeline-space end time (exclusive).
    #[inline]
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Timeline-space range occupied by this item.
    #[inline]
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.duration)
    }

    /// Whether the item is active at `time` (start-inclusive, end-exclusive).
    #[inline]
    pub fn is_active_at(&self, time: f64) -> bool {
        self.range().contains(time)
    }

    /// The source-media time this item should be seeked to when the
    /// playhead is at `time`, clamped into `[source_in, source_out]`.
    pub fn source_seek_time(&self, time: f64) -> f64 {
        let raw = self.source_in + (time - self.start_time) * self.speed;
        raw.min(self.source_out).max(self.source_in)
    }

    /// Whether this item can contribute to playback: media-backed items
    /// need a resolved URL, self-contained items always can.
    pub fn is_playable(&self) -> bool {
        if !self.kind.requires_media() {
            return true;
        }
        self.media
            .as_ref()
            .is_some_and(|media| media.url.is_some())
    }

    /// Apply a partial update, returning the reverse patch of fields that
    /// actually changed. `id` and `track_id` are protected by construction:
    /// [`ItemPatch`] has no such fields, and track reassignment goes through
    /// the move operation exclusively.
    ///
    /// Source-range fields are writable without invariant re-validation;
    /// callers validate before patching.
    pub fn apply_patch(&mut self, patch: &ItemPatch) -> ItemPatch {
        let mut reverse = ItemPatch::default();
        macro_rules! patch_field {
            ($field:ident) => {
                if let Some(value) = patch.$field {
                    if value != self.$field {
                        reverse.$field = Some(self.$field);
                        self.$field = value;
                    }
                }
            };
        }
        patch_field!(start_time);
        patch_field!(duration);
        patch_field!(source_in);
        patch_field!(source_out);
        patch_field!(speed);
        patch_field!(volume);
        patch_field!(opacity);
        patch_field!(fade_in);
        patch_field!(fade_out);
        patch_field!(transform);
        if let Some(media) = &patch.media {
            if *media != self.media {
                reverse.media = Some(std::mem::replace(&mut self.media, media.clone()));
            }
        }
        if let Some(text) = &patch.text {
            if *text != self.text {
                reverse.text = Some(std::mem::replace(&mut self.text, text.clone()));
            }
        }
        if let Some(transition_in) = patch.transition_in {
            if transition_in != self.transition_in {
                reverse.transition_in = Some(self.transition_in);
                self.transition_in = transition_in;
            }
        }
        if let Some(transition_out) = patch.transition_out {
            if transition_out != self.transition_out {
                reverse.transition_out = Some(self.transition_out);
                self.transition_out = transition_out;
            }
        }
        reverse
    }
}

/// Partial update for an item. Has no `id` or `track_id` field on purpose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub start_time: Option<f64>,
    pub duration: Option<f64>,
    pub source_in: Option<f64>,
    pub source_out: Option<f64>,
    pub speed: Option<f64>,
    pub volume: Option<f64>,
    pub opacity: Option<f64>,
    pub fade_in: Option<f64>,
    pub fade_out: Option<f64>,
    pub transform: Option<Transform>,
    /// Outer `Some` = set; `Some(None)` clears.
    pub media: Option<Option<MediaRef>>,
    /// Outer `Some` = set; `Some(None)` clears.
    pub text: Option<Option<TextOverlay>>,
    /// Outer `Some` = set; `Some(None)` clears.
    pub transition_in: Option<Option<Transition>>,
    /// Outer `Some` = set; `Some(None)` clears.
    pub transition_out: Option<Option<Transition>>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
