//! Point markers and clip-range markers, owned by the timeline directly.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of point marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Chapter,
    Note,
    ClipStart,
    ClipEnd,
}

/// A point-in-time annotation on the timeline, not tied to any track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineMarker {
    pub id: Uuid,
    pub time: f64,
    pub label: String,
    pub color: String,
    pub kind: MarkerKind,
}

impl TimelineMarker {
    pub fn new(time: f64, label: impl Into<String>, kind: MarkerKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            time,
            label: label.into(),
            color: "#f59e0b".into(),
            kind,
        }
    }
}

/// Partial update for a point marker. Identity is never patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerPatch {
    pub time: Option<f64>,
    pub label: Option<String>,
    pub color: Option<String>,
    pub kind: Option<MarkerKind>,
}

impl MarkerPatch {
    pub fn is_empty(&self) -> bool {
        self.time.is_none() && self.label.is_none() && self.color.is_none() && self.kind.is_none()
    }
}

impl TimelineMarker {
    /// Apply a patch, returning the reverse patch of fields that actually
    /// changed. An empty reverse patch means the update was a no-op.
    pub fn apply_patch(&mut self, patch: &MarkerPatch) -> MarkerPatch {
        let mut reverse = MarkerPatch::default();
        if let Some(time) = patch.time {
            if time != self.time {
                reverse.time = Some(self.time);
                self.time = time;
            }
        }
        if let Some(label) = &patch.label {
            if *label != self.label {
                reverse.label = Some(std::mem::replace(&mut self.label, label.clone()));
            }
        }
        if let Some(color) = &patch.color {
            if *color != self.color {
                reverse.color = Some(std::mem::replace(&mut self.color, color.clone()));
            }
        }
        if let Some(kind) = patch.kind {
            if kind != self.kind {
                reverse.kind = Some(self.kind);
                self.kind = kind;
            }
        }
        reverse
    }
}

/// Target output format for a clip extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipFormat {
    /// 9:16 short-form vertical.
    Vertical,
    /// 1:1 square.
    Square,
    /// 16:9 full frame.
    Wide,
}

/// A named `[start_time, end_time)` range marking a candidate extraction
/// for downstream clip creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipMarker {
    pub id: Uuid,
    pub name: String,
    pub start_time: f64,
    pub end_time: f64,
    pub format: Option<ClipFormat>,
}

impl ClipMarker {
    pub fn new(name: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_time,
            end_time,
            format: None,
        }
    }
}

/// Partial update for a clip marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClipMarkerPatch {
    pub name: Option<String>,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    /// Outer `Some` = set the format; `Some(None)` clears it.
    pub format: Option<Option<ClipFormat>>,
}

impl ClipMarkerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.format.is_none()
    }
}

impl ClipMarker {
    /// Apply a patch, returning the reverse patch of fields that changed.
    pub fn apply_patch(&mut self, patch: &ClipMarkerPatch) -> ClipMarkerPatch {
        let mut reverse = ClipMarkerPatch::default();
        if let Some(name) = &patch.name {
            if *name != self.name {
                reverse.name = Some(std::mem::replace(&mut self.name, name.clone()));
            }
        }
        if let Some(start_time) = patch.start_time {
            if start_time != self.start_time {
                reverse.start_time = Some(self.start_time);
                self.start_time = start_time;
            }
        }
        if let Some(end_time) = patch.end_time {
            if end_time != self.end_time {
                reverse.end_time = Some(self.end_time);
                self.end_time = end_time;
            }
        }
        if let Some(format) = patch.format {
            if format != self.format {
                reverse.format = Some(self.format);
                self.format = format;
            }
        }
        reverse
    }
}
