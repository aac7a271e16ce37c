//! ClipCast Timeline - Timeline data model and mutation engine
//!
//! Implements the editable timeline for a podcast episode:
//! - Tracks containing placed media items
//! - Point markers and clip-range markers
//! - Reversible edit operations (command pattern)
//! - Bounded undo/redo history
//! - Versioned JSON persistence

pub mod edit;
pub mod history;
pub mod item;
pub mod marker;
pub mod serialization;
pub mod timeline;
pub mod track;

pub use edit::{EditCommand, ItemPlacement, RemovedItem};
pub use history::{History, HistoryEntry};
pub use item::{
    ItemKind, ItemPatch, MediaRef, MediaSourceKind, TextOverlay, TimelineItem, Transform,
    Transition, TransitionKind,
};
pub use marker::{ClipFormat, ClipMarker, ClipMarkerPatch, MarkerKind, MarkerPatch, TimelineMarker};
pub use serialization::{TimelineFile, CURRENT_VERSION};
pub use timeline::{AspectRatio, Background, CaptionStyle, MulticamConfig, Timeline};
pub use track::{Track, TrackKind, TrackPatch};
