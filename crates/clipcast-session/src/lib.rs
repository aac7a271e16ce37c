//! ClipCast Session - One episode's editing session
//!
//! Composes the timeline, its history, selection state, and the playback
//! transport into a single `TimelineEditor` owned by the host for the
//! lifetime of an edit session, plus the boundaries to its collaborators:
//! persistence (`TimelineStore`), media URL resolution (`MediaResolver`),
//! and the render-status mirror.

pub mod editor;
pub mod gesture;
pub mod media;
pub mod render;
pub mod selection;
pub mod store;

pub use editor::{TimelineEditor, AUTOSAVE_DEBOUNCE};
pub use gesture::{razor_split, DragGesture, TrimEdge, TrimGesture, MIN_ITEM_DURATION};
pub use media::{MediaResolver, StaticMediaResolver};
pub use render::{RenderState, RenderStatus};
pub use selection::Selection;
pub use store::{init_timeline, load_timeline, open_or_init, JsonDirStore, MemoryStore, TimelineStore};
