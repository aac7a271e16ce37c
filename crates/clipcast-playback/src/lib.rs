//! ClipCast Playback - Real-time preview plumbing
//!
//! Two pieces drive the preview:
//! - The active-item resolver: a pure function answering, for any playhead
//!   time, which items are live, at what source time, and under which
//!   track mute/volume/opacity.
//! - The transport: a per-frame playhead advance loop with boundary stops.

pub mod resolver;
pub mod transport;

pub use resolver::{resolve_active_items, ActiveItem, ActiveItems};
pub use transport::{Transport, MAX_TICK_DELTA};
