//! Selection state for the editing surface.
//!
//! The engine does not interpret selection; it only keeps it consistent
//! when referenced entities are deleted.

use uuid::Uuid;

/// Selected track and item ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    tracks: Vec<Uuid>,
    items: Vec<Uuid>,
}

impl Selection {
    /// Add a track to the selection (no-op if already selected).
    pub fn select_track(&mut self, id: Uuid) {
        if !self.tracks.contains(&id) {
            self.tracks.push(id);
        }
    }

    /// Add an item to the selection (no-op if already selected).
    pub fn select_item(&mut self, id: Uuid) {
        if !self.items.contains(&id) {
            self.items.push(id);
        }
    }

    /// Replace the selection with a single item.
    pub fn select_only_item(&mut self, id: Uuid) {
        self.clear();
        self.items.push(id);
    }

    pub fn deselect_track(&mut self, id: Uuid) {
        self.tracks.retain(|t| *t != id);
    }

    pub fn deselect_item(&mut self, id: Uuid) {
        self.items.retain(|i| *i != id);
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.items.clear();
    }

    pub fn is_track_selected(&self, id: Uuid) -> bool {
        self.tracks.contains(&id)
    }

    pub fn is_item_selected(&self, id: Uuid) -> bool {
        self.items.contains(&id)
    }

    pub fn track_ids(&self) -> &[Uuid] {
        &self.tracks
    }

    pub fn item_ids(&self) -> &[Uuid] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.items.is_empty()
    }
}
