//! Timeline persistence.
//!
//! A store holds exactly one timeline per `(podcast_id, episode_id)` pair
//! and always saves/loads whole documents. `JsonDirStore` is the on-disk
//! backend; `MemoryStore` backs tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clipcast_core::{ClipcastError, Result};
use clipcast_timeline::{Timeline, TimelineFile};
use tracing::debug;

use crate::editor::TimelineEditor;

/// Whole-document timeline persistence, one document per episode.
pub trait TimelineStore {
    /// Load an episode's timeline. `Ok(None)` means no document exists yet.
    fn load(&self, podcast_id: &str, episode_id: &str) -> Result<Option<Timeline>>;

    /// Save an episode's timeline, replacing any previous document.
    fn save(&self, podcast_id: &str, episode_id: &str, timeline: &Timeline) -> Result<()>;
}

/// One versioned JSON file per episode under a root directory.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn document_path(&self, podcast_id: &str, episode_id: &str) -> PathBuf {
        self.root.join(format!("{podcast_id}__{episode_id}.json"))
    }
}

impl TimelineStore for JsonDirStore {
    fn load(&self, podcast_id: &str, episode_id: &str) -> Result<Option<Timeline>> {
        let path = self.document_path(podcast_id, episode_id);
        if !path.exists() {
            return Ok(None);
        }
        let file = TimelineFile::load_from_file(&path)?;
        debug!(path = %path.display(), "timeline loaded");
        Ok(Some(file.timeline))
    }

    fn save(&self, podcast_id: &str, episode_id: &str, timeline: &Timeline) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        let path = self.document_path(podcast_id, episode_id);
        let file = TimelineFile::new(timeline.clone());
        file.save_to_file(&path)?;
        debug!(path = %path.display(), "timeline written");
        Ok(())
    }
}

impl JsonDirStore {
    /// Whether a document exists for the episode.
    pub fn exists(&self, podcast_id: &str, episode_id: &str) -> bool {
        self.document_path(podcast_id, episode_id).exists()
    }

    /// The directory documents are written under.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// In-memory store used by tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RefCell<HashMap<(String, String), Vec<u8>>>,
    fail_saves: RefCell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` fail, to exercise error paths.
    pub fn fail_saves(&self, fail: bool) {
        *self.fail_saves.borrow_mut() = fail;
    }

    pub fn document_count(&self) -> usize {
        self.documents.borrow().len()
    }
}

impl TimelineStore for MemoryStore {
    fn load(&self, podcast_id: &str, episode_id: &str) -> Result<Option<Timeline>> {
        let key = (podcast_id.to_string(), episode_id.to_string());
        match self.documents.borrow().get(&key) {
            Some(data) => Ok(Some(TimelineFile::from_json(data)?.timeline)),
            None => Ok(None),
        }
    }

    fn save(&self, podcast_id: &str, episode_id: &str, timeline: &Timeline) -> Result<()> {
        if *self.fail_saves.borrow() {
            return Err(ClipcastError::Storage("simulated save failure".into()));
        }
        let key = (podcast_id.to_string(), episode_id.to_string());
        let data = TimelineFile::new(timeline.clone()).to_json()?;
        self.documents.borrow_mut().insert(key, data);
        Ok(())
    }
}

/// Open an existing episode session. `Ok(None)` when no document exists.
pub fn load_timeline(
    store: &dyn TimelineStore,
    podcast_id: &str,
    episode_id: &str,
) -> Result<Option<TimelineEditor>> {
    Ok(store
        .load(podcast_id, episode_id)?
        .map(TimelineEditor::new))
}

/// Create and persist a fresh empty timeline for an episode.
pub fn init_timeline(
    store: &dyn TimelineStore,
    podcast_id: &str,
    episode_id: &str,
) -> Result<TimelineEditor> {
    let timeline = Timeline::new(podcast_id, episode_id);
    store.save(podcast_id, episode_id, &timeline)?;
    Ok(TimelineEditor::new(timeline))
}

/// Load the episode's session, creating it on first open.
pub fn open_or_init(
    store: &dyn TimelineStore,
    podcast_id: &str,
    episode_id: &str,
) -> Result<TimelineEditor> {
    match load_timeline(store, podcast_id, episode_id)? {
        Some(editor) => Ok(editor),
        None => init_timeline(store, podcast_id, episode_id),
    }
}
