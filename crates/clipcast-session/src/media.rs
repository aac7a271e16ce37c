//! Media URL resolution boundary.
//!
//! Items reference media as `(source_id, kind)`; turning that pair into a
//! playable URL (proxy vs. full resolution, signed URLs, local cache) is a
//! collaborator concern the session treats as a black-box lookup.

use std::collections::HashMap;

use clipcast_timeline::MediaSourceKind;

/// Black-box `(source_id, kind) -> url` lookup.
pub trait MediaResolver {
    fn resolve_url(&self, source_id: &str, kind: MediaSourceKind) -> Option<String>;
}

/// A fixed in-memory resolver, keyed by source id.
#[derive(Debug, Clone, Default)]
pub struct StaticMediaResolver {
    urls: HashMap<String, String>,
}

impl StaticMediaResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source_id: impl Into<String>, url: impl Into<String>) {
        self.urls.insert(source_id.into(), url.into());
    }
}

impl MediaResolver for StaticMediaResolver {
    fn resolve_url(&self, source_id: &str, _kind: MediaSourceKind) -> Option<String> {
        self.urls.get(source_id).cloned()
    }
}
