//! Versioned JSON persistence for timelines.
//!
//! Every saved document carries a schema version. Loading decodes the raw
//! JSON first, upgrades it step by step to the current schema, and only
//! then deserializes into typed structs — so old documents keep opening
//! as the schema evolves, while documents from a newer build are refused
//! rather than silently misread.

use clipcast_core::{ClipcastError, Result};
use serde::{Deserialize, Serialize};

use crate::timeline::Timeline;

/// Schema version written by this build.
pub const CURRENT_VERSION: u32 = 1;

/// On-disk envelope around a timeline.
#[derive(Debug, Serialize, Deserialize)]
pub struct TimelineFile {
    /// Schema version of the enclosed timeline.
    pub version: u32,
    pub timeline: Timeline,
    /// Version of the application that wrote the document.
    pub app_version: String,
}

impl TimelineFile {
    /// Wrap a timeline in a current-version envelope.
    pub fn new(timeline: Timeline) -> Self {
        Self {
            version: CURRENT_VERSION,
            timeline,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Encode as pretty-printed JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| ClipcastError::Serialization(format!("could not encode timeline: {e}")))
    }

    /// Decode JSON bytes, upgrading older schemas along the way.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_slice(data).map_err(|e| {
            ClipcastError::Serialization(format!("timeline document is not valid JSON: {e}"))
        })?;

        // A missing version tag means a pre-envelope (v0) document.
        let version = raw.get("version").and_then(|v| v.as_u64()).unwrap_or(0) as u32;

        if version > CURRENT_VERSION {
            return Err(ClipcastError::Serialization(format!(
                "timeline document is v{version}, but this build reads up to v{CURRENT_VERSION}"
            )));
        }

        let upgraded = upgrade(raw, version)?;

        serde_json::from_value(upgraded).map_err(|e| {
            ClipcastError::Serialization(format!(
                "timeline document does not match schema v{CURRENT_VERSION}: {e}"
            ))
        })
    }

    /// Write the document to a file.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        let data = self.to_json()?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Read a document from a file.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }
}

/// Upgrade a raw document one schema step at a time up to
/// [`CURRENT_VERSION`].
fn upgrade(mut data: serde_json::Value, from_version: u32) -> Result<serde_json::Value> {
    let mut version = from_version;

    while version < CURRENT_VERSION {
        match version {
            0 => {
                // v0 stored the bare timeline with no envelope; wrap it.
                if data.get("version").is_none() {
                    data = serde_json::json!({
                        "version": 1,
                        "timeline": data,
                        "app_version": "0.1.0",
                    });
                }
                version = 1;
            }
            _ => {
                return Err(ClipcastError::Serialization(format!(
                    "no upgrade path from schema v{version}"
                )));
            }
        }
    }

    Ok(data)
}
