//! JSON file meeting store.
//!
//! One pretty-printed JSON document per meeting, `<dir>/<meeting_id>.json`.
//! Saves go through a temporary file and a rename so a reader never sees a
//! half-written state. Writers in this process are serialized; the version
//! check rejects a save built from a stale load.

use async_trait::async_trait;
use gavel_application::ports::meeting_store::{MeetingStore, StoreError};
use gavel_domain::MeetingState;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

pub struct JsonFileMeetingStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileMeetingStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, meeting_id: &str) -> Result<PathBuf, StoreError> {
        let valid = !meeting_id.is_empty()
            && meeting_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidId(meeting_id.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", meeting_id)))
    }

    async fn read(&self, path: &Path, meeting_id: &str) -> Result<MeetingState, StoreError> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(meeting_id.to_string()));
            }
            Err(e) => return Err(StoreError::Io(format!("{}: {}", path.display(), e))),
        };
        serde_json::from_str(&content)
            .map_err(|e| StoreError::Serialization(format!("{}: {}", path.display(), e)))
    }

    async fn write(&self, path: &Path, state: &MeetingState) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {}", self.dir.display(), e)))?;

        let json = serde_json::to_string_pretty(state)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {}", path.display(), e)))?;

        debug!("Wrote {} at version {}", path.display(), state.version);
        Ok(())
    }
}

#[async_trait]
impl MeetingStore for JsonFileMeetingStore {
    async fn load(&self, meeting_id: &str) -> Result<MeetingState, StoreError> {
        let path = self.path_for(meeting_id)?;
        self.read(&path, meeting_id).await
    }

    async fn create(&self, state: &MeetingState) -> Result<(), StoreError> {
        let path = self.path_for(&state.meeting_id)?;
        let _guard = self.write_lock.lock().await;

        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StoreError::AlreadyExists(state.meeting_id.clone()));
        }
        self.write(&path, state).await
    }

    async fn save(&self, state: &MeetingState, expected_version: u64) -> Result<(), StoreError> {
        let path = self.path_for(&state.meeting_id)?;
        let _guard = self.write_lock.lock().await;

        let stored = self.read(&path, &state.meeting_id).await?;
        if stored.version != expected_version {
            return Err(StoreError::VersionConflict {
                meeting_id: state.meeting_id.clone(),
                expected: expected_version,
                found: stored.version,
            });
        }
        self.write(&path, state).await
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(format!("{}: {}", self.dir.display(), e))),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}
