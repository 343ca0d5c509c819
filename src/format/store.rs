//! Key-value storage for snapshots and session recovery.

use std::collections::HashMap;

use crate::state::AnnotationState;

use super::{FormatError, PersistedState};

/// Where snapshots are kept between sessions.
pub trait SnapshotStore {
    /// Stored text for `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, FormatError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), FormatError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), FormatError>;
}

/// In-memory store, used by tests and hosts without a file system.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, FormatError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FormatError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), FormatError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store {
    use std::path::{Path, PathBuf};

    use super::{FormatError, SnapshotStore};

    /// One `<key>.json` file per key inside a directory.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
    }

    impl FileStore {
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        /// Store in the platform data directory (`<data_dir>/edat`).
        pub fn in_data_dir() -> Result<Self, FormatError> {
            let base = dirs::data_dir()
                .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
                .ok_or_else(|| FormatError::storage("Could not determine data directory"))?;
            Ok(Self::new(base.join("edat")))
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        fn path_for(&self, key: &str) -> PathBuf {
            self.dir.join(format!("{}.json", key))
        }
    }

    impl SnapshotStore for FileStore {
        fn get(&self, key: &str) -> Result<Option<String>, FormatError> {
            let path = self.path_for(key);
            if !path.exists() {
                return Ok(None);
            }
            Ok(Some(std::fs::read_to_string(path)?))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), FormatError> {
            std::fs::create_dir_all(&self.dir)?;
            let path = self.path_for(key);
            std::fs::write(&path, value)?;
            log::debug!("💾 Wrote {:?}", path);
            Ok(())
        }

        fn remove(&mut self, key: &str) -> Result<(), FormatError> {
            let path = self.path_for(key);
            if path.exists() {
                std::fs::remove_file(path)?;
            }
            Ok(())
        }
    }
}

/// Outcome of looking for a previous session's snapshot.
#[derive(Debug)]
pub enum Recovery {
    /// Nothing was stored.
    Empty,
    /// A snapshot was found and merged over the initial state.
    Recovered(Box<AnnotationState>),
    /// A snapshot was found but could not be used; it has been removed.
    Discarded(FormatError),
}

/// Look up `key` and merge a valid snapshot over `initial`.
///
/// Unreadable snapshots are removed from the store so the next session
/// starts clean.
pub fn recover(
    store: &mut dyn SnapshotStore,
    key: &str,
    initial: AnnotationState,
) -> Result<Recovery, FormatError> {
    let Some(raw) = store.get(key)? else {
        return Ok(Recovery::Empty);
    };

    match PersistedState::from_json(&raw) {
        Ok(snapshot) => {
            log::info!(
                "Recovered snapshot '{}' ({} images, {} regions)",
                key,
                snapshot.images.len(),
                snapshot.region_count()
            );
            Ok(Recovery::Recovered(Box::new(snapshot.merge_into(initial))))
        }
        Err(e) => {
            log::warn!("Discarding snapshot '{}': {}", key, e);
            store.remove(key)?;
            Ok(Recovery::Discarded(e))
        }
    }
}

/// Write the snapshot of `state` under `key`.
pub fn save(store: &mut dyn SnapshotStore, key: &str, state: &AnnotationState) -> Result<(), FormatError> {
    let json = PersistedState::from_state(state).to_json()?;
    store.set(key, &json)
}
