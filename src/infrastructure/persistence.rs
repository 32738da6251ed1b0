use crate::domain::{PersistedDataError, StorageError, StorageResult, TaskList};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// String-valued key-value storage local to this machine.
pub trait SnapshotStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys become file names: ASCII letters, digits, `-`, `_` and `.`,
    /// not starting with `.`.
    pub fn validate_key(key: &str) -> StorageResult<()> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if valid {
            Ok(())
        } else {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }

    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        Self::validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SnapshotStore for FileStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;
        fs::write(&path, value).map_err(|source| StorageError::Io { path, source })
    }
}

/// In-memory store, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.items.insert(key.to_string(), value.to_string());
        store
    }
}

impl SnapshotStore for MemoryStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct SnapshotRepository;

impl SnapshotRepository {
    /// Reads the task list stored under `key`.
    ///
    /// A stored JSON `null` counts as missing.
    pub fn load(store: &dyn SnapshotStore, key: &str) -> Result<TaskList, PersistedDataError> {
        let raw = store
            .get_item(key)?
            .ok_or_else(|| PersistedDataError::Missing(key.to_string()))?;
        match serde_json::from_str::<Option<TaskList>>(&raw) {
            Ok(Some(list)) => Ok(list),
            Ok(None) => Err(PersistedDataError::Missing(key.to_string())),
            Err(source) => Err(PersistedDataError::Corrupt {
                key: key.to_string(),
                source,
            }),
        }
    }

    /// Like [`SnapshotRepository::load`], but any failure yields an empty list.
    pub fn load_or_empty(store: &dyn SnapshotStore, key: &str) -> TaskList {
        match Self::load(store, key) {
            Ok(list) => list,
            Err(e) => {
                tracing::debug!(key, error = %e, "no usable snapshot, starting empty");
                TaskList::new()
            }
        }
    }

    /// Overwrites the snapshot under `key` with the whole list.
    pub fn save(store: &mut dyn SnapshotStore, key: &str, list: &TaskList) -> StorageResult<()> {
        let json = serde_json::to_string(list)?;
        store.set_item(key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Task, TaskId};
    use tempfile::TempDir;

    fn sample() -> TaskList {
        let mut list = TaskList::from(vec![
            Task::new(TaskId(1), "A", "1/1/2026"),
            Task::new(TaskId(2), "B", "1/2/2026"),
        ]);
        list.toggle(TaskId(1));
        list
    }

    #[test]
    fn test_memory_round_trip() {
        let mut store = MemoryStore::new();
        SnapshotRepository::save(&mut store, "todoData", &sample()).unwrap();
        let loaded = SnapshotRepository::load(&store, "todoData").unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_missing_snapshot() {
        let store = MemoryStore::new();
        let err = SnapshotRepository::load(&store, "todoData").unwrap_err();
        assert!(matches!(err, PersistedDataError::Missing(_)));
        assert!(SnapshotRepository::load_or_empty(&store, "todoData").is_empty());
    }

    #[test]
    fn test_null_snapshot_is_missing() {
        let store = MemoryStore::with_item("todoData", "null");
        let err = SnapshotRepository::load(&store, "todoData").unwrap_err();
        assert!(matches!(err, PersistedDataError::Missing(_)));
    }

    #[test]
    fn test_corrupt_snapshot_falls_back_to_empty() {
        for raw in ["{not json", r#"{"id":1}"#, r#"[{"id":"x"}]"#] {
            let store = MemoryStore::with_item("todoData", raw);
            assert!(matches!(
                SnapshotRepository::load(&store, "todoData"),
                Err(PersistedDataError::Corrupt { .. })
            ));
            assert!(SnapshotRepository::load_or_empty(&store, "todoData").is_empty());
        }
    }

    #[test]
    fn test_reads_browser_snapshot() {
        let raw = r#"[{"id":1700000000000,"text":"写作业","time":"2023/11/15","isDone":true}]"#;
        let store = MemoryStore::with_item("todoData", raw);
        let list = SnapshotRepository::load(&store, "todoData").unwrap();
        let task = list.get(TaskId(1700000000000)).unwrap();
        assert_eq!(task.text, "写作业");
        assert!(task.is_done);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get_item("todoData").unwrap(), None);
        SnapshotRepository::save(&mut store, "todoData", &sample()).unwrap();
        assert!(dir.path().join("nested").join("todoData.json").exists());

        let reopened = FileStore::new(dir.path().join("nested"));
        assert_eq!(SnapshotRepository::load(&reopened, "todoData").unwrap(), sample());
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());
        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(
                store.set_item(key, "[]"),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }
}
