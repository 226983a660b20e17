use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;

/// The persisted record of finished units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub completed_units: Vec<String>,
}

impl Progress {
    /// Parses a stored record. Anything unreadable counts as no progress.
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn is_completed(&self, unit_id: &str) -> bool {
        self.completed_units.iter().any(|id| id == unit_id)
    }

    /// Returns false when the unit was already recorded.
    pub fn mark_completed(&mut self, unit_id: &str) -> bool {
        if self.is_completed(unit_id) {
            return false;
        }
        self.completed_units.push(unit_id.to_string());
        true
    }
}

pub trait ProgressStore {
    fn load(&self) -> Progress;
    fn save(&self, progress: &Progress) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileProgressStore {
    path: PathBuf,
}

impl FileProgressStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::progress_path().unwrap_or_else(|| PathBuf::from("slowka_progress.json")),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileProgressStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressStore for FileProgressStore {
    fn load(&self) -> Progress {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Progress::from_json(&raw),
            Err(_) => Progress::default(),
        }
    }

    fn save(&self, progress: &Progress) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec(progress)?;
        fs::write(&self.path, data)
    }
}

/// Keeps the raw serialized record in memory, the way a key-value store would.
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    raw: RefCell<Option<String>>,
}

impl MemoryProgressStore {
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: RefCell::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.raw.borrow().clone()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self) -> Progress {
        self.raw
            .borrow()
            .as_deref()
            .map(Progress::from_json)
            .unwrap_or_default()
    }

    fn save(&self, progress: &Progress) -> io::Result<()> {
        *self.raw.borrow_mut() = Some(serde_json::to_string(progress)?);
        Ok(())
    }
}

/// Read-modify-write front for a [`ProgressStore`]. Every change is written
/// through immediately.
pub struct ProgressTracker {
    store: Box<dyn ProgressStore>,
    progress: Progress,
}

impl ProgressTracker {
    pub fn new(store: Box<dyn ProgressStore>) -> Self {
        let progress = store.load();
        Self { store, progress }
    }

    pub fn completed_units(&self) -> &[String] {
        &self.progress.completed_units
    }

    pub fn is_completed(&self, unit_id: &str) -> bool {
        self.progress.is_completed(unit_id)
    }

    pub fn mark_completed(&mut self, unit_id: &str) {
        if self.progress.mark_completed(unit_id) {
            log::info!("unit {unit_id} completed");
            self.persist();
        }
    }

    pub fn reset(&mut self) {
        self.progress = Progress::default();
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.progress) {
            log::warn!("failed to save progress: {e}");
        }
    }
}

impl std::fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use tempfile::tempdir;

    struct Shared(Rc<MemoryProgressStore>);

    impl ProgressStore for Shared {
        fn load(&self) -> Progress {
            self.0.load()
        }
        fn save(&self, progress: &Progress) -> io::Result<()> {
            self.0.save(progress)
        }
    }

    #[test]
    fn test_mark_completed_is_idempotent() {
        let mut tracker = ProgressTracker::new(Box::new(MemoryProgressStore::default()));
        tracker.mark_completed("U1");
        tracker.mark_completed("U1");
        assert_eq!(tracker.completed_units(), ["U1".to_string()]);
    }

    #[test]
    fn test_corrupted_storage_reads_as_empty() {
        let tracker = ProgressTracker::new(Box::new(MemoryProgressStore::with_raw("{not json")));
        assert!(tracker.completed_units().is_empty());
    }

    #[test]
    fn test_wrong_shape_reads_as_empty() {
        for raw in [
            r#"{"completedUnits": "U1"}"#,
            r#"{"completedUnits": null}"#,
            r#"{"other": []}"#,
            "[]",
            "null",
            "",
        ] {
            assert_eq!(Progress::from_json(raw), Progress::default(), "{raw}");
        }
    }

    #[test]
    fn test_valid_record_is_read() {
        let progress = Progress::from_json(r#"{"completedUnits": ["Unit1", "Unit3"]}"#);
        assert!(progress.is_completed("Unit1"));
        assert!(!progress.is_completed("Unit2"));
    }

    #[test]
    fn test_every_change_is_written_through() {
        let store = Rc::new(MemoryProgressStore::default());
        let mut tracker = ProgressTracker::new(Box::new(Shared(Rc::clone(&store))));

        assert_eq!(store.raw(), None);
        tracker.mark_completed("Unit2");
        assert_eq!(store.raw().as_deref(), Some(r#"{"completedUnits":["Unit2"]}"#));
        tracker.mark_completed("Unit1");
        assert_eq!(
            store.raw().as_deref(),
            Some(r#"{"completedUnits":["Unit2","Unit1"]}"#)
        );
    }

    #[test]
    fn test_repeat_mark_does_not_write() {
        let store = Rc::new(MemoryProgressStore::with_raw(r#"{"completedUnits":["U1"]}"#));
        let mut tracker = ProgressTracker::new(Box::new(Shared(Rc::clone(&store))));
        // a write would normalise this to the compact form; a no-op leaves it alone
        *store.raw.borrow_mut() = Some(r#"{ "completedUnits": ["U1"] }"#.to_string());
        tracker.mark_completed("U1");
        assert_eq!(store.raw().as_deref(), Some(r#"{ "completedUnits": ["U1"] }"#));
    }

    #[test]
    fn test_reset() {
        let mut tracker = ProgressTracker::new(Box::new(MemoryProgressStore::with_raw(
            r#"{"completedUnits":["U1","U2"]}"#,
        )));
        assert!(tracker.is_completed("U2"));
        tracker.reset();
        assert!(tracker.completed_units().is_empty());
        assert!(!tracker.is_completed("U2"));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("progress.json");
        let store = FileProgressStore::with_path(&path);
        assert_eq!(store.load(), Progress::default());

        let mut progress = Progress::default();
        progress.mark_completed("Unit10");
        store.save(&progress).unwrap();
        assert_eq!(FileProgressStore::with_path(&path).load(), progress);
    }

    #[test]
    fn test_file_store_corrupted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, b"\x00\xffgarbage").unwrap();
        let tracker = ProgressTracker::new(Box::new(FileProgressStore::with_path(&path)));
        assert!(tracker.completed_units().is_empty());
    }

    #[test]
    fn test_file_tracker_survives_restart() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        {
            let mut tracker = ProgressTracker::new(Box::new(FileProgressStore::with_path(&path)));
            tracker.mark_completed("Unit1");
        }
        let tracker = ProgressTracker::new(Box::new(FileProgressStore::with_path(&path)));
        assert!(tracker.is_completed("Unit1"));
    }
}
