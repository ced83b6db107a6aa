//! Per-application command history, persisted across sessions.
//!
//! Each target application gets its own bounded log under the user data
//! directory. History is best-effort auxiliary state: a missing file is an
//! empty log, and persistence failures are surfaced as warnings by the
//! caller, never as fatal errors.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Subdirectory under the data root that contains per-application logs.
const HISTORY_DIR: &str = "history";
/// Canonical file extension for persisted history.
const HISTORY_FILE_EXT: &str = "json";
/// On-disk schema version for [`PersistedHistory`].
const HISTORY_FILE_VERSION: u32 = 1;

/// Most recent entries retained per application.
pub const DEFAULT_CAPACITY: usize = 500;

/// On-disk payload shape for persisted history.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedHistory {
    /// File-format version for forward compatibility checks.
    version: u32,
    /// Application this log belongs to.
    app: String,
    /// Input lines, oldest first.
    entries: Vec<String>,
}

/// Capacity-bounded, append-only command log for one application.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    app: String,
    entries: Vec<String>,
    capacity: usize,
    /// Absent for detached in-memory logs (persistence unavailable).
    path: Option<PathBuf>,
}

impl HistoryLog {
    /// Open/create the per-application log under the user data directory.
    pub fn open_default(app: &str, capacity: usize) -> Result<Self, String> {
        let Some(data_dir) = dirs::data_dir() else {
            return Err("could not determine the user data directory".to_string());
        };
        Self::open(data_dir.join("appsh"), app, capacity)
    }

    /// Open/create a log rooted under the given directory.
    ///
    /// An existing file is loaded; a missing, unreadable, or out-of-date file
    /// yields an empty log. Entries beyond `capacity` are evicted oldest
    /// first on load.
    pub fn open(root: impl AsRef<Path>, app: &str, capacity: usize) -> Result<Self, String> {
        validate_app_id(app)?;
        let dir = root.as_ref().join(HISTORY_DIR);
        fs::create_dir_all(&dir)
            .map_err(|e| format!("failed to create history directory {}: {e}", dir.display()))?;
        let path = dir.join(format!("{app}.{HISTORY_FILE_EXT}"));

        let mut log = Self {
            app: app.to_string(),
            entries: load_entries(&path, app),
            capacity,
            path: Some(path),
        };
        log.evict_to_capacity();
        Ok(log)
    }

    /// Build a detached log that never touches the filesystem.
    ///
    /// Used when the persistent location cannot be created; the session keeps
    /// running with in-memory history only.
    pub fn detached(app: &str, capacity: usize) -> Self {
        Self {
            app: app.to_string(),
            entries: Vec::new(),
            capacity,
            path: None,
        }
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append one input line, evicting the oldest entries over capacity.
    pub fn append(&mut self, line: &str) {
        self.entries.push(line.to_string());
        self.evict_to_capacity();
    }

    /// Write the full log to its persisted location.
    ///
    /// Detached logs flush to nowhere successfully.
    pub fn flush(&self) -> Result<(), String> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let payload = PersistedHistory {
            version: HISTORY_FILE_VERSION,
            app: self.app.clone(),
            entries: self.entries.clone(),
        };
        let json = serde_json::to_vec_pretty(&payload)
            .map_err(|e| format!("failed to serialize history for {}: {e}", self.app))?;
        // Write to a sibling temporary file first so partial writes do not
        // corrupt the last known-good log.
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| {
            format!(
                "failed to write temporary history file {}: {e}",
                tmp_path.display()
            )
        })?;
        fs::rename(&tmp_path, path).map_err(|e| {
            format!(
                "failed to move history file into place {}: {e}",
                path.display()
            )
        })?;
        Ok(())
    }

    fn evict_to_capacity(&mut self) {
        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(..excess);
        }
    }
}

/// Read persisted entries, treating every failure as an empty log.
fn load_entries(path: &Path, app: &str) -> Vec<String> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return Vec::new(),
    };
    let payload: PersistedHistory = match serde_json::from_str(&raw) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("ignoring malformed history file {}: {e}", path.display());
            return Vec::new();
        }
    };
    if payload.version != HISTORY_FILE_VERSION {
        tracing::warn!(
            "ignoring history file {} with unsupported version {}",
            path.display(),
            payload.version
        );
        return Vec::new();
    }
    if payload.app != app {
        tracing::warn!(
            "ignoring history file {} recorded for application {}",
            path.display(),
            payload.app
        );
        return Vec::new();
    }
    payload.entries
}

/// Validate application identifiers before touching the filesystem.
fn validate_app_id(app: &str) -> Result<(), String> {
    let trimmed = app.trim();
    if trimmed.is_empty() {
        return Err("application name cannot be empty".to_string());
    }
    if trimmed == "." || trimmed == ".." {
        return Err("application name cannot be '.' or '..'".to_string());
    }
    if trimmed
        .chars()
        .any(|ch| !(ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.'))
    {
        return Err(
            "application name can only contain ASCII letters, numbers, '.', '-', '_'".to_string(),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Per-process counter to avoid temp-dir name collisions in fast test runs.
    static NEXT_TMP_ID: AtomicU64 = AtomicU64::new(1);

    /// Build an isolated temporary root for each test.
    fn test_root() -> PathBuf {
        let unique = NEXT_TMP_ID.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        std::env::temp_dir().join(format!("appsh-history-test-{millis}-{unique}"))
    }

    // Ensures entries survive a flush/reopen cycle in original order.
    #[test]
    fn flush_and_reopen_round_trip() {
        let root = test_root();
        let mut log = HistoryLog::open(&root, "myapp", 10).expect("open");
        log.append("cd /var/log");
        log.append("pwd");
        log.flush().expect("flush");

        let reopened = HistoryLog::open(&root, "myapp", 10).expect("reopen");
        assert_eq!(reopened.entries(), ["cd /var/log", "pwd"]);
    }

    #[test]
    fn missing_file_is_an_empty_log() {
        let log = HistoryLog::open(test_root(), "myapp", 10).expect("open");
        assert!(log.is_empty());
    }

    // Ensures the capacity bound holds after any mutation, oldest out first.
    #[test]
    fn append_evicts_oldest_beyond_capacity() {
        let mut log = HistoryLog::detached("myapp", 3);
        for n in 1..=5 {
            log.append(&format!("command {n}"));
            assert!(log.len() <= 3);
        }
        assert_eq!(log.entries(), ["command 3", "command 4", "command 5"]);
    }

    #[test]
    fn reopening_with_smaller_capacity_trims_oldest() {
        let root = test_root();
        let mut log = HistoryLog::open(&root, "myapp", 10).expect("open");
        for n in 1..=6 {
            log.append(&format!("command {n}"));
        }
        log.flush().expect("flush");

        let trimmed = HistoryLog::open(&root, "myapp", 2).expect("reopen");
        assert_eq!(trimmed.entries(), ["command 5", "command 6"]);
    }

    // Ensures different applications never share a log.
    #[test]
    fn applications_have_separate_logs() {
        let root = test_root();
        let mut first = HistoryLog::open(&root, "first", 10).expect("open first");
        first.append("start");
        first.flush().expect("flush first");

        let second = HistoryLog::open(&root, "second", 10).expect("open second");
        assert!(second.is_empty());
    }

    #[test]
    fn malformed_file_is_treated_as_empty() {
        let root = test_root();
        let dir = root.join(HISTORY_DIR);
        fs::create_dir_all(&dir).expect("mkdir");
        fs::write(dir.join("myapp.json"), "not json at all").expect("write");

        let log = HistoryLog::open(&root, "myapp", 10).expect("open");
        assert!(log.is_empty());
    }

    // Ensures invalid identifiers are rejected before filesystem writes.
    #[test]
    fn invalid_app_id_is_rejected() {
        let err = HistoryLog::open(test_root(), "bad/name", 10).expect_err("must fail");
        assert!(err.contains("application name"), "got: {err}");
    }

    #[test]
    fn detached_log_flushes_to_nowhere() {
        let mut log = HistoryLog::detached("myapp", 10);
        log.append("pwd");
        log.flush().expect("detached flush is a no-op");
        assert_eq!(log.entries(), ["pwd"]);
    }
}
