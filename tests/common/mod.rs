use std::sync::Mutex;

use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;
use spesa_core::{
    core::{FixedClock, Tracker},
    storage::{JsonFileBackend, MemoryBackend},
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the
/// test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Tracker on a throwaway in-memory backend with a pinned clock.
pub fn memory_tracker() -> Tracker {
    Tracker::with_clock(Box::new(MemoryBackend::default()), Box::new(test_clock()))
}

/// Tracker persisting to a unique temporary directory; returns the slot
/// directory so a second tracker can be pointed at the same files.
pub fn json_tracker() -> (Tracker, std::path::PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let dir = temp.path().join("slots");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let backend = JsonFileBackend::new(dir.clone()).expect("create json backend");
    let tracker = Tracker::with_clock(Box::new(backend), Box::new(test_clock()));
    (tracker, dir)
}

pub fn test_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
}
