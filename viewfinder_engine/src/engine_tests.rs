//! Unit tests for the Engine logging facade
//!
//! IMPORTANT: the logger is a process-wide static shared across all tests.
//! All tests are marked with #[serial] to run sequentially.

use crate::viewfinder::Engine;
use crate::viewfinder::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn install_test_logger() -> Arc<Mutex<Vec<LogEntry>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Engine::set_logger(TestLogger { entries: entries.clone() });
    entries
}

/// Entries from this test module only (other unit tests may log concurrently)
fn own_entries(entries: &Arc<Mutex<Vec<LogEntry>>>) -> Vec<LogEntry> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.source == SOURCE)
        .cloned()
        .collect()
}

const SOURCE: &str = "viewfinder::EngineTests";

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_log_reaches_custom_logger() {
    let entries = install_test_logger();

    Engine::log(LogSeverity::Info, SOURCE, "hello".to_string());

    let captured = own_entries(&entries);
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].message, "hello");
    assert!(captured[0].file.is_none());

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_min_severity_filters_entries() {
    let entries = install_test_logger();
    Engine::set_min_severity(LogSeverity::Warn);

    Engine::log(LogSeverity::Debug, SOURCE, "dropped".to_string());
    Engine::log(LogSeverity::Info, SOURCE, "dropped".to_string());
    Engine::log(LogSeverity::Warn, SOURCE, "kept".to_string());

    let captured = own_entries(&entries);
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].message, "kept");
    assert_eq!(Engine::min_severity(), LogSeverity::Warn);

    Engine::reset_logger();
    assert_eq!(Engine::min_severity(), LogSeverity::Info);
}

#[test]
#[serial]
fn test_error_macro_carries_location() {
    let entries = install_test_logger();

    crate::vf_error!(SOURCE, "boom {}", 1);

    let captured = own_entries(&entries);
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].severity, LogSeverity::Error);
    assert_eq!(captured[0].message, "boom 1");
    assert!(captured[0].file.is_some());
    assert!(captured[0].line.is_some());

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_err_macro_logs_and_builds_error() {
    let entries = install_test_logger();

    let err = crate::vf_err!(InvalidHandle, SOURCE, "photo {} gone", 7);

    assert!(matches!(err, crate::viewfinder::Error::InvalidHandle(ref m) if m == "photo 7 gone"));
    assert_eq!(own_entries(&entries).len(), 1);

    Engine::reset_logger();
}
