//! `log` records reach the ring buffer through the global subscriber.
//! Kept in its own test binary since the subscriber is process-wide.

use rolling_logger::{init_logger, recent_lines, LoggerConfig, LoggerError};

#[test]
fn test_log_macros_are_buffered_and_filtered() {
    let config = LoggerConfig {
        capacity: 16,
        level: log::LevelFilter::Info,
        console: false,
    };
    let handle = init_logger("bridge-test", config).unwrap();

    log::info!(target: "planboard::board", "moved task {}", 3);
    log::debug!(target: "planboard::board", "hidden detail");

    let lines = recent_lines();
    assert!(
        lines.iter().any(|l| l.ends_with("INFO planboard::board: moved task 3")),
        "got {lines:?}"
    );
    assert!(!lines.iter().any(|l| l.contains("hidden detail")), "got {lines:?}");
    assert_eq!(handle.recent_lines(), lines);

    let again = init_logger("bridge-test", LoggerConfig::default());
    assert!(matches!(again, Err(LoggerError::AlreadyInitialized)));
}
