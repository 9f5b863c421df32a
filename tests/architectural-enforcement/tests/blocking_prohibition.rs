//! Integration Test: Blocking Prohibition
//!
//! **Policy**: Production code runs on the tokio runtime and MUST NOT block it.
//! Reveal pacing and frame ticks use `tokio::time::sleep`; the HTTP transport
//! uses async `reqwest`.

use architectural_enforcement::{fail_on, scan, PRODUCTION_DIRS};

#[test]
fn test_no_thread_sleep_in_production_code() {
    let violations = scan(PRODUCTION_DIRS, &["thread::sleep("]);
    fail_on(
        &violations,
        "CRITICAL: std::thread::sleep found in production code!",
        "Use tokio::time::sleep(..).await or wait on a channel.",
    );
}

#[test]
fn test_no_blocking_http_in_production_code() {
    let violations = scan(PRODUCTION_DIRS, &["reqwest::blocking"]);
    fail_on(
        &violations,
        "CRITICAL: blocking HTTP client found in production code!",
        "Use the async reqwest::Client.",
    );
}
