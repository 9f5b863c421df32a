//! Integration Test: Panic Prohibition
//!
//! **Policy**: Production code propagates errors with `?` or degrades (the
//! transport falls back to a fixed reply). `unwrap()` and `expect()` belong in
//! tests only.

use architectural_enforcement::{fail_on, scan, PRODUCTION_DIRS};

#[test]
fn test_no_unwrap_in_production_code() {
    let violations = scan(PRODUCTION_DIRS, &[".unwrap()", ".expect("]);
    fail_on(
        &violations,
        "CRITICAL: unwrap/expect found in production code!",
        "Return a Result, use unwrap_or/unwrap_or_default, or log and continue.",
    );
}
