//! Test utilities for line parser testing
//!
//! Provides sample report lines in both layout dialects and helpers shared by
//! the field, classifier and parser tests.

use crate::app::models::{Gender, SwimmerContext};

mod field_parser_tests;

/// Header for the first sample swimmer
pub const JANE_HEADER: &str = "Doe, Jane (12) F";

/// Header for the second sample swimmer
pub const SAM_HEADER: &str = "Smith, Sam (13) M";

/// Event row in the columns dialect
pub const COLUMNS_EVENT: &str = "1:05.32 Y F -1.25 100 Free 6/15/2024 Summer Invitational";

/// Another event row in the columns dialect
pub const COLUMNS_EVENT_BACK: &str = "x33.01 S P -0.40 50 Back 7/4/2024 Independence Day Splash";

/// The same swim as [`COLUMNS_EVENT`] in the pattern dialect
pub const PATTERN_EVENT: &str = "6/15/2024 Summer Invitational 1:05.32 Y 100 Free F -1.25";

/// Context matching [`JANE_HEADER`]
pub fn jane() -> SwimmerContext {
    SwimmerContext {
        name: "Doe, Jane".to_string(),
        age: 12,
        gender: Gender::Female,
    }
}

/// Filler lines standing in for a page banner
pub fn banner(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Banner line {}", i)).collect()
}

/// Approximate float comparison
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
