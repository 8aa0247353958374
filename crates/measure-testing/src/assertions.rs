//! Assertion helpers for measured frames.

use measure_graphics::Frame;

/// Assert that a value is within an expected range.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that a frame is approximately equal to another.
pub fn assert_frame_approx_eq(actual: Frame, expected: Frame, tolerance: f32, msg: &str) {
    assert_approx_eq(
        actual.origin.x,
        expected.origin.x,
        tolerance,
        &format!("{} - x", msg),
    );
    assert_approx_eq(
        actual.origin.y,
        expected.origin.y,
        tolerance,
        &format!("{} - y", msg),
    );
    assert_approx_eq(
        actual.size.width,
        expected.size.width,
        tolerance,
        &format!("{} - width", msg),
    );
    assert_approx_eq(
        actual.size.height,
        expected.size.height,
        tolerance,
        &format!("{} - height", msg),
    );
}

/// Assert that a frame lies horizontally inside a window of `window_width`.
pub fn assert_within_window(frame: Frame, window_width: f32, msg: &str) {
    assert!(
        frame.origin.x >= 0.0 && frame.origin.x < window_width,
        "{}: x {} outside [0, {})",
        msg,
        frame.origin.x,
        window_width
    );
}
