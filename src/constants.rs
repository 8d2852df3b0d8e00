use std::time::Duration;

/// A finger counts as extended when its tip is this much farther from the
/// wrist than its PIP joint.
pub const FINGER_EXTENSION_RATIO: f32 = 1.1;

/// Thumb tip to index MCP distance beyond which the thumb is extended.
pub const THUMB_EXTENSION_DISTANCE: f32 = 0.1;

/// Thumb tip to index tip distance below which the hand is pinching.
pub const PINCH_DISTANCE: f32 = 0.055;

/// Clicks closer together than this are treated as bounce, not a double click.
pub const DOUBLE_CLICK_MIN: Duration = Duration::from_millis(50);
pub const DOUBLE_CLICK_MAX: Duration = Duration::from_millis(400);

/// Per-axis pointer movement that restarts the dwell timer.
pub const DWELL_MOVE_THRESHOLD: f32 = 0.02;

/// How long a fist or open hand must be held before releasing it zooms.
pub const ZOOM_HOLD: Duration = Duration::from_millis(200);

pub const ZOOM_STEP: f32 = 1.3;
pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 5.0;

/// Normalized pointer delta to pan units at zoom 1.
pub const PAN_SCALE: f32 = 500.0;

pub const FPS_WINDOW: Duration = Duration::from_secs(1);

pub const DWELL_DELAY_MIN_MS: u64 = 500;
pub const DWELL_DELAY_MAX_MS: u64 = 3000;
pub const SENSITIVITY_MIN: f32 = 0.5;
pub const SENSITIVITY_MAX: f32 = 2.0;
pub const SMOOTHING_MAX: f32 = 0.95;
