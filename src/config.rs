use crate::constants::{
    DWELL_DELAY_MAX_MS, DWELL_DELAY_MIN_MS, SENSITIVITY_MAX, SENSITIVITY_MIN, SMOOTHING_MAX,
};
use serde::Serialize;
use std::time::Duration;

/// User adjustable interaction settings.
///
/// These survive a session reset. Out of range values are clamped by
/// [`Config::clamped`] rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, structopt::StructOpt)]
pub struct Config {
    /// Click by holding the pointer still while pointing.
    #[structopt(long = "dwell-click")]
    pub dwell_click_enabled: bool,

    /// How long the pointer must rest before a dwell click, in milliseconds.
    #[structopt(long = "dwell-delay", default_value = "1500")]
    pub dwell_click_delay_ms: u64,

    /// Pointer travel relative to hand travel.
    #[structopt(long, default_value = "1.0")]
    pub pointer_sensitivity: f32,

    /// Weight of the previous pointer sample, 0 disables smoothing.
    #[structopt(long, default_value = "0.0")]
    pub pointer_smoothing: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dwell_click_enabled: false,
            dwell_click_delay_ms: 1500,
            pointer_sensitivity: 1.0,
            pointer_smoothing: 0.0,
        }
    }
}

impl Config {
    pub fn clamped(self) -> Self {
        Self {
            dwell_click_enabled: self.dwell_click_enabled,
            dwell_click_delay_ms: self
                .dwell_click_delay_ms
                .clamp(DWELL_DELAY_MIN_MS, DWELL_DELAY_MAX_MS),
            pointer_sensitivity: clamp_or(
                self.pointer_sensitivity,
                SENSITIVITY_MIN,
                SENSITIVITY_MAX,
                1.0,
            ),
            pointer_smoothing: clamp_or(self.pointer_smoothing, 0.0, SMOOTHING_MAX, 0.0),
        }
    }

    pub fn dwell_click_delay(&self) -> Duration {
        Duration::from_millis(self.dwell_click_delay_ms)
    }
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}
