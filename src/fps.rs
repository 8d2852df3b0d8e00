use crate::constants::FPS_WINDOW;
use std::time::Duration;

/// Frames per second over a rolling window, for display only.
#[derive(Debug, Clone, Copy, Default)]
pub struct FpsCounter {
    frames: u32,
    window_start: Option<Duration>,
    fps: u32,
}

impl FpsCounter {
    /// Count one frame at `now` and return the latest estimate.
    pub fn tick(&mut self, now: Duration) -> u32 {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;

        let elapsed = now.checked_sub(start).unwrap_or_default();
        if elapsed >= FPS_WINDOW {
            self.fps = (f64::from(self.frames) / elapsed.as_secs_f64()).round() as u32;
            self.frames = 0;
            self.window_start = Some(now);
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
