use crate::{constants::DWELL_MOVE_THRESHOLD, point::Point};
use std::time::Duration;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DwellStep {
    /// Fraction of the delay elapsed, in `[0, 1]`.
    pub progress: f32,
    pub fired: bool,
}

/// Clicks when the pointer has rested near one spot for `delay`.
#[derive(Debug, Clone, Copy)]
pub struct DwellTracker {
    delay: Duration,
    anchor: Option<Anchor>,
}

#[derive(Debug, Clone, Copy)]
struct Anchor {
    position: Point,
    since: Duration,
}

impl DwellTracker {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            anchor: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn update(&mut self, pointer: Point, now: Duration) -> DwellStep {
        let idle = DwellStep {
            progress: 0.0,
            fired: false,
        };

        let moved = self.anchor.map_or(true, |anchor| {
            anchor.position.max_axis_delta(pointer) > DWELL_MOVE_THRESHOLD
        });
        if moved {
            self.anchor = Some(Anchor {
                position: pointer,
                since: now,
            });
            return idle;
        }

        let anchor = match self.anchor.as_mut() {
            Some(anchor) => anchor,
            None => return idle,
        };

        let elapsed = now.checked_sub(anchor.since).unwrap_or_default();
        if elapsed >= self.delay {
            // the anchor stays put so a steady hand keeps clicking
            anchor.since = now;
            return DwellStep {
                progress: 0.0,
                fired: true,
            };
        }

        DwellStep {
            progress: (elapsed.as_secs_f32() / self.delay.as_secs_f32()).min(1.0),
            fired: false,
        }
    }

    pub fn cancel(&mut self) {
        self.anchor = None;
    }
}
