use crate::{
    gesture::Gesture,
    landmark::{HandPose, LandmarkKind},
    point::Point,
};

/// Pointer position for a gesture, mirrored so it tracks a user facing the
/// camera.
pub fn pointer_position(pose: &HandPose, gesture: Gesture) -> Point {
    use LandmarkKind::*;

    let raw = match gesture {
        Gesture::Peace => pose[IndexTip].midpoint(pose[MiddleTip]),
        Gesture::Fist | Gesture::Open => palm_center(pose),
        Gesture::ThumbsUp => pose[ThumbTip],
        Gesture::None | Gesture::Point | Gesture::Pinch | Gesture::ThreeFingers => pose[IndexTip],
    };
    raw.mirrored()
}

fn palm_center(pose: &HandPose) -> Point {
    pose[LandmarkKind::Wrist].midpoint(pose[LandmarkKind::MiddleMcp])
}

/// Damps frame-to-frame jitter and scales motion around the frame center.
///
/// At sensitivity 1 and smoothing 0 the input passes through untouched.
#[derive(Debug, Clone, Copy)]
pub struct PointerFilter {
    sensitivity: f32,
    smoothing: f32,
    last: Option<Point>,
}

impl PointerFilter {
    pub fn new(sensitivity: f32, smoothing: f32) -> Self {
        Self {
            sensitivity,
            smoothing,
            last: None,
        }
    }

    pub fn apply(&mut self, raw: Point) -> Point {
        let scaled = if self.sensitivity == 1.0 {
            raw
        } else {
            let center = Point::from_valid(0.5, 0.5);
            (center + (raw - center) * self.sensitivity).clamped_unit()
        };
        let filtered = match self.last {
            Some(last) if self.smoothing > 0.0 => {
                last * self.smoothing + scaled * (1.0 - self.smoothing)
            }
            _ => scaled,
        };
        self.last = Some(filtered);
        filtered
    }

    /// Forget history so the next sample is published as is.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
