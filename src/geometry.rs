//! Distance and finger-extension tests over a single hand pose.
//!
//! Everything here works in the image plane.

use crate::{
    constants::{FINGER_EXTENSION_RATIO, PINCH_DISTANCE, THUMB_EXTENSION_DISTANCE},
    landmark::{HandPose, LandmarkKind},
    point::Point,
};
use serde::Serialize;

pub fn distance(a: Point, b: Point) -> f32 {
    a.distance(b)
}

pub fn is_finger_extended(pose: &HandPose, tip: LandmarkKind, pip: LandmarkKind) -> bool {
    let wrist = pose[LandmarkKind::Wrist];
    distance(pose[tip], wrist) > distance(pose[pip], wrist) * FINGER_EXTENSION_RATIO
}

/// Measured against the index knuckle, not the wrist.
pub fn is_thumb_extended(pose: &HandPose) -> bool {
    distance(pose[LandmarkKind::ThumbTip], pose[LandmarkKind::IndexMcp]) > THUMB_EXTENSION_DISTANCE
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Pinch {
    pub is_pinching: bool,
    pub distance: f32,
}

pub fn detect_pinch(pose: &HandPose) -> Pinch {
    let distance = distance(pose[LandmarkKind::ThumbTip], pose[LandmarkKind::IndexTip]);
    Pinch {
        is_pinching: distance < PINCH_DISTANCE,
        distance,
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct FingerStates {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStates {
    pub fn of(pose: &HandPose) -> Self {
        use LandmarkKind::*;

        Self {
            thumb: is_thumb_extended(pose),
            index: is_finger_extended(pose, IndexTip, IndexPip),
            middle: is_finger_extended(pose, MiddleTip, MiddlePip),
            ring: is_finger_extended(pose, RingTip, RingPip),
            pinky: is_finger_extended(pose, PinkyTip, PinkyPip),
        }
    }

    /// Number of extended fingers, not counting the thumb.
    pub fn extended_count(&self) -> usize {
        [self.index, self.middle, self.ring, self.pinky]
            .iter()
            .filter(|&&extended| extended)
            .count()
    }
}
