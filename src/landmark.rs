use crate::{error::Error, point::Point};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Anatomical index of a tracked hand landmark, in tracker output order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LandmarkKind {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

pub const NUM_LANDMARKS: usize = 21;

impl LandmarkKind {
    /// Every kind, in tracker output order.
    pub const ALL: [Self; NUM_LANDMARKS] = [
        Self::Wrist,
        Self::ThumbCmc,
        Self::ThumbMcp,
        Self::ThumbIp,
        Self::ThumbTip,
        Self::IndexMcp,
        Self::IndexPip,
        Self::IndexDip,
        Self::IndexTip,
        Self::MiddleMcp,
        Self::MiddlePip,
        Self::MiddleDip,
        Self::MiddleTip,
        Self::RingMcp,
        Self::RingPip,
        Self::RingDip,
        Self::RingTip,
        Self::PinkyMcp,
        Self::PinkyPip,
        Self::PinkyDip,
        Self::PinkyTip,
    ];
}

/// One raw landmark as delivered by the hand tracker.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
}

/// A validated 21-landmark hand, projected onto the image plane.
///
/// Depth is dropped here: nothing downstream classifies on `z`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandPose {
    points: [Point; NUM_LANDMARKS],
}

impl HandPose {
    /// Build a pose from raw tracker output.
    ///
    /// Fewer than [`NUM_LANDMARKS`] entries or a NaN coordinate is an error;
    /// extra trailing entries are ignored.
    pub fn from_landmarks(landmarks: &[Landmark]) -> Result<Self, Error> {
        if landmarks.len() < NUM_LANDMARKS {
            return Err(Error::ShortPose {
                expected: NUM_LANDMARKS,
                got: landmarks.len(),
            });
        }

        let mut points = [Point::origin(); NUM_LANDMARKS];
        let kinds = LandmarkKind::ALL.iter().copied();
        for ((slot, kind), landmark) in points.iter_mut().zip(kinds).zip(landmarks) {
            *slot = Point::new(landmark.x, landmark.y)
                .map_err(|e| Error::NanLandmark(kind, Box::new(e)))?;
        }

        Ok(Self { points })
    }

    pub fn point(&self, kind: LandmarkKind) -> Point {
        self.points[kind as usize]
    }
}

impl Index<LandmarkKind> for HandPose {
    type Output = Point;

    fn index(&self, kind: LandmarkKind) -> &Self::Output {
        &self.points[kind as usize]
    }
}

/// Synthetic hands with chosen finger states, shared by the unit tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use super::{Landmark, LandmarkKind::*, NUM_LANDMARKS};

    const FINGER_X: [f32; 4] = [0.45, 0.5, 0.55, 0.6];

    fn at(x: f32, y: f32) -> Landmark {
        Landmark {
            x,
            y,
            z: 0.0,
            visibility: None,
        }
    }

    /// `fingers` is index, middle, ring, pinky.
    pub(crate) fn hand(thumb: bool, fingers: [bool; 4]) -> Vec<Landmark> {
        let mut landmarks = vec![at(0.0, 0.0); NUM_LANDMARKS];
        landmarks[Wrist as usize] = at(0.5, 0.8);
        landmarks[ThumbCmc as usize] = at(0.42, 0.75);
        landmarks[ThumbMcp as usize] = at(0.36, 0.7);
        if thumb {
            landmarks[ThumbIp as usize] = at(0.3, 0.62);
            landmarks[ThumbTip as usize] = at(0.25, 0.55);
        } else {
            landmarks[ThumbIp as usize] = at(0.45, 0.68);
            landmarks[ThumbTip as usize] = at(0.52, 0.66);
        }

        for (finger, (&x, &extended)) in FINGER_X.iter().zip(fingers.iter()).enumerate() {
            let mcp = IndexMcp as usize + finger * 4;
            landmarks[mcp] = at(x, 0.6);
            landmarks[mcp + 1] = at(x, 0.5);
            if extended {
                landmarks[mcp + 2] = at(x, 0.42);
                landmarks[mcp + 3] = at(x, 0.35);
            } else {
                landmarks[mcp + 2] = at(x, 0.58);
                landmarks[mcp + 3] = at(x, 0.68);
            }
        }
        landmarks
    }

    pub(crate) fn fist() -> Vec<Landmark> {
        hand(false, [false; 4])
    }

    pub(crate) fn open() -> Vec<Landmark> {
        hand(true, [true; 4])
    }

    pub(crate) fn thumbs_up() -> Vec<Landmark> {
        hand(true, [false; 4])
    }

    pub(crate) fn point() -> Vec<Landmark> {
        hand(false, [true, false, false, false])
    }

    pub(crate) fn peace() -> Vec<Landmark> {
        hand(false, [true, true, false, false])
    }

    pub(crate) fn three_fingers() -> Vec<Landmark> {
        hand(false, [true, true, true, false])
    }

    /// Thumb tip brought to within 0.02 of the extended index tip.
    pub(crate) fn pinch() -> Vec<Landmark> {
        let mut landmarks = point();
        let index_tip = landmarks[IndexTip as usize];
        landmarks[ThumbTip as usize] = at(index_tip.x + 0.02, index_tip.y);
        landmarks
    }

    pub(crate) fn shifted(mut landmarks: Vec<Landmark>, dx: f32, dy: f32) -> Vec<Landmark> {
        for landmark in &mut landmarks {
            landmark.x += dx;
            landmark.y += dy;
        }
        landmarks
    }
}
