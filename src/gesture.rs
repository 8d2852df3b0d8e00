use crate::{
    geometry::{detect_pinch, FingerStates},
    landmark::{HandPose, Landmark},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of hand gestures, one per frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Gesture {
    None,
    Point,
    Pinch,
    Fist,
    Open,
    Peace,
    ThumbsUp,
    ThreeFingers,
}

/// What a gesture asks the application to do.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    Idle,
    MovePointer,
    Select,
    ZoomIn,
    ZoomOut,
    Rotate,
    Detect,
    Analyze,
}

impl Gesture {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Point => "point",
            Self::Pinch => "pinch",
            Self::Fist => "fist",
            Self::Open => "open",
            Self::Peace => "peace",
            Self::ThumbsUp => "thumbsUp",
            Self::ThreeFingers => "threeFingers",
        }
    }

    /// Short human readable label for overlays.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Show hand",
            Self::Point => "Point",
            Self::Pinch => "Select",
            Self::Fist => "Fist",
            Self::Open => "Open",
            Self::Peace => "Rotate 360°",
            Self::ThumbsUp => "Thumbs Up",
            Self::ThreeFingers => "3 Fingers",
        }
    }

    pub fn command(self) -> Command {
        match self {
            Self::None => Command::Idle,
            Self::Point => Command::MovePointer,
            Self::Pinch => Command::Select,
            Self::Fist => Command::ZoomIn,
            Self::Open => Command::ZoomOut,
            Self::Peace => Command::Rotate,
            Self::ThumbsUp => Command::Detect,
            Self::ThreeFingers => Command::Analyze,
        }
    }
}

impl Default for Gesture {
    fn default() -> Self {
        Self::None
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify raw tracker output. Anything that is not a valid pose is `None`.
pub fn classify(landmarks: &[Landmark]) -> Gesture {
    HandPose::from_landmarks(landmarks)
        .map(|pose| classify_pose(&pose))
        .unwrap_or(Gesture::None)
}

/// First matching rule wins; the order is the tie-break between poses that
/// satisfy more than one rule.
pub fn classify_pose(pose: &HandPose) -> Gesture {
    if detect_pinch(pose).is_pinching {
        return Gesture::Pinch;
    }

    let fingers = FingerStates::of(pose);
    let extended = fingers.extended_count();

    if fingers.thumb && extended == 0 {
        Gesture::ThumbsUp
    } else if extended == 0 && !fingers.thumb {
        Gesture::Fist
    } else if extended == 4 && fingers.thumb {
        Gesture::Open
    } else if fingers.index && fingers.middle && fingers.ring && !fingers.pinky {
        Gesture::ThreeFingers
    } else if fingers.index && fingers.middle && !fingers.ring && !fingers.pinky {
        Gesture::Peace
    } else if fingers.index && !fingers.middle && !fingers.ring && !fingers.pinky {
        Gesture::Point
    } else {
        Gesture::None
    }
}
