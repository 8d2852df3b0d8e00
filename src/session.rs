//! Per-frame interaction state machine.
//!
//! A [`TrackingSession`] owns everything that changes over time: the
//! published pointer, the click register, dwell and hold timers and the
//! zoom/pan transform. Frames are fed in one at a time together with their
//! timestamp; the session never reads a clock of its own.

use crate::{
    click::{ClickKind, ClickRegister},
    config::Config,
    constants::ZOOM_HOLD,
    dwell::DwellTracker,
    fps::FpsCounter,
    geometry::{detect_pinch, Pinch},
    gesture::{classify_pose, Gesture},
    landmark::{HandPose, Landmark},
    point::Point,
    pointer::{pointer_position, PointerFilter},
    source::Frame,
    transform::Transform,
};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, trace};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Ask for AI detection of whatever is under the pointer.
    Detect,
    /// Ask for a full analysis of the current image.
    Analyze,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    GestureChanged { from: Gesture, to: Gesture },
    Click { kind: ClickKind, at: Point },
    DwellProgress { progress: f32 },
    DwellFired { at: Point },
    DragStarted { at: Point },
    DragEnded,
    Zoomed { zoom: f32 },
    Action { action: Action, at: Point },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    HandPresent,
    Dragging,
}

/// Everything a consumer may poll after a frame.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub gesture: Gesture,
    pub hand_detected: bool,
    pub pointer: Option<Point>,
    pub is_pinching: bool,
    pub pinch_distance: f32,
    pub zoom: f32,
    pub pan: Point,
    pub is_dragging: bool,
    pub dwell_progress: f32,
    pub fps: u32,
}

pub struct TrackingSession {
    config: Config,
    filter: PointerFilter,
    clicks: ClickRegister,
    dwell: DwellTracker,
    transform: Transform,
    fps: FpsCounter,
    gesture: Gesture,
    gesture_since: Duration,
    pointer: Option<Point>,
    pinch: Option<Pinch>,
    dwell_progress: f32,
}

impl Default for TrackingSession {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl TrackingSession {
    pub fn new(config: Config) -> Self {
        let config = config.clamped();
        Self {
            config,
            filter: PointerFilter::new(config.pointer_sensitivity, config.pointer_smoothing),
            clicks: ClickRegister::default(),
            dwell: DwellTracker::new(config.dwell_click_delay()),
            transform: Transform::default(),
            fps: FpsCounter::default(),
            gesture: Gesture::None,
            gesture_since: Duration::default(),
            pointer: None,
            pinch: None,
            dwell_progress: 0.0,
        }
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// Swap in new preferences. Pointer history and a dwell in progress are
    /// dropped since their meaning depends on the old values.
    pub fn set_config(&mut self, config: Config) {
        let config = config.clamped();
        self.config = config;
        self.filter = PointerFilter::new(config.pointer_sensitivity, config.pointer_smoothing);
        self.dwell = DwellTracker::new(config.dwell_click_delay());
        self.dwell_progress = 0.0;
    }

    pub fn process_frame(&mut self, frame: &Frame) -> Vec<Event> {
        self.process(frame.hand(), frame.timestamp())
    }

    /// Advance by one frame. `hand` is the tracker's landmarks for the first
    /// detected hand, if any.
    #[instrument(level = "trace", skip(self, hand))]
    pub fn process(&mut self, hand: Option<&[Landmark]>, now: Duration) -> Vec<Event> {
        let mut events = Vec::new();
        self.fps.tick(now);

        let pose = hand.and_then(|landmarks| match HandPose::from_landmarks(landmarks) {
            Ok(pose) => Some(pose),
            Err(e) => {
                debug!(error = %e, "treating invalid hand pose as no hand");
                None
            }
        });

        match pose {
            Some(pose) => self.track(&pose, now, &mut events),
            None => self.lose_hand(now, &mut events),
        }
        events
    }

    fn track(&mut self, pose: &HandPose, now: Duration, events: &mut Vec<Event>) {
        let gesture = classify_pose(pose);
        // dwell and drag follow the hand itself, the filter only shapes what is published
        let raw = pointer_position(pose, gesture);
        let position = self.filter.apply(raw);
        self.pointer = Some(position);
        self.pinch = Some(detect_pinch(pose));

        self.update_dwell(gesture, raw, position, now, events);

        let previous = self.gesture;
        if gesture != previous {
            debug!(from = %previous, to = %gesture, "gesture changed");
            events.push(Event::GestureChanged {
                from: previous,
                to: gesture,
            });
            self.leave(previous, now, events);
            self.enter(gesture, raw, position, now, events);
            self.gesture = gesture;
            self.gesture_since = now;
        } else if gesture == Gesture::Peace && self.transform.is_dragging() {
            self.transform.update_drag(raw);
            trace!(pan = ?self.transform.pan(), "drag update");
        }
    }

    fn lose_hand(&mut self, now: Duration, events: &mut Vec<Event>) {
        self.pointer = None;
        self.pinch = None;
        self.filter.reset();
        self.dwell.cancel();
        self.set_dwell_progress(0.0, events);

        if self.transform.is_dragging() {
            self.transform.end_drag();
            events.push(Event::DragEnded);
        }

        // hold timers are dropped without firing: losing the hand is not a release
        if self.gesture != Gesture::None {
            debug!(from = %self.gesture, "hand lost");
            events.push(Event::GestureChanged {
                from: self.gesture,
                to: Gesture::None,
            });
            self.gesture = Gesture::None;
            self.gesture_since = now;
        }
    }

    fn update_dwell(
        &mut self,
        gesture: Gesture,
        raw: Point,
        position: Point,
        now: Duration,
        events: &mut Vec<Event>,
    ) {
        if !(self.config.dwell_click_enabled && gesture == Gesture::Point) {
            self.dwell.cancel();
            self.set_dwell_progress(0.0, events);
            return;
        }

        let step = self.dwell.update(raw, now);
        self.set_dwell_progress(step.progress, events);
        if step.fired {
            debug!(?position, "dwell click");
            events.push(Event::DwellFired { at: position });
            self.click(position, now, events);
        }
    }

    fn set_dwell_progress(&mut self, progress: f32, events: &mut Vec<Event>) {
        if (progress - self.dwell_progress).abs() > f32::EPSILON {
            events.push(Event::DwellProgress { progress });
        }
        self.dwell_progress = progress;
    }

    fn leave(&mut self, previous: Gesture, now: Duration, events: &mut Vec<Event>) {
        let held = now.checked_sub(self.gesture_since).unwrap_or_default();
        match previous {
            Gesture::Peace => {
                if self.transform.is_dragging() {
                    self.transform.end_drag();
                    events.push(Event::DragEnded);
                }
            }
            Gesture::Fist if held >= ZOOM_HOLD => {
                self.transform.zoom_in();
                debug!(zoom = self.transform.zoom(), "zoom in");
                events.push(Event::Zoomed {
                    zoom: self.transform.zoom(),
                });
            }
            Gesture::Open if held >= ZOOM_HOLD => {
                self.transform.zoom_out();
                debug!(zoom = self.transform.zoom(), "zoom out");
                events.push(Event::Zoomed {
                    zoom: self.transform.zoom(),
                });
            }
            Gesture::Fist
            | Gesture::Open
            | Gesture::None
            | Gesture::Point
            | Gesture::Pinch
            | Gesture::ThumbsUp
            | Gesture::ThreeFingers => {}
        }
    }

    fn enter(
        &mut self,
        next: Gesture,
        raw: Point,
        position: Point,
        now: Duration,
        events: &mut Vec<Event>,
    ) {
        match next {
            Gesture::Pinch => self.click(position, now, events),
            Gesture::Peace => {
                self.transform.start_drag(raw);
                events.push(Event::DragStarted { at: position });
            }
            Gesture::ThumbsUp => events.push(Event::Action {
                action: Action::Detect,
                at: position,
            }),
            Gesture::ThreeFingers => events.push(Event::Action {
                action: Action::Analyze,
                at: position,
            }),
            Gesture::None | Gesture::Point | Gesture::Fist | Gesture::Open => {}
        }
    }

    fn click(&mut self, at: Point, now: Duration, events: &mut Vec<Event>) {
        let kind = self.clicks.register(now);
        debug!(?kind, ?at, "click");
        events.push(Event::Click { kind, at });
    }

    pub fn phase(&self) -> Phase {
        match (self.pointer, self.transform.is_dragging()) {
            (None, _) => Phase::Idle,
            (Some(_), true) => Phase::Dragging,
            (Some(_), false) => Phase::HandPresent,
        }
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Direct access for keyboard and UI driven zoom/pan.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase(),
            gesture: self.gesture,
            hand_detected: self.pointer.is_some(),
            pointer: self.pointer,
            is_pinching: self.gesture == Gesture::Pinch,
            pinch_distance: self.pinch.map_or(0.0, |pinch| pinch.distance),
            zoom: self.transform.zoom(),
            pan: self.transform.pan(),
            is_dragging: self.transform.is_dragging(),
            dwell_progress: self.dwell_progress,
            fps: self.fps.fps(),
        }
    }

    pub fn reset_transform(&mut self) {
        self.transform.reset();
    }

    /// Return to a fresh session, keeping preferences. Called on explicit
    /// reset and whenever a new image is loaded.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }
}
