//! Hand gesture pointer control.
//!
//! Turns a stream of 21-point hand landmarks into a discrete gesture per
//! frame, a smoothed pointer, click/double-click/dwell-click events and
//! gesture driven zoom, pan and drag.

pub mod click;
pub mod config;
pub mod constants;
pub mod dwell;
pub mod error;
pub mod fps;
pub mod geometry;
pub mod gesture;
pub mod landmark;
pub mod point;
pub mod pointer;
pub mod session;
pub mod source;
pub mod transform;

pub use crate::{
    config::Config,
    error::Error,
    gesture::{classify, Gesture},
    landmark::{HandPose, Landmark},
    point::Point,
    session::{Event, Snapshot, TrackingSession},
    source::{Frame, FrameSource},
};
