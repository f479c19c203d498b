//! Multi-touch gesture recognition.
//!
//! A [`TouchTracker`] is stepped once per host frame with the currently active touch points
//! and answers polling queries about taps, pinches and two-finger pans for that frame.

pub mod config;
pub mod error;
pub mod gesture;
pub mod source;
pub mod trace;
pub mod tracker;
mod utils;

pub use config::{PinchCenter, TrackerConfig};
pub use error::{Error, Result};
pub use gesture::{Pinch, Tap, TouchId, TwoFingerPan};
pub use source::{ActiveTouch, TouchFrame, TouchSource};
pub use trace::TouchTrace;
pub use tracker::{GestureSnapshot, TouchTracker};
