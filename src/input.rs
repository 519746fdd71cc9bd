//! The three producers that drive the flashlight.
//!
//! The switch needs no translation: its toggle value is passed straight through. Text and
//! gestures need some work first, and that lives in the submodules.

pub mod gesture;
pub mod text;

pub use gesture::{evaluate_fling, Fling, FlingDetector, Gesture, GestureOutcome, TouchPoint};
pub use text::{parse_command, TextField};
