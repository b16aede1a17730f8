//! # hand_gesture
//!
//! Turns raw per-frame hand-skeleton landmark data into debounced discrete
//! gesture events.
//!
//! ## Gesture → event mapping
//!
//! | Gesture | Metric | Event |
//! |---|---|---|
//! | Pinch (thumb tip meets index tip) | planar tip distance < threshold | `pinch_click` on the closing tick |
//! | Fist (four fingertips curled) | Σ tip-to-PIP distance < threshold | `fist_strike` on the closing tick |
//!
//! Both events are edge-triggered per hand: one lock per gesture per hand id
//! suppresses repeats until the gesture releases.  Raw `pinching` / `fist`
//! booleans and the cursor position are reported every tick regardless.
//!
//! The crate is pure geometry plus the lock tables — no capture, no drawing,
//! no timing.  Feed it [`HandFrame`]s, get [`CursorEvent`]s.

pub mod classifier;
pub mod landmarks;

pub use classifier::{
    CursorEvent, GestureClassifier, DEFAULT_FIST_THRESHOLD, DEFAULT_PINCH_THRESHOLD,
};
pub use landmarks::{HandFrame, Point, LANDMARK_COUNT};
