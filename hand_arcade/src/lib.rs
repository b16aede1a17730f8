//! # hand_arcade
//!
//! Gesture-controlled "defend the center" arcade game.  Enemies march from
//! the frame edges toward a base at the center; pinch to pop the basic
//! ones, make a fist to smash the rest, and keep your best scores per
//! difficulty under a named account.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Meaning |
//! |---|---|
//! | Pinch (thumb + index together) | Click: presses UI buttons, destroys basic enemies |
//! | Fist (four fingers curled) | Strike: destroys special and boss enemies |
//! | Open hand | Cursor only — hover highlights, nothing fires |
//!
//! Both gestures are edge-triggered per hand: holding a pinch produces one
//! click, not one per frame.
//!
//! ## Screens
//!
//! Login → Menu → {Difficulty → Playing ⇄ Paused → GameOver, Records}.
//! Account management hangs off Records: SwitchUser, AddUser →
//! ConfirmAction, DeleteUser → ConfirmDelete.  One handler per screen
//! behind the [`screens::Screen`] trait; all shared state rides in
//! [`screens::Context`].
//!
//! ## Simulation input
//!
//! Without camera hardware the window pointer drives a synthetic
//! 21-landmark hand ([`perception::SimHandSource`]):
//!
//! | Input | Pose |
//! |---|---|
//! | Mouse move | Hand follows the cursor |
//! | Left button / `Z` | Pinch |
//! | Right button / `X` | Fist |
//! | `Escape` | Quit |

pub mod app;
pub mod config;
pub mod icons;
pub mod perception;
pub mod screens;
pub mod sim;
pub mod surface;
pub mod ui;
