//! Perception seam — where hand frames come from.
//!
//! The game consumes [`HandSource`]: zero or more hands per tick, each with
//! a tick-stable id and 21 landmark positions in already-mirrored frame
//! pixels.  Camera acquisition and landmark estimation live behind this
//! trait; the default implementation is [`SimHandSource`], which synthesizes
//! a full 21-point hand from window pointer samples so the real classifier
//! runs end to end without any camera hardware.

use std::fmt;
use std::sync::mpsc::{Receiver, TryRecvError};

use hand_gesture::landmarks::{
    HandFrame, Point, FINGER_TIP_PIP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_MCP, THUMB_TIP, WRIST,
};

// ════════════════════════════════════════════════════════════════════════════
// CaptureError
// ════════════════════════════════════════════════════════════════════════════

/// Frame acquisition failed.  Fatal to the tick loop: the loop terminates
/// cleanly without attempting a partial render.
#[derive(Debug)]
pub enum CaptureError {
    /// The frame producer went away (camera unplugged, window input channel
    /// closed).
    Disconnected,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Disconnected => write!(f, "hand frame source disconnected"),
        }
    }
}

impl std::error::Error for CaptureError {}

// ════════════════════════════════════════════════════════════════════════════
// HandSource trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver hand frames, one batch per tick.
pub trait HandSource {
    /// Absence of hands is normal and returns an empty vec, not an error.
    fn next_frame(&mut self) -> Result<Vec<HandFrame>, CaptureError>;
}

// ════════════════════════════════════════════════════════════════════════════
// PointerSample — raw input from the window
// ════════════════════════════════════════════════════════════════════════════

/// One pointer observation from the window, sent over an `mpsc` channel to
/// the sim source each tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    /// Left mouse button or `Z` held — pose the synthetic hand as a pinch.
    pub pinch: bool,
    /// Right mouse button or `X` held — pose the synthetic hand as a fist.
    pub fist: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// SimHandSource
// ════════════════════════════════════════════════════════════════════════════

/// Hand source driven by [`PointerSample`]s from the window.
///
/// One synthetic hand (id 0) follows the pointer.  The pose is a genuine
/// 21-landmark skeleton: open by default, thumb/index tips brought together
/// when `pinch` is held, all four non-thumb tips curled onto their PIP
/// joints when `fist` is held — so thresholds and edge-triggering in
/// `hand_gesture` are exercised exactly as with a real hand.
pub struct SimHandSource {
    rx: Receiver<PointerSample>,
    last: Option<PointerSample>,
}

impl SimHandSource {
    pub fn new(rx: Receiver<PointerSample>) -> Self {
        SimHandSource { rx, last: None }
    }
}

impl HandSource for SimHandSource {
    fn next_frame(&mut self) -> Result<Vec<HandFrame>, CaptureError> {
        loop {
            match self.rx.try_recv() {
                Ok(sample) => self.last = Some(sample),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Err(CaptureError::Disconnected),
            }
        }
        Ok(match self.last {
            Some(sample) => vec![synth_hand(0, sample)],
            None => Vec::new(),
        })
    }
}

/// Build a synthetic 21-point hand centered on the pointer.
fn synth_hand(id: u32, s: PointerSample) -> HandFrame {
    let c = Point::new(s.x, s.y);
    let mut pts = [c; LANDMARK_COUNT];

    pts[WRIST] = Point::new(c.x, c.y + 90.0);
    pts[MIDDLE_MCP] = Point::new(c.x, c.y + 30.0);

    // Thumb/index pinch span: 80 px open, 12 px pinched.
    let half = if s.pinch { 6.0 } else { 40.0 };
    pts[THUMB_TIP] = Point::new(c.x - half, c.y);
    pts[INDEX_TIP] = Point::new(c.x + half, c.y);

    // Four fingers fanned out; each tip 80 px above its PIP when open,
    // folded onto the PIP when the fist is held.
    for (i, &(tip, pip)) in FINGER_TIP_PIP.iter().enumerate() {
        let fx = c.x + (i as f32 - 1.5) * 18.0;
        pts[pip] = Point::new(fx, c.y + 15.0);
        pts[tip] = if s.fist {
            pts[pip]
        } else {
            Point::new(fx, c.y - 65.0)
        };
    }
    // The pinch pose overrides the index fan position so the span stays
    // authoritative for the pinch metric.
    pts[INDEX_TIP] = Point::new(c.x + half, c.y);

    HandFrame::new(id, pts)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
