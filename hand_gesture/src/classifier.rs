//! Gesture classification — debounced pinch clicks and fist strikes.
//!
//! The classifier is a pure per-hand-per-frame function with one piece of
//! persistent state: a lock table per gesture kind, keyed by the
//! perception-assigned hand id.  A click fires only on the transition frame
//! where the gesture becomes active while the lock is clear; the lock then
//! stays set until the gesture releases.  Strictly edge-triggered — at most
//! one event per continuous hold, however many ticks the hold lasts.
//!
//! # Identifier-reuse caveat
//!
//! If a hand vanishes mid-pinch its lock is never cleared.  Should the
//! perception layer later reuse that id for a different physical hand, the
//! new hand's first pinch is silently swallowed (the lock is already set and
//! releases only when that hand opens).  This is a known limitation of
//! keying on ephemeral ids; `reset()` clears both tables and is called at
//! session start.

use std::collections::HashMap;

use crate::landmarks::{HandFrame, Point, FINGER_TIP_PIP};

// ════════════════════════════════════════════════════════════════════════════
// CursorEvent
// ════════════════════════════════════════════════════════════════════════════

/// Everything derived from one hand in one tick.
///
/// `pos` (thumb/index midpoint) is where hover and pinch clicks happen;
/// `palm` (middle-finger MCP) is where fist strikes land.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorEvent {
    pub hand_id: u32,
    /// Cursor position — midpoint of thumb and index fingertips.
    pub pos: Point,
    /// Palm anchor — fist-strike position.
    pub palm: Point,
    /// Thumb-tip / index-tip endpoints, for drawing the pinch span.
    pub pinch_span: (Point, Point),
    /// Raw state: pinch metric below threshold this tick.
    pub pinching: bool,
    /// Raw state: fist metric below threshold this tick.
    pub fist: bool,
    /// Edge-triggered: fires on the tick the pinch closes, once per hold.
    pub pinch_click: bool,
    /// Edge-triggered: fires on the tick the fist closes, once per hold.
    pub fist_strike: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// GestureClassifier
// ════════════════════════════════════════════════════════════════════════════

/// Default pinch threshold in frame pixels (thumb-tip to index-tip).
pub const DEFAULT_PINCH_THRESHOLD: f32 = 40.0;

/// Default fist threshold in frame pixels (sum of four tip-to-PIP distances).
pub const DEFAULT_FIST_THRESHOLD: f32 = 240.0;

pub struct GestureClassifier {
    pub pinch_threshold: f32,
    pub fist_threshold: f32,
    /// Frame dimensions used to clamp derived positions.
    frame_w: f32,
    frame_h: f32,
    pinch_locks: HashMap<u32, bool>,
    fist_locks: HashMap<u32, bool>,
}

impl GestureClassifier {
    pub fn new(frame_w: f32, frame_h: f32) -> Self {
        GestureClassifier {
            pinch_threshold: DEFAULT_PINCH_THRESHOLD,
            fist_threshold: DEFAULT_FIST_THRESHOLD,
            frame_w,
            frame_h,
            pinch_locks: HashMap::new(),
            fist_locks: HashMap::new(),
        }
    }

    pub fn with_thresholds(mut self, pinch: f32, fist: f32) -> Self {
        self.pinch_threshold = pinch;
        self.fist_threshold = fist;
        self
    }

    /// Clear both lock tables.  Called at session start; this is also the
    /// only remedy for locks stranded by vanished hands.
    pub fn reset(&mut self) {
        self.pinch_locks.clear();
        self.fist_locks.clear();
    }

    /// Classify one hand for one tick.
    ///
    /// The only side effect is the per-hand lock table update.
    pub fn classify(&mut self, hand: &HandFrame) -> CursorEvent {
        let thumb = hand.thumb_tip();
        let index = hand.index_tip();

        // ── pinch ─────────────────────────────────────────────────────────
        let pinch_metric = thumb.dist(index);
        let pinching = pinch_metric < self.pinch_threshold;
        let pinch_click = Self::edge(&mut self.pinch_locks, hand.id, pinching);

        // ── fist ──────────────────────────────────────────────────────────
        let fist_metric: f32 = FINGER_TIP_PIP
            .iter()
            .map(|&(tip, pip)| hand.points[tip].dist(hand.points[pip]))
            .sum();
        let fist = fist_metric < self.fist_threshold;
        let fist_strike = Self::edge(&mut self.fist_locks, hand.id, fist);

        CursorEvent {
            hand_id: hand.id,
            pos: thumb.midpoint(index).clamp_to(self.frame_w, self.frame_h),
            palm: hand.palm().clamp_to(self.frame_w, self.frame_h),
            pinch_span: (thumb, index),
            pinching,
            fist,
            pinch_click,
            fist_strike,
        }
    }

    /// Edge-trigger against one lock table: true exactly when `active`
    /// transitions in while the lock is clear.
    fn edge(locks: &mut HashMap<u32, bool>, id: u32, active: bool) -> bool {
        let locked = locks.entry(id).or_insert(false);
        if active {
            if *locked {
                false
            } else {
                *locked = true;
                true
            }
        } else {
            *locked = false;
            false
        }
    }

    /// Number of hand ids currently tracked (both tables share keys).
    pub fn tracked_hands(&self) -> usize {
        self.pinch_locks.len()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{
        INDEX_PIP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_MCP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP,
        PINKY_TIP, RING_PIP, RING_TIP, THUMB_TIP,
    };

    const W: f32 = 1280.0;
    const H: f32 = 720.0;

    /// Open hand at (cx, cy): wide pinch span, extended fingers.
    fn open_hand(id: u32, cx: f32, cy: f32) -> HandFrame {
        let mut pts = [Point::new(cx, cy); LANDMARK_COUNT];
        pts[THUMB_TIP] = Point::new(cx - 60.0, cy);
        pts[INDEX_TIP] = Point::new(cx + 60.0, cy);
        // Fingers extended: each tip 100px from its PIP
        for &(tip, pip) in &FINGER_TIP_PIP {
            pts[pip] = Point::new(cx, cy + 20.0);
            pts[tip] = Point::new(cx, cy - 80.0);
        }
        pts[INDEX_TIP] = Point::new(cx + 60.0, cy); // keep pinch span wide
        pts[MIDDLE_MCP] = Point::new(cx, cy + 40.0);
        HandFrame::new(id, pts)
    }

    /// Same hand with thumb and index tips brought together.
    fn pinched_hand(id: u32, cx: f32, cy: f32) -> HandFrame {
        let mut h = open_hand(id, cx, cy);
        h.points[THUMB_TIP] = Point::new(cx - 5.0, cy);
        h.points[INDEX_TIP] = Point::new(cx + 5.0, cy);
        h
    }

    /// Same hand with all four fingertips curled onto their PIP joints.
    fn fist_hand(id: u32, cx: f32, cy: f32) -> HandFrame {
        let mut h = open_hand(id, cx, cy);
        for &(tip, pip) in &FINGER_TIP_PIP {
            h.points[tip] = h.points[pip];
        }
        h
    }

    #[test]
    fn click_fires_on_transition_only() {
        let mut cls = GestureClassifier::new(W, H);
        assert!(!cls.classify(&open_hand(0, 400.0, 300.0)).pinch_click);
        assert!(cls.classify(&pinched_hand(0, 400.0, 300.0)).pinch_click);
        // Held closed: no repeats
        for _ in 0..10 {
            assert!(!cls.classify(&pinched_hand(0, 400.0, 300.0)).pinch_click);
        }
    }

    #[test]
    fn release_rearms_the_click() {
        let mut cls = GestureClassifier::new(W, H);
        assert!(cls.classify(&pinched_hand(0, 400.0, 300.0)).pinch_click);
        assert!(!cls.classify(&open_hand(0, 400.0, 300.0)).pinch_click);
        assert!(cls.classify(&pinched_hand(0, 400.0, 300.0)).pinch_click);
    }

    #[test]
    fn n_subthreshold_ticks_yield_exactly_one_click() {
        let mut cls = GestureClassifier::new(W, H);
        cls.classify(&open_hand(0, 400.0, 300.0));
        let clicks = (0..25)
            .filter(|_| cls.classify(&pinched_hand(0, 400.0, 300.0)).pinch_click)
            .count();
        assert_eq!(clicks, 1);
    }

    #[test]
    fn first_frame_pinch_fires_without_prior_open_frame() {
        // A brand-new id with no table entry behaves as unlocked.
        let mut cls = GestureClassifier::new(W, H);
        assert!(cls.classify(&pinched_hand(7, 400.0, 300.0)).pinch_click);
    }

    #[test]
    fn fist_lock_is_independent_of_pinch_lock() {
        let mut cls = GestureClassifier::new(W, H);
        let ev = cls.classify(&fist_hand(0, 400.0, 300.0));
        assert!(ev.fist_strike);
        assert!(!ev.pinch_click);
        // A pinch afterwards still fires even though the fist lock is held
        // (fist_hand keeps the pinch span wide, so the pinch lock is clear).
        let ev = cls.classify(&pinched_hand(0, 400.0, 300.0));
        assert!(ev.pinch_click);
    }

    #[test]
    fn hands_have_independent_locks() {
        let mut cls = GestureClassifier::new(W, H);
        assert!(cls.classify(&pinched_hand(0, 300.0, 300.0)).pinch_click);
        assert!(cls.classify(&pinched_hand(1, 600.0, 300.0)).pinch_click);
        assert!(!cls.classify(&pinched_hand(0, 300.0, 300.0)).pinch_click);
    }

    #[test]
    fn reused_id_swallows_first_pinch_while_lock_stale() {
        // Documented failure mode: hand 0 vanishes mid-pinch, a new hand
        // reuses id 0 — its first pinch is eaten by the stale lock.
        let mut cls = GestureClassifier::new(W, H);
        assert!(cls.classify(&pinched_hand(0, 300.0, 300.0)).pinch_click);
        // hand vanishes here (no classify calls), lock remains set
        assert!(!cls.classify(&pinched_hand(0, 900.0, 500.0)).pinch_click);
        // reset() is the remedy
        cls.reset();
        assert!(cls.classify(&pinched_hand(0, 900.0, 500.0)).pinch_click);
    }

    #[test]
    fn cursor_is_thumb_index_midpoint() {
        let mut cls = GestureClassifier::new(W, H);
        let ev = cls.classify(&open_hand(0, 400.0, 300.0));
        assert_eq!(ev.pos, Point::new(400.0, 300.0));
        assert_eq!(ev.palm, Point::new(400.0, 340.0));
    }

    #[test]
    fn cursor_is_clamped_to_frame_bounds() {
        let mut cls = GestureClassifier::new(W, H);
        let ev = cls.classify(&open_hand(0, -200.0, 900.0));
        assert!(ev.pos.x >= 0.0 && ev.pos.y <= H - 1.0);
    }

    #[test]
    fn raw_booleans_track_state_every_tick() {
        let mut cls = GestureClassifier::new(W, H);
        for _ in 0..3 {
            let ev = cls.classify(&pinched_hand(0, 400.0, 300.0));
            assert!(ev.pinching);
        }
        assert!(!cls.classify(&open_hand(0, 400.0, 300.0)).pinching);
    }
}
