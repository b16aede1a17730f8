//! Hand-skeleton landmark model.
//!
//! A [`HandFrame`] is one hand for one tick: a perception-assigned identifier
//! plus 21 labeled 2D positions in frame-pixel space.  The index order is the
//! fixed MediaPipe hand layout (wrist, then four joints per finger from base
//! to tip), and the frame is assumed already horizontally mirrored by the
//! capture collaborator.

// ════════════════════════════════════════════════════════════════════════════
// Point
// ════════════════════════════════════════════════════════════════════════════

/// A 2D position in frame pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    /// Planar Euclidean distance.
    pub fn dist(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Midpoint between two points.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Clamp both coordinates into `[0, w) × [0, h)`.
    pub fn clamp_to(self, w: f32, h: f32) -> Point {
        Point::new(
            self.x.clamp(0.0, (w - 1.0).max(0.0)),
            self.y.clamp(0.0, (h - 1.0).max(0.0)),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices — fixed 21-point hand layout
// ════════════════════════════════════════════════════════════════════════════

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// (tip, proximal joint) index pairs for the four non-thumb fingers,
/// in index → pinky order.  Used by the fist metric.
pub const FINGER_TIP_PIP: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

// ════════════════════════════════════════════════════════════════════════════
// HandFrame
// ════════════════════════════════════════════════════════════════════════════

/// One hand as seen for one tick.
///
/// `id` is assigned by the perception collaborator and assumed stable across
/// consecutive ticks for the same physical hand.  Nothing enforces that; see
/// the classifier docs for what happens when the assumption breaks.
#[derive(Clone, Debug)]
pub struct HandFrame {
    pub id: u32,
    pub points: [Point; LANDMARK_COUNT],
}

impl HandFrame {
    pub fn new(id: u32, points: [Point; LANDMARK_COUNT]) -> Self {
        HandFrame { id, points }
    }

    pub fn thumb_tip(&self) -> Point {
        self.points[THUMB_TIP]
    }

    pub fn index_tip(&self) -> Point {
        self.points[INDEX_TIP]
    }

    /// Middle-finger MCP — the palm anchor used as the fist-strike position.
    pub fn palm(&self) -> Point {
        self.points[MIDDLE_MCP]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
