//! Interactive UI elements: rectangles, buttons, and the virtual keyboard.
//!
//! Hit testing is half-open: a point is inside `[x, x+w) × [y, y+h)`.
//! "Hover" means any tracked cursor position is inside; "activation" means
//! any pinch-click position is inside.  When several elements could be
//! activated by the same tick's clicks, each screen resolves the tie by its
//! own fixed iteration order, first match wins — a documented
//! simplification, not a correctness guarantee.

use hand_gesture::{CursorEvent, Point};

use crate::surface::{text_width, Canvas};

/// Name buffer limit for login / add-user input.
pub const MAX_NAME_LEN: usize = 10;

/// Most usernames the switch-user grid will display (the store is uncapped).
pub const USER_LIST_CAP: usize = 15;

// ── palette ──────────────────────────────────────────────────────────────────

pub const COLOR_BUTTON: u32 = 0xFFC8C8C8;
pub const COLOR_HOVER: u32 = 0xFF00E060;
pub const COLOR_BORDER: u32 = 0xFF323232;
pub const COLOR_TEXT: u32 = 0xFF101010;

// ════════════════════════════════════════════════════════════════════════════
// Rect
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    /// Half-open containment: `[x, x+w) × [y, y+h)`.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Button
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct Button {
    pub label: String,
    pub rect: Rect,
    pub color: u32,
}

impl Button {
    /// Standard 200×60 button.
    pub fn new(label: &str, x: f32, y: f32) -> Self {
        Button {
            label: label.to_string(),
            rect: Rect::new(x, y, 200.0, 60.0),
            color: COLOR_BUTTON,
        }
    }

    pub fn with_size(mut self, w: f32, h: f32) -> Self {
        self.rect.w = w;
        self.rect.h = h;
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    /// True if any cursor position is inside this tick.
    pub fn hovered(&self, events: &[CursorEvent]) -> bool {
        events.iter().any(|e| self.rect.contains(e.pos))
    }

    /// True if any pinch-click landed inside this tick.
    pub fn clicked(&self, events: &[CursorEvent]) -> bool {
        events
            .iter()
            .any(|e| e.pinch_click && self.rect.contains(e.pos))
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, events: &[CursorEvent]) {
        let fill = if self.hovered(events) {
            COLOR_HOVER
        } else {
            self.color
        };
        let (x, y) = (self.rect.x as i32, self.rect.y as i32);
        let (w, h) = (self.rect.w as i32, self.rect.h as i32);
        canvas.blend_rect(x, y, w, h, fill, 0.75);
        canvas.stroke_rect(x, y, w, h, COLOR_BORDER);

        // Shrink the label scale until it fits.
        let mut scale = 3;
        while scale > 1 && text_width(&self.label, scale) > w - 12 {
            scale -= 1;
        }
        let tx = x + (w - text_width(&self.label, scale)) / 2;
        let ty = y + (h - 5 * scale) / 2;
        canvas.text(&self.label, tx, ty, scale, COLOR_TEXT);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// VirtualKeyboard
// ════════════════════════════════════════════════════════════════════════════

/// Result of feeding one click position to the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyboardResult {
    /// Click landed outside every key.
    Ignored,
    /// A character was appended or deleted.
    Edited,
    /// ENTER with a non-empty buffer.
    Entered,
}

/// A–Z grid plus DEL and ENTER, editing a bounded name buffer.
pub struct VirtualKeyboard {
    keys: Vec<(char, Rect)>,
    del: Button,
    enter: Button,
    input_rect: Rect,
    pub buffer: String,
}

impl VirtualKeyboard {
    pub fn new(start_x: f32, start_y: f32) -> Self {
        let mut keys = Vec::with_capacity(26);
        for (i, ch) in ('A'..='Z').enumerate() {
            let col = (i % 7) as f32;
            let row = (i / 7) as f32;
            keys.push((
                ch,
                Rect::new(start_x + col * 70.0, start_y + row * 70.0, 60.0, 60.0),
            ));
        }
        VirtualKeyboard {
            keys,
            del: Button::new("DEL", start_x, start_y + 280.0).with_size(130.0, 60.0),
            enter: Button::new("ENTER", start_x + 140.0, start_y + 280.0),
            input_rect: Rect::new(start_x, start_y - 90.0, 480.0, 70.0),
            buffer: String::new(),
        }
    }

    /// Feed one click position through the keys.
    ///
    /// Characters append only while the buffer is under [`MAX_NAME_LEN`];
    /// ENTER reports [`KeyboardResult::Entered`] only with a non-empty
    /// buffer.
    pub fn handle_click(&mut self, pos: Point) -> KeyboardResult {
        for &(ch, rect) in &self.keys {
            if rect.contains(pos) {
                if self.buffer.len() < MAX_NAME_LEN {
                    self.buffer.push(ch);
                }
                return KeyboardResult::Edited;
            }
        }
        if self.del.rect.contains(pos) {
            self.buffer.pop();
            return KeyboardResult::Edited;
        }
        if self.enter.rect.contains(pos) {
            if !self.buffer.is_empty() {
                return KeyboardResult::Entered;
            }
            return KeyboardResult::Ignored;
        }
        KeyboardResult::Ignored
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, events: &[CursorEvent]) {
        // Input box with the buffer and a caret.
        let r = self.input_rect;
        canvas.blend_rect(r.x as i32, r.y as i32, r.w as i32, r.h as i32, 0xFFFFFFFF, 0.85);
        canvas.stroke_rect(r.x as i32, r.y as i32, r.w as i32, r.h as i32, COLOR_BORDER);
        let shown = format!("{}|", self.buffer);
        canvas.text(&shown, r.x as i32 + 16, r.y as i32 + 20, 5, COLOR_TEXT);

        for &(ch, rect) in &self.keys {
            let hovered = events.iter().any(|e| rect.contains(e.pos));
            let fill = if hovered { COLOR_HOVER } else { COLOR_BUTTON };
            let (x, y) = (rect.x as i32, rect.y as i32);
            canvas.blend_rect(x, y, rect.w as i32, rect.h as i32, fill, 0.75);
            canvas.stroke_rect(x, y, rect.w as i32, rect.h as i32, COLOR_BORDER);
            let s = ch.to_string();
            canvas.text(
                &s,
                x + (rect.w as i32 - text_width(&s, 4)) / 2,
                y + (rect.h as i32 - 20) / 2,
                4,
                COLOR_TEXT,
            );
        }
        self.del.draw(canvas, events);
        self.enter.draw(canvas, events);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn click_at(x: f32, y: f32) -> CursorEvent {
        CursorEvent {
            hand_id: 0,
            pos: Point::new(x, y),
            palm: Point::new(x, y),
            pinch_span: (Point::new(x, y), Point::new(x, y)),
            pinching: true,
            fist: false,
            pinch_click: true,
            fist_strike: false,
        }
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(10.0, 10.0, 100.0, 50.0);
        assert!(r.contains(Point::new(10.0, 10.0))); // inclusive origin
        assert!(r.contains(Point::new(109.9, 59.9)));
        assert!(!r.contains(Point::new(110.0, 30.0))); // exclusive far edge
        assert!(!r.contains(Point::new(50.0, 60.0)));
        assert!(!r.contains(Point::new(9.9, 30.0)));
    }

    #[test]
    fn button_clicked_requires_click_flag() {
        let b = Button::new("GO", 100.0, 100.0);
        let mut hover_only = click_at(150.0, 120.0);
        hover_only.pinch_click = false;
        assert!(b.hovered(&[hover_only]));
        assert!(!b.clicked(&[hover_only]));
        assert!(b.clicked(&[click_at(150.0, 120.0)]));
    }

    #[test]
    fn keyboard_appends_up_to_limit() {
        let mut kb = VirtualKeyboard::new(100.0, 100.0);
        // 'A' key is the first cell
        let a_pos = Point::new(130.0, 130.0);
        for _ in 0..MAX_NAME_LEN + 5 {
            kb.handle_click(a_pos);
        }
        assert_eq!(kb.buffer.len(), MAX_NAME_LEN);
        assert!(kb.buffer.chars().all(|c| c == 'A'));
    }

    #[test]
    fn delete_pops_last_char() {
        let mut kb = VirtualKeyboard::new(100.0, 100.0);
        kb.buffer = "AB".to_string();
        let del_pos = Point::new(110.0, 400.0); // inside DEL at (100, 380)
        assert_eq!(kb.handle_click(del_pos), KeyboardResult::Edited);
        assert_eq!(kb.buffer, "A");
    }

    #[test]
    fn enter_requires_non_empty_buffer() {
        let mut kb = VirtualKeyboard::new(100.0, 100.0);
        let enter_pos = Point::new(250.0, 400.0); // inside ENTER at (240, 380)
        assert_eq!(kb.handle_click(enter_pos), KeyboardResult::Ignored);
        kb.buffer = "ZOE".to_string();
        assert_eq!(kb.handle_click(enter_pos), KeyboardResult::Entered);
    }

    #[test]
    fn click_outside_everything_is_ignored() {
        let mut kb = VirtualKeyboard::new(100.0, 100.0);
        assert_eq!(
            kb.handle_click(Point::new(900.0, 600.0)),
            KeyboardResult::Ignored
        );
    }
}
