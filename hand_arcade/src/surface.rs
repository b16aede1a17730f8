//! Software-rendered draw surface.
//!
//! The whole game draws through the [`Canvas`] trait — filled/outline
//! rectangles, circles, lines, bitmap text, alpha tinting, and RGBA sprite
//! blits onto a fixed width×height ARGB pixel buffer.  [`FrameBuffer`] is
//! the pure software implementation (fully testable headless);
//! [`Surface`] pairs one with a `minifb` window, polls pointer input for
//! the sim hand source, and presents the buffer each tick.

use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

use std::sync::mpsc::Sender;

use crate::perception::PointerSample;

// ════════════════════════════════════════════════════════════════════════════
// Sprite — an RGBA image ready to blit
// ════════════════════════════════════════════════════════════════════════════

/// Straight-alpha RGBA pixels, row-major.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub w: usize,
    pub h: usize,
    pub rgba: Vec<[u8; 4]>,
}

impl Sprite {
    pub fn new(w: usize, h: usize, rgba: Vec<[u8; 4]>) -> Self {
        debug_assert_eq!(rgba.len(), w * h);
        Sprite { w, h, rgba }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Canvas trait
// ════════════════════════════════════════════════════════════════════════════

/// Primitive draw calls on a fixed-size ARGB buffer.
///
/// Coordinates are signed so callers can draw shapes that straddle the
/// frame edge; every primitive clips to the buffer.
pub trait Canvas {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn clear(&mut self, color: u32);
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32);
    /// Filled rect blended over the existing pixels (`alpha` 0.0–1.0) —
    /// the overlay-tint pass the menus sit on.
    fn blend_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32, alpha: f32);
    fn stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32);
    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32);
    fn stroke_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32);
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32);
    /// Bitmap text; `scale` multiplies the 3×5 glyph grid.
    fn text(&mut self, s: &str, x: i32, y: i32, scale: i32, color: u32);
    /// Alpha-blend `sprite` scaled to `size`×`size`, centered on (cx, cy).
    fn blit(&mut self, sprite: &Sprite, cx: i32, cy: i32, size: i32);
}

/// Pixel width of `s` rendered at `scale` (3 columns + 1 gap per glyph).
pub fn text_width(s: &str, scale: i32) -> i32 {
    s.chars().count() as i32 * 4 * scale - scale
}

// ════════════════════════════════════════════════════════════════════════════
// FrameBuffer — software Canvas
// ════════════════════════════════════════════════════════════════════════════

pub struct FrameBuffer {
    w: usize,
    h: usize,
    pub buf: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            w,
            h,
            buf: vec![0xFF000000; w * h],
        }
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.buf[y as usize * self.w + x as usize] = color;
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: u32, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.w || y as usize >= self.h {
            return;
        }
        let idx = y as usize * self.w + x as usize;
        self.buf[idx] = blend(self.buf[idx], color, alpha);
    }
}

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
pub fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0 - t) + cb as f32 * t) as u32;
    let ar = (a >> 16) & 0xFF;
    let br = (b >> 16) & 0xFF;
    let ag = (a >> 8) & 0xFF;
    let bg = (b >> 8) & 0xFF;
    let ab = a & 0xFF;
    let bb = b & 0xFF;
    0xFF000000 | (lerp(ar, br) << 16) | (lerp(ag, bg) << 8) | lerp(ab, bb)
}

impl Canvas for FrameBuffer {
    fn width(&self) -> usize {
        self.w
    }

    fn height(&self) -> usize {
        self.h
    }

    fn clear(&mut self, color: u32) {
        self.buf.fill(color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.w as i32);
        let y1 = (y + h).min(self.h as i32);
        for row in y0..y1 {
            let base = row as usize * self.w;
            for col in x0..x1 {
                self.buf[base + col as usize] = color;
            }
        }
    }

    fn blend_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32, alpha: f32) {
        for row in y.max(0)..(y + h).min(self.h as i32) {
            for col in x.max(0)..(x + w).min(self.w as i32) {
                self.blend_pixel(col, row, color, alpha);
            }
        }
    }

    fn stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        for col in x..x + w {
            self.set_pixel(col, y, color);
            self.set_pixel(col, y + h - 1, color);
        }
        for row in y..y + h {
            self.set_pixel(x, row, color);
            self.set_pixel(x + w - 1, row, color);
        }
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn stroke_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        // Ring one pixel thick (squared-distance band).
        for dy in -r..=r {
            for dx in -r..=r {
                let d2 = dx * dx + dy * dy;
                if d2 <= r * r && d2 > (r - 2) * (r - 2) {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        // Bresenham
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn text(&mut self, s: &str, x: i32, y: i32, scale: i32, color: u32) {
        let scale = scale.max(1);
        let mut cx = x;
        for ch in s.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3i32 {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(
                            cx + col * scale,
                            y + row as i32 * scale,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
            if cx >= self.w as i32 {
                break;
            }
        }
    }

    fn blit(&mut self, sprite: &Sprite, cx: i32, cy: i32, size: i32) {
        if sprite.w == 0 || sprite.h == 0 || size <= 0 {
            return;
        }
        let x0 = cx - size / 2;
        let y0 = cy - size / 2;
        // Nearest-neighbour scale to size×size with per-pixel alpha.
        for dy in 0..size {
            for dx in 0..size {
                let sx = (dx as usize * sprite.w) / size as usize;
                let sy = (dy as usize * sprite.h) / size as usize;
                let [r, g, b, a] = sprite.rgba[sy * sprite.w + sx];
                if a == 0 {
                    continue;
                }
                let color = 0xFF000000 | ((r as u32) << 16) | ((g as u32) << 8) | b as u32;
                self.blend_pixel(x0 + dx, y0 + dy, color, a as f32 / 255.0);
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Surface — minifb window + FrameBuffer
// ════════════════════════════════════════════════════════════════════════════

pub struct Surface {
    window: Window,
    fb: FrameBuffer,
    pointer_tx: Sender<PointerSample>,
}

impl Surface {
    pub fn new(
        title: &str,
        w: usize,
        h: usize,
        pointer_tx: Sender<PointerSample>,
    ) -> Result<Self, String> {
        let mut window = Window::new(
            title,
            w,
            h,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Surface {
            window,
            fb: FrameBuffer::new(w, h),
            pointer_tx,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Poll window input and forward a [`PointerSample`] to the sim hand
    /// source.  Returns false when the window closed or Escape was pressed.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() || self.window.is_key_down(Key::Escape) {
            return false;
        }
        if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let sample = PointerSample {
                x: mx,
                y: my,
                pinch: self.window.get_mouse_down(MouseButton::Left)
                    || self.window.is_key_down(Key::Z),
                fist: self.window.get_mouse_down(MouseButton::Right)
                    || self.window.is_key_down(Key::X),
            };
            if self.pointer_tx.send(sample).is_err() {
                return false;
            }
        }
        true
    }

    pub fn canvas(&mut self) -> &mut FrameBuffer {
        &mut self.fb
    }

    pub fn present(&mut self) {
        let (w, h) = (self.fb.w, self.fb.h);
        self.window.update_with_buffer(&self.fb.buf, w, h).ok();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '|' => [0b010, 0b010, 0b010, 0b010, 0b010],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        '?' => [0b111, 0b001, 0b011, 0b000, 0b010],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _ => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
