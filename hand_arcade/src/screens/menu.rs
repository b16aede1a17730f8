//! Main menu and difficulty selection.

use std::time::Instant;

use score_records::Difficulty;

use crate::surface::{text_width, Canvas};
use crate::ui::{Button, COLOR_HOVER};

use super::{draw_chrome, Context, FrameInput, Screen, StateId, Transition};

// ════════════════════════════════════════════════════════════════════════════
// MenuScreen
// ════════════════════════════════════════════════════════════════════════════

/// Start / Records / Exit.  Account management (switch, add, delete) all
/// hangs off the records screen.
pub struct MenuScreen {
    start: Button,
    records: Button,
    exit: Button,
}

impl MenuScreen {
    pub fn new(width: f32, _height: f32) -> Self {
        let x = width / 2.0 - 100.0;
        let slot = |i: f32| 200.0 + i * 100.0;
        MenuScreen {
            start: Button::new("START", x, slot(0.0)).with_color(COLOR_HOVER),
            records: Button::new("RECORDS", x, slot(1.0)),
            exit: Button::new("EXIT", x, slot(2.0)),
        }
    }
}

impl Screen for MenuScreen {
    fn on_frame(
        &mut self,
        ctx: &mut Context,
        canvas: &mut dyn Canvas,
        input: &FrameInput<'_>,
    ) -> Transition {
        if self.start.clicked(input.events) {
            return Transition::To(StateId::Difficulty);
        }
        if self.records.clicked(input.events) {
            return Transition::To(StateId::Records);
        }
        if self.exit.clicked(input.events) {
            ctx.running = false;
            return Transition::Stay;
        }

        draw_chrome(canvas, "DEFEND THE CENTER");
        let who = format!("PLAYER: {}", ctx.current_user);
        canvas.text(&who, 20, canvas.height() as i32 - 30, 2, 0xFFB0B0C0);
        for b in [&self.start, &self.records, &self.exit] {
            b.draw(canvas, input.events);
        }
        Transition::Stay
    }
}

// ════════════════════════════════════════════════════════════════════════════
// DifficultyScreen
// ════════════════════════════════════════════════════════════════════════════

/// Pick a difficulty (which starts a fresh session immediately) or toggle
/// special enemies for the coming sessions.
pub struct DifficultyScreen {
    easy: Button,
    normal: Button,
    hard: Button,
    special: Button,
    back: Button,
}

impl DifficultyScreen {
    pub fn new(width: f32, _height: f32) -> Self {
        let x = width / 2.0 - 100.0;
        let slot = |i: f32| 180.0 + i * 90.0;
        DifficultyScreen {
            easy: Button::new("EASY", x, slot(0.0)),
            normal: Button::new("NORMAL", x, slot(1.0)),
            hard: Button::new("HARD", x, slot(2.0)),
            special: Button::new("SPECIAL: ON", x, slot(3.0)).with_size(240.0, 60.0),
            back: Button::new("BACK", x, slot(4.0)),
        }
    }

    fn pick(&self, ctx: &mut Context, difficulty: Difficulty, now: Instant) -> Transition {
        ctx.difficulty = difficulty;
        ctx.start_session(now);
        log::info!("session start: {} as {}", difficulty.label(), ctx.current_user);
        Transition::To(StateId::Playing)
    }
}

impl Screen for DifficultyScreen {
    fn on_frame(
        &mut self,
        ctx: &mut Context,
        canvas: &mut dyn Canvas,
        input: &FrameInput<'_>,
    ) -> Transition {
        if self.easy.clicked(input.events) {
            return self.pick(ctx, Difficulty::Easy, input.now);
        }
        if self.normal.clicked(input.events) {
            return self.pick(ctx, Difficulty::Normal, input.now);
        }
        if self.hard.clicked(input.events) {
            return self.pick(ctx, Difficulty::Hard, input.now);
        }
        if self.special.clicked(input.events) {
            ctx.special_enabled = !ctx.special_enabled;
        }
        if self.back.clicked(input.events) {
            return Transition::To(StateId::Menu);
        }

        self.special.label = if ctx.special_enabled {
            "SPECIAL: ON".to_string()
        } else {
            "SPECIAL: OFF".to_string()
        };

        draw_chrome(canvas, "DIFFICULTY");
        let hint = "SPECIAL ENEMIES TAKE A FIST, NOT A PINCH";
        canvas.text(
            hint,
            (canvas.width() as i32 - text_width(hint, 2)) / 2,
            120,
            2,
            0xFFB0B0C0,
        );
        for b in [&self.easy, &self.normal, &self.hard, &self.special, &self.back] {
            b.draw(canvas, input.events);
        }
        Transition::Stay
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::super::testkit::{click_at, context, frame};
    use super::*;

    // Menu buttons sit at x = 540, slots at y = 200 + 100i.

    #[test]
    fn start_goes_to_difficulty() {
        let mut ctx = context();
        let mut screen = MenuScreen::new(1280.0, 720.0);
        let t = frame(&mut screen, &mut ctx, &[click_at(560.0, 220.0)]);
        assert_eq!(t, Transition::To(StateId::Difficulty));
    }

    #[test]
    fn exit_clears_running_and_stays() {
        let mut ctx = context();
        let mut screen = MenuScreen::new(1280.0, 720.0);
        let t = frame(&mut screen, &mut ctx, &[click_at(560.0, 420.0)]);
        assert_eq!(t, Transition::Stay);
        assert!(!ctx.running);
    }

    #[test]
    fn menu_routes_to_records() {
        let mut ctx = context();
        let mut screen = MenuScreen::new(1280.0, 720.0);
        assert_eq!(
            frame(&mut screen, &mut ctx, &[click_at(560.0, 320.0)]),
            Transition::To(StateId::Records)
        );
    }

    #[test]
    fn menu_has_no_user_management_entries() {
        // Clicks on the old SWITCH USER / ADD USER slots fall through.
        let mut ctx = context();
        let mut screen = MenuScreen::new(1280.0, 720.0);
        assert_eq!(
            frame(&mut screen, &mut ctx, &[click_at(560.0, 520.0)]),
            Transition::Stay
        );
        assert!(ctx.running);
    }

    #[test]
    fn picking_hard_starts_a_fresh_session() {
        let mut ctx = context();
        ctx.session.score = 99;
        let mut screen = DifficultyScreen::new(1280.0, 720.0);
        let t = frame(&mut screen, &mut ctx, &[click_at(560.0, 380.0)]);
        assert_eq!(t, Transition::To(StateId::Playing));
        assert_eq!(ctx.difficulty, Difficulty::Hard);
        assert_eq!(ctx.session.score, 0);
        assert_eq!(ctx.session.difficulty, Difficulty::Hard);
    }

    #[test]
    fn special_toggle_flips_and_stays() {
        let mut ctx = context();
        assert!(ctx.special_enabled);
        let mut screen = DifficultyScreen::new(1280.0, 720.0);
        let t = frame(&mut screen, &mut ctx, &[click_at(560.0, 470.0)]);
        assert_eq!(t, Transition::Stay);
        assert!(!ctx.special_enabled);
        frame(&mut screen, &mut ctx, &[click_at(560.0, 470.0)]);
        assert!(ctx.special_enabled);
    }

    #[test]
    fn back_returns_to_menu() {
        let mut ctx = context();
        let mut screen = DifficultyScreen::new(1280.0, 720.0);
        let t = frame(&mut screen, &mut ctx, &[click_at(560.0, 560.0)]);
        assert_eq!(t, Transition::To(StateId::Menu));
    }
}
