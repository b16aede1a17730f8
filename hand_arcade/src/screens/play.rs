//! The arena: Playing, Paused, and GameOver.

use crate::sim::{EnemyKind, KILL_RADIUS};
use crate::surface::{text_width, Canvas};
use crate::ui::{Button, COLOR_HOVER};

use super::{Context, FrameInput, Screen, StateId, Transition};

const COLOR_ARENA: u32 = 0xFF101018;
const COLOR_BASE: u32 = 0xFF30C0FF;
const COLOR_BASIC: u32 = 0xFFFFA030;
const COLOR_SPECIAL: u32 = 0xFFB050FF;
const COLOR_BOSS: u32 = 0xFFFF3030;
const COLOR_HUD: u32 = 0xFFF0F0F0;

// ════════════════════════════════════════════════════════════════════════════
// PlayingScreen
// ════════════════════════════════════════════════════════════════════════════

/// The live game.  The pause button is resolved before the simulation runs,
/// so the click that pauses never doubles as a kill.
pub struct PlayingScreen {
    pause: Option<Button>,
}

impl PlayingScreen {
    pub fn new() -> Self {
        PlayingScreen { pause: None }
    }
}

impl Default for PlayingScreen {
    fn default() -> Self {
        PlayingScreen::new()
    }
}

impl Screen for PlayingScreen {
    fn on_enter(&mut self, ctx: &mut Context) {
        self.pause = Some(
            Button::new("PAUSE", ctx.width - 160.0, 20.0).with_size(140.0, 50.0),
        );
    }

    fn on_frame(
        &mut self,
        ctx: &mut Context,
        canvas: &mut dyn Canvas,
        input: &FrameInput<'_>,
    ) -> Transition {
        if let Some(pause) = &self.pause {
            if pause.clicked(input.events) {
                return Transition::To(StateId::Paused);
            }
        }

        // Split borrows so the session can mutate alongside the visual
        // state and rng while icons stay shared.
        let Context {
            session,
            visual,
            icons,
            rng,
            ..
        } = ctx;
        let outcome = session.tick(input.now, input.events, visual, icons, rng);

        if outcome.breached {
            log::info!(
                "base breached at score {} ({})",
                ctx.session.score,
                ctx.session.difficulty.label()
            );
            ctx.persist_score();
            return Transition::To(StateId::GameOver);
        }

        draw_arena(ctx, canvas);
        if let Some(pause) = &self.pause {
            pause.draw(canvas, input.events);
        }
        Transition::Stay
    }
}

fn draw_arena(ctx: &Context, canvas: &mut dyn Canvas) {
    canvas.clear(COLOR_ARENA);

    // The base: defended circle at the center, brighter once upgraded.
    let c = ctx.session.center();
    let base_color = if ctx.visual.avatar_tier > 0 {
        0xFF80E0FF
    } else {
        COLOR_BASE
    };
    canvas.fill_circle(c.x as i32, c.y as i32, 18, base_color);
    canvas.stroke_circle(c.x as i32, c.y as i32, KILL_RADIUS as i32, base_color);

    for e in &ctx.session.enemies {
        let (x, y, r) = (e.pos.x as i32, e.pos.y as i32, e.radius as i32);
        if let Some(icon) = e.icon {
            if let Some(sprite) = ctx.icons.sprite(e.kind, e.icon_tier, icon) {
                canvas.blit(sprite, x, y, r * 2);
                continue;
            }
        }
        match e.kind {
            EnemyKind::Basic => {
                canvas.fill_circle(x, y, r, COLOR_BASIC);
                canvas.stroke_circle(x, y, r, 0xFF804000);
            }
            EnemyKind::Special => {
                canvas.fill_rect(x - r, y - r, 2 * r, 2 * r, COLOR_SPECIAL);
                canvas.stroke_rect(x - r, y - r, 2 * r, 2 * r, 0xFF502080);
            }
            EnemyKind::Boss => {
                canvas.fill_circle(x, y, r, COLOR_BOSS);
                canvas.stroke_circle(x, y, r, 0xFFF0F0F0);
                canvas.stroke_circle(x, y, r - 8, 0xFFF0F0F0);
            }
        }
    }

    // HUD
    let score = format!("SCORE: {}", ctx.session.score);
    canvas.text(&score, 20, 20, 4, COLOR_HUD);
    canvas.text(ctx.session.difficulty.label(), 20, 56, 2, 0xFF909098);
    let who = format!("{} T{}", ctx.current_user, ctx.visual.avatar_tier + 1);
    canvas.text(&who, 20, canvas.height() as i32 - 30, 2, 0xFF909098);
}

// ════════════════════════════════════════════════════════════════════════════
// PausedScreen
// ════════════════════════════════════════════════════════════════════════════

/// Game frozen: the simulation does not tick while this screen is active,
/// and the spawn clock is re-anchored on resume so no backlog lands.
pub struct PausedScreen {
    resume: Button,
    restart: Button,
    save_quit: Button,
}

impl PausedScreen {
    pub fn new(width: f32, height: f32) -> Self {
        let x = width / 2.0 - 100.0;
        let y = height / 2.0 - 120.0;
        PausedScreen {
            resume: Button::new("RESUME", x, y).with_color(COLOR_HOVER),
            restart: Button::new("RESTART", x, y + 90.0),
            save_quit: Button::new("SAVE + QUIT", x, y + 180.0).with_size(220.0, 60.0),
        }
    }
}

impl Screen for PausedScreen {
    fn on_frame(
        &mut self,
        ctx: &mut Context,
        canvas: &mut dyn Canvas,
        input: &FrameInput<'_>,
    ) -> Transition {
        if self.resume.clicked(input.events) {
            ctx.session.resume(input.now);
            return Transition::To(StateId::Playing);
        }
        if self.restart.clicked(input.events) {
            ctx.start_session(input.now);
            return Transition::To(StateId::Playing);
        }
        if self.save_quit.clicked(input.events) {
            ctx.persist_score();
            return Transition::To(StateId::Menu);
        }

        // Frozen arena behind a dim overlay.
        draw_arena(ctx, canvas);
        canvas.blend_rect(
            0,
            0,
            canvas.width() as i32,
            canvas.height() as i32,
            0xFF000000,
            0.55,
        );
        let title = "PAUSED";
        canvas.text(
            title,
            (canvas.width() as i32 - text_width(title, 6)) / 2,
            100,
            6,
            COLOR_HUD,
        );
        self.resume.draw(canvas, input.events);
        self.restart.draw(canvas, input.events);
        self.save_quit.draw(canvas, input.events);
        Transition::Stay
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GameOverScreen
// ════════════════════════════════════════════════════════════════════════════

/// Shown after a breach.  The score was already persisted on the way in;
/// the session itself is kept so the final score stays readable here.
/// Only way out is back to the menu.
pub struct GameOverScreen {
    menu: Button,
}

impl GameOverScreen {
    pub fn new(width: f32, height: f32) -> Self {
        GameOverScreen {
            menu: Button::new("MENU", width / 2.0 - 100.0, height / 2.0 + 40.0)
                .with_color(COLOR_HOVER),
        }
    }
}

impl Screen for GameOverScreen {
    fn on_frame(
        &mut self,
        ctx: &mut Context,
        canvas: &mut dyn Canvas,
        input: &FrameInput<'_>,
    ) -> Transition {
        if self.menu.clicked(input.events) {
            return Transition::To(StateId::Menu);
        }

        super::draw_chrome(canvas, "GAME OVER");
        let score = format!("SCORE: {}", ctx.session.score);
        canvas.text(
            &score,
            (canvas.width() as i32 - text_width(&score, 5)) / 2,
            200,
            5,
            COLOR_HUD,
        );
        if let Some(rec) = ctx.records.record(&ctx.current_user, ctx.session.difficulty) {
            let best = format!("BEST: {}", rec.best_score);
            canvas.text(
                &best,
                (canvas.width() as i32 - text_width(&best, 3)) / 2,
                260,
                3,
                0xFFB0B0C0,
            );
        }
        self.menu.draw(canvas, input.events);
        Transition::Stay
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
