//! Screen framework — one handler per navigation state.
//!
//! Navigation is a flat state machine: exactly one [`Screen`] is active at
//! a time, the driver ticks it with [`Screen::on_frame`], and a returned
//! [`Transition::To`] runs `on_exit` on the old screen, constructs the new
//! one, and runs `on_enter` — all before the next frame.  Shared mutable
//! state (records, session, keyboard buffer, visual tier) lives in
//! [`Context`], never in globals, so tests can drive the whole machine
//! headless.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use hand_gesture::{CursorEvent, GestureClassifier};
use score_records::{Difficulty, RecordsStore};

use crate::icons::IconLibrary;
use crate::sim::{GameSession, VisualState};
use crate::surface::Canvas;
use crate::ui::VirtualKeyboard;

mod login;
mod menu;
mod play;
mod records;

pub use login::{AddUserScreen, ConfirmActionScreen, ConfirmDeleteScreen, LoginScreen};
pub use menu::{DifficultyScreen, MenuScreen};
pub use play::{GameOverScreen, PausedScreen, PlayingScreen};
pub use records::{RecordsScreen, SwitchUserScreen};

/// Username shown while playing without an account.  Guest scores are
/// never persisted.
pub const GUEST_NAME: &str = "GUEST";

// ════════════════════════════════════════════════════════════════════════════
// StateId / Transition
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateId {
    Login,
    AddUserInput,
    ConfirmAction,
    ConfirmDelete,
    Menu,
    Difficulty,
    Playing,
    Paused,
    GameOver,
    Records,
    SwitchUserSelect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Stay,
    To(StateId),
}

/// What every screen gets each frame.
pub struct FrameInput<'a> {
    pub events: &'a [CursorEvent],
    pub now: Instant,
}

/// Where a name-entry confirmation came from, which decides where YES
/// lands (Menu for a login, Records for an account added from there).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmPurpose {
    /// Name typed on the login screen.
    Login,
    /// Name typed on the add-user screen, reached from Records.
    AddUser,
}

// ════════════════════════════════════════════════════════════════════════════
// Context
// ════════════════════════════════════════════════════════════════════════════

/// All cross-screen state.
pub struct Context {
    pub width: f32,
    pub height: f32,
    pub records: RecordsStore,
    pub current_user: String,
    pub is_guest: bool,
    pub keyboard: VirtualKeyboard,
    pub confirm_purpose: ConfirmPurpose,
    pub difficulty: Difficulty,
    pub special_enabled: bool,
    pub session: GameSession,
    pub visual: VisualState,
    pub icons: IconLibrary,
    pub classifier: GestureClassifier,
    pub rng: StdRng,
    /// Cleared by the menu's EXIT button; the driver stops when false.
    pub running: bool,
}

impl Context {
    pub fn new(
        width: f32,
        height: f32,
        records: RecordsStore,
        icons: IconLibrary,
        classifier: GestureClassifier,
    ) -> Self {
        let now = Instant::now();
        Context {
            width,
            height,
            records,
            current_user: GUEST_NAME.to_string(),
            is_guest: true,
            keyboard: VirtualKeyboard::new(width / 2.0 - 240.0, 200.0),
            confirm_purpose: ConfirmPurpose::Login,
            difficulty: Difficulty::Normal,
            special_enabled: true,
            session: GameSession::new(Difficulty::Normal, true, width, height, now),
            visual: VisualState::default(),
            icons,
            classifier,
            rng: StdRng::from_entropy(),
            running: true,
        }
    }

    /// Start a fresh Playing episode: new session for the selected
    /// difficulty, gesture locks cleared so a held pinch from the menu
    /// cannot fire a click into the arena.
    pub fn start_session(&mut self, now: Instant) {
        self.session = GameSession::new(
            self.difficulty,
            self.special_enabled,
            self.width,
            self.height,
            now,
        );
        self.classifier.reset();
    }

    /// Record the finished session score, unless playing as guest.
    pub fn persist_score(&mut self) {
        if self.is_guest {
            log::debug!("guest score {} not persisted", self.session.score);
            return;
        }
        let user = self.current_user.clone();
        self.records
            .add_score(&user, self.session.score, self.session.difficulty);
    }

    /// Switch the logged-in user and reset the name buffer.
    pub fn log_in(&mut self, name: &str) {
        self.current_user = name.to_string();
        self.is_guest = false;
        self.keyboard.buffer.clear();
        log::info!("logged in as {name:?}");
    }

    pub fn log_in_guest(&mut self) {
        self.current_user = GUEST_NAME.to_string();
        self.is_guest = true;
        self.keyboard.buffer.clear();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Screen trait + factory
// ════════════════════════════════════════════════════════════════════════════

pub trait Screen {
    fn on_enter(&mut self, _ctx: &mut Context) {}

    /// One frame: consume this tick's gesture events, draw, and decide
    /// where to go next.
    fn on_frame(
        &mut self,
        ctx: &mut Context,
        canvas: &mut dyn Canvas,
        input: &FrameInput<'_>,
    ) -> Transition;

    fn on_exit(&mut self, _ctx: &mut Context) {}
}

/// Construct the handler for `id`.  Screens are rebuilt on every entry, so
/// per-visit state (button layouts, user grids) starts fresh each time.
pub fn screen_for(id: StateId, width: f32, height: f32) -> Box<dyn Screen> {
    match id {
        StateId::Login => Box::new(LoginScreen::new(width, height)),
        StateId::AddUserInput => Box::new(AddUserScreen::new(width, height)),
        StateId::ConfirmAction => Box::new(ConfirmActionScreen::new(width, height)),
        StateId::ConfirmDelete => Box::new(ConfirmDeleteScreen::new(width, height)),
        StateId::Menu => Box::new(MenuScreen::new(width, height)),
        StateId::Difficulty => Box::new(DifficultyScreen::new(width, height)),
        StateId::Playing => Box::new(PlayingScreen::new()),
        StateId::Paused => Box::new(PausedScreen::new(width, height)),
        StateId::GameOver => Box::new(GameOverScreen::new(width, height)),
        StateId::Records => Box::new(RecordsScreen::new(width, height)),
        StateId::SwitchUserSelect => Box::new(SwitchUserScreen::new(width, height)),
    }
}

// ── shared chrome ────────────────────────────────────────────────────────────

pub(crate) const COLOR_BACKDROP: u32 = 0xFF1A1A2A;
pub(crate) const COLOR_TITLE: u32 = 0xFFF0F0F0;

/// Backdrop plus centered title text every menu-like screen opens with.
pub(crate) fn draw_chrome(canvas: &mut dyn Canvas, title: &str) {
    canvas.clear(COLOR_BACKDROP);
    let x = (canvas.width() as i32 - crate::surface::text_width(title, 6)) / 2;
    canvas.text(title, x, 40, 6, COLOR_TITLE);
}

#[cfg(test)]
pub(crate) mod testkit {
    //! Helpers shared by the screen test modules.

    use super::*;
    use crate::surface::FrameBuffer;
    use hand_gesture::Point;

    pub fn context() -> Context {
        Context::new(
            1280.0,
            720.0,
            RecordsStore::in_memory(),
            IconLibrary::empty(),
            GestureClassifier::new(1280.0, 720.0),
        )
    }

    pub fn canvas() -> FrameBuffer {
        FrameBuffer::new(1280, 720)
    }

    pub fn click_at(x: f32, y: f32) -> CursorEvent {
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

    /// Drive one frame against `screen` with the given clicks.
    pub fn frame(
        screen: &mut dyn Screen,
        ctx: &mut Context,
        events: &[CursorEvent],
    ) -> Transition {
        let mut fb = canvas();
        let input = FrameInput {
            events,
            now: Instant::now(),
        };
        screen.on_frame(ctx, &mut fb, &input)
    }
}
