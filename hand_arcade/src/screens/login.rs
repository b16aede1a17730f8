//! Name entry and confirmation screens.

use crate::surface::{text_width, Canvas};
use crate::ui::{Button, KeyboardResult, COLOR_HOVER};

use super::{
    draw_chrome, ConfirmPurpose, Context, FrameInput, Screen, StateId, Transition,
};

// ════════════════════════════════════════════════════════════════════════════
// LoginScreen
// ════════════════════════════════════════════════════════════════════════════

/// Initial screen: type a name on the virtual keyboard, or skip in as
/// guest.  ENTER always routes through the confirmation screen; known
/// names just make the registration there a no-op.
pub struct LoginScreen {
    guest: Button,
}

impl LoginScreen {
    pub fn new(width: f32, height: f32) -> Self {
        LoginScreen {
            guest: Button::new("PLAY AS GUEST", width / 2.0 + 280.0, height - 160.0)
                .with_size(260.0, 60.0),
        }
    }
}

impl Screen for LoginScreen {
    fn on_enter(&mut self, ctx: &mut Context) {
        ctx.keyboard.buffer.clear();
    }

    fn on_frame(
        &mut self,
        ctx: &mut Context,
        canvas: &mut dyn Canvas,
        input: &FrameInput<'_>,
    ) -> Transition {
        for e in input.events.iter().filter(|e| e.pinch_click) {
            match ctx.keyboard.handle_click(e.pos) {
                KeyboardResult::Entered => {
                    ctx.confirm_purpose = ConfirmPurpose::Login;
                    return Transition::To(StateId::ConfirmAction);
                }
                KeyboardResult::Edited => continue,
                KeyboardResult::Ignored => {}
            }
            if self.guest.rect.contains(e.pos) {
                ctx.log_in_guest();
                return Transition::To(StateId::Menu);
            }
        }

        draw_chrome(canvas, "LOGIN");
        canvas.text(
            "ENTER YOUR NAME",
            (canvas.width() as i32 - text_width("ENTER YOUR NAME", 3)) / 2,
            120,
            3,
            0xFFB0B0C0,
        );
        ctx.keyboard.draw(canvas, input.events);
        self.guest.draw(canvas, input.events);
        Transition::Stay
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AddUserScreen
// ════════════════════════════════════════════════════════════════════════════

/// Create another account, reached from the records screen.
pub struct AddUserScreen {
    back: Button,
}

impl AddUserScreen {
    pub fn new(width: f32, height: f32) -> Self {
        AddUserScreen {
            back: Button::new("BACK", width / 2.0 + 280.0, height - 160.0),
        }
    }
}

impl Screen for AddUserScreen {
    fn on_enter(&mut self, ctx: &mut Context) {
        ctx.keyboard.buffer.clear();
    }

    fn on_frame(
        &mut self,
        ctx: &mut Context,
        canvas: &mut dyn Canvas,
        input: &FrameInput<'_>,
    ) -> Transition {
        for e in input.events.iter().filter(|e| e.pinch_click) {
            match ctx.keyboard.handle_click(e.pos) {
                KeyboardResult::Entered => {
                    ctx.confirm_purpose = ConfirmPurpose::AddUser;
                    return Transition::To(StateId::ConfirmAction);
                }
                KeyboardResult::Edited => continue,
                KeyboardResult::Ignored => {}
            }
            if self.back.rect.contains(e.pos) {
                return Transition::To(StateId::Records);
            }
        }

        draw_chrome(canvas, "ADD USER");
        ctx.keyboard.draw(canvas, input.events);
        self.back.draw(canvas, input.events);
        Transition::Stay
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ConfirmActionScreen
// ════════════════════════════════════════════════════════════════════════════

/// YES/NO gate after name entry.  YES registers the typed name (a no-op
/// for names that already exist) and logs it in; where that lands depends
/// on where the entry started ([`ConfirmPurpose`]).
pub struct ConfirmActionScreen {
    yes: Button,
    no: Button,
}

impl ConfirmActionScreen {
    pub fn new(width: f32, height: f32) -> Self {
        let cx = width / 2.0;
        let y = height / 2.0 + 40.0;
        ConfirmActionScreen {
            yes: Button::new("YES", cx - 220.0, y).with_color(COLOR_HOVER),
            no: Button::new("NO", cx + 20.0, y),
        }
    }
}

impl Screen for ConfirmActionScreen {
    fn on_frame(
        &mut self,
        ctx: &mut Context,
        canvas: &mut dyn Canvas,
        input: &FrameInput<'_>,
    ) -> Transition {
        if self.yes.clicked(input.events) {
            let name = ctx.keyboard.buffer.clone();
            ctx.records.register(&name);
            ctx.log_in(&name);
            return Transition::To(match ctx.confirm_purpose {
                ConfirmPurpose::Login => StateId::Menu,
                ConfirmPurpose::AddUser => StateId::Records,
            });
        }
        if self.no.clicked(input.events) {
            // Back to where the name was typed, buffer kept for editing.
            return Transition::To(match ctx.confirm_purpose {
                ConfirmPurpose::Login => StateId::Login,
                ConfirmPurpose::AddUser => StateId::AddUserInput,
            });
        }

        draw_chrome(canvas, "CONFIRM");
        let msg = format!("CREATE USER {}?", ctx.keyboard.buffer);
        canvas.text(
            &msg,
            (canvas.width() as i32 - text_width(&msg, 4)) / 2,
            canvas.height() as i32 / 2 - 60,
            4,
            0xFFF0F0F0,
        );
        self.yes.draw(canvas, input.events);
        self.no.draw(canvas, input.events);
        Transition::Stay
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ConfirmDeleteScreen
// ════════════════════════════════════════════════════════════════════════════

/// YES/NO gate before the logged-in account and its records are removed.
/// YES deletes and drops back to the login screen as guest.
pub struct ConfirmDeleteScreen {
    yes: Button,
    no: Button,
}

impl ConfirmDeleteScreen {
    pub fn new(width: f32, height: f32) -> Self {
        let cx = width / 2.0;
        let y = height / 2.0 + 40.0;
        ConfirmDeleteScreen {
            yes: Button::new("YES", cx - 220.0, y).with_color(0xFFE05050),
            no: Button::new("NO", cx + 20.0, y),
        }
    }
}

impl Screen for ConfirmDeleteScreen {
    fn on_frame(
        &mut self,
        ctx: &mut Context,
        canvas: &mut dyn Canvas,
        input: &FrameInput<'_>,
    ) -> Transition {
        if self.yes.clicked(input.events) {
            let name = ctx.current_user.clone();
            ctx.records.delete_user(&name);
            log::info!("deleted user {name:?}");
            ctx.log_in_guest();
            return Transition::To(StateId::Login);
        }
        if self.no.clicked(input.events) {
            return Transition::To(StateId::Records);
        }

        draw_chrome(canvas, "DELETE USER");
        let msg = format!("DELETE {} AND ALL RECORDS?", ctx.current_user);
        canvas.text(
            &msg,
            (canvas.width() as i32 - text_width(&msg, 3)) / 2,
            canvas.height() as i32 / 2 - 60,
            3,
            0xFFF0F0F0,
        );
        self.yes.draw(canvas, input.events);
        self.no.draw(canvas, input.events);
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

    fn type_name(ctx: &mut Context, name: &str) {
        ctx.keyboard.buffer = name.to_string();
    }

    #[test]
    fn login_enter_routes_to_confirmation_even_for_known_names() {
        let mut ctx = context();
        ctx.records.register("ANA");
        let mut screen = LoginScreen::new(1280.0, 720.0);
        screen.on_enter(&mut ctx);
        type_name(&mut ctx, "ANA");
        // ENTER button sits at keyboard origin + (140, 280); origin is
        // (1280/2 - 240, 200) = (400, 200).
        let t = frame(&mut screen, &mut ctx, &[click_at(560.0, 500.0)]);
        assert_eq!(t, Transition::To(StateId::ConfirmAction));
        assert_eq!(ctx.confirm_purpose, ConfirmPurpose::Login);
        assert!(ctx.is_guest); // nothing logged in until YES
    }

    #[test]
    fn unknown_name_routes_to_confirmation() {
        let mut ctx = context();
        let mut screen = LoginScreen::new(1280.0, 720.0);
        screen.on_enter(&mut ctx);
        type_name(&mut ctx, "NEW");
        let t = frame(&mut screen, &mut ctx, &[click_at(560.0, 500.0)]);
        assert_eq!(t, Transition::To(StateId::ConfirmAction));
        assert_eq!(ctx.confirm_purpose, ConfirmPurpose::Login);
        assert!(!ctx.records.contains("NEW")); // not registered yet
    }

    #[test]
    fn guest_button_skips_login() {
        let mut ctx = context();
        let mut screen = LoginScreen::new(1280.0, 720.0);
        // Guest button at (920, 560), 260×60.
        let t = frame(&mut screen, &mut ctx, &[click_at(950.0, 580.0)]);
        assert_eq!(t, Transition::To(StateId::Menu));
        assert!(ctx.is_guest);
    }

    #[test]
    fn confirm_yes_registers_and_logs_in() {
        let mut ctx = context();
        ctx.confirm_purpose = ConfirmPurpose::Login;
        type_name(&mut ctx, "NEW");
        let mut screen = ConfirmActionScreen::new(1280.0, 720.0);
        // YES at (420, 400).
        let t = frame(&mut screen, &mut ctx, &[click_at(430.0, 420.0)]);
        assert_eq!(t, Transition::To(StateId::Menu));
        assert!(ctx.records.contains("NEW"));
        assert_eq!(ctx.current_user, "NEW");
    }

    #[test]
    fn confirm_yes_for_add_user_lands_on_records_as_the_new_name() {
        let mut ctx = context();
        ctx.log_in("ANA");
        ctx.records.register("ANA");
        ctx.confirm_purpose = ConfirmPurpose::AddUser;
        type_name(&mut ctx, "BOB");
        let mut screen = ConfirmActionScreen::new(1280.0, 720.0);
        let t = frame(&mut screen, &mut ctx, &[click_at(430.0, 420.0)]);
        assert_eq!(t, Transition::To(StateId::Records));
        assert!(ctx.records.contains("BOB"));
        assert_eq!(ctx.current_user, "BOB");
        assert!(!ctx.is_guest);
    }

    #[test]
    fn confirm_yes_is_idempotent_for_existing_names() {
        let mut ctx = context();
        ctx.records.register("ANA");
        ctx.records.add_score("ANA", 9, score_records::Difficulty::Easy);
        ctx.confirm_purpose = ConfirmPurpose::Login;
        type_name(&mut ctx, "ANA");
        let mut screen = ConfirmActionScreen::new(1280.0, 720.0);
        let t = frame(&mut screen, &mut ctx, &[click_at(430.0, 420.0)]);
        assert_eq!(t, Transition::To(StateId::Menu));
        assert_eq!(ctx.current_user, "ANA");
        // Existing records survive the no-op registration.
        let rec = ctx
            .records
            .record("ANA", score_records::Difficulty::Easy)
            .unwrap();
        assert_eq!(rec.best_score, 9);
        assert_eq!(ctx.records.list_users(), vec!["ANA".to_string()]);
    }

    #[test]
    fn confirm_no_returns_to_entry_screen_without_registering() {
        let mut ctx = context();
        ctx.confirm_purpose = ConfirmPurpose::AddUser;
        type_name(&mut ctx, "BOB");
        let mut screen = ConfirmActionScreen::new(1280.0, 720.0);
        // NO at (660, 400).
        let t = frame(&mut screen, &mut ctx, &[click_at(680.0, 420.0)]);
        assert_eq!(t, Transition::To(StateId::AddUserInput));
        assert!(!ctx.records.contains("BOB"));
        assert_eq!(ctx.keyboard.buffer, "BOB"); // kept for editing
    }

    #[test]
    fn add_user_enter_routes_to_confirmation_even_for_taken_names() {
        let mut ctx = context();
        ctx.records.register("ANA");
        let mut screen = AddUserScreen::new(1280.0, 720.0);
        screen.on_enter(&mut ctx);
        type_name(&mut ctx, "ANA");
        let t = frame(&mut screen, &mut ctx, &[click_at(560.0, 500.0)]);
        assert_eq!(t, Transition::To(StateId::ConfirmAction));
        assert_eq!(ctx.confirm_purpose, ConfirmPurpose::AddUser);
    }

    #[test]
    fn add_user_back_returns_to_records() {
        let mut ctx = context();
        let mut screen = AddUserScreen::new(1280.0, 720.0);
        screen.on_enter(&mut ctx);
        // BACK at (920, 560).
        let t = frame(&mut screen, &mut ctx, &[click_at(940.0, 580.0)]);
        assert_eq!(t, Transition::To(StateId::Records));
    }

    #[test]
    fn delete_yes_removes_user_and_returns_to_login() {
        let mut ctx = context();
        ctx.records.register("ANA");
        ctx.log_in("ANA");
        let mut screen = ConfirmDeleteScreen::new(1280.0, 720.0);
        let t = frame(&mut screen, &mut ctx, &[click_at(430.0, 420.0)]);
        assert_eq!(t, Transition::To(StateId::Login));
        assert!(!ctx.records.contains("ANA"));
        assert!(ctx.is_guest);
    }

    #[test]
    fn delete_no_returns_to_records() {
        let mut ctx = context();
        ctx.records.register("ANA");
        ctx.log_in("ANA");
        let mut screen = ConfirmDeleteScreen::new(1280.0, 720.0);
        let t = frame(&mut screen, &mut ctx, &[click_at(680.0, 420.0)]);
        assert_eq!(t, Transition::To(StateId::Records));
        assert!(ctx.records.contains("ANA"));
    }
}
