//! Records browsing and account switching.

use score_records::Difficulty;

use crate::surface::{text_width, Canvas};
use crate::ui::{Button, USER_LIST_CAP};

use super::{draw_chrome, Context, FrameInput, Screen, StateId, Transition};

// ════════════════════════════════════════════════════════════════════════════
// RecordsScreen
// ════════════════════════════════════════════════════════════════════════════

/// Per-difficulty best score and recent history for the logged-in user,
/// plus the account-management hub: switch user, add user, delete user.
/// Guests see a placeholder and no delete button.
pub struct RecordsScreen {
    switch_user: Button,
    add_user: Button,
    delete: Option<Button>,
    back: Button,
}

impl RecordsScreen {
    pub fn new(width: f32, height: f32) -> Self {
        let cx = width / 2.0;
        let y = height - 120.0;
        RecordsScreen {
            switch_user: Button::new("SWITCH USER", cx - 480.0, y).with_size(220.0, 60.0),
            add_user: Button::new("ADD USER", cx - 240.0, y).with_size(220.0, 60.0),
            delete: Some(
                Button::new("DELETE USER", cx, y)
                    .with_size(220.0, 60.0)
                    .with_color(0xFFE05050),
            ),
            back: Button::new("BACK", cx + 240.0, y),
        }
    }
}

impl Screen for RecordsScreen {
    fn on_enter(&mut self, ctx: &mut Context) {
        if ctx.is_guest {
            self.delete = None;
        }
    }

    fn on_frame(
        &mut self,
        ctx: &mut Context,
        canvas: &mut dyn Canvas,
        input: &FrameInput<'_>,
    ) -> Transition {
        if self.switch_user.clicked(input.events) {
            return Transition::To(StateId::SwitchUserSelect);
        }
        if self.add_user.clicked(input.events) {
            // Entry screen clears the shared buffer itself on enter.
            return Transition::To(StateId::AddUserInput);
        }
        if let Some(delete) = &self.delete {
            if delete.clicked(input.events) {
                return Transition::To(StateId::ConfirmDelete);
            }
        }
        if self.back.clicked(input.events) {
            return Transition::To(StateId::Menu);
        }

        draw_chrome(canvas, "RECORDS");
        let cx = canvas.width() as i32 / 2;

        if ctx.is_guest {
            let msg = "LOG IN TO KEEP RECORDS";
            canvas.text(msg, cx - text_width(msg, 4) / 2, 300, 4, 0xFFB0B0C0);
        } else {
            let who = format!("PLAYER: {}", ctx.current_user);
            canvas.text(&who, cx - text_width(&who, 3) / 2, 130, 3, 0xFFB0B0C0);

            for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
                let y = 200 + i as i32 * 110;
                let line = match ctx.records.record(&ctx.current_user, *difficulty) {
                    Some(rec) => {
                        // Last five scores, newest first.
                        let recent: Vec<String> = rec
                            .history
                            .iter()
                            .rev()
                            .take(5)
                            .map(|s| s.to_string())
                            .collect();
                        format!(
                            "{}: BEST {} ({})",
                            difficulty.label(),
                            rec.best_score,
                            recent.join(", ")
                        )
                    }
                    None => format!("{}: NO GAMES YET", difficulty.label()),
                };
                canvas.text(&line, cx - text_width(&line, 3) / 2, y, 3, 0xFFF0F0F0);
            }
        }

        self.switch_user.draw(canvas, input.events);
        self.add_user.draw(canvas, input.events);
        if let Some(delete) = &self.delete {
            delete.draw(canvas, input.events);
        }
        self.back.draw(canvas, input.events);
        Transition::Stay
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SwitchUserScreen
// ════════════════════════════════════════════════════════════════════════════

/// Pick an existing account from a grid.  The grid is built on entry,
/// sorted, and capped at [`USER_LIST_CAP`] names.
pub struct SwitchUserScreen {
    users: Vec<Button>,
    back: Button,
}

impl SwitchUserScreen {
    pub fn new(width: f32, height: f32) -> Self {
        SwitchUserScreen {
            users: Vec::new(),
            back: Button::new("BACK", width / 2.0 - 100.0, height - 120.0),
        }
    }
}

impl Screen for SwitchUserScreen {
    fn on_enter(&mut self, ctx: &mut Context) {
        let names = ctx.records.list_users();
        let shown = names.len().min(USER_LIST_CAP);
        if shown < names.len() {
            log::warn!("{} users, showing first {shown}", names.len());
        }
        self.users = names
            .into_iter()
            .take(USER_LIST_CAP)
            .enumerate()
            .map(|(i, name)| {
                let col = (i % 3) as f32;
                let row = (i / 3) as f32;
                Button::new(&name, 280.0 + col * 260.0, 160.0 + row * 80.0)
            })
            .collect();
    }

    fn on_frame(
        &mut self,
        ctx: &mut Context,
        canvas: &mut dyn Canvas,
        input: &FrameInput<'_>,
    ) -> Transition {
        for b in &self.users {
            if b.clicked(input.events) {
                let name = b.label.clone();
                ctx.log_in(&name);
                return Transition::To(StateId::Menu);
            }
        }
        if self.back.clicked(input.events) {
            return Transition::To(StateId::Records);
        }

        draw_chrome(canvas, "SWITCH USER");
        if self.users.is_empty() {
            let msg = "NO ACCOUNTS YET";
            canvas.text(
                msg,
                (canvas.width() as i32 - text_width(msg, 4)) / 2,
                300,
                4,
                0xFFB0B0C0,
            );
        }
        for b in &self.users {
            b.draw(canvas, input.events);
        }
        self.back.draw(canvas, input.events);
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

    #[test]
    fn guest_records_hides_the_delete_button() {
        let mut ctx = context();
        let mut screen = RecordsScreen::new(1280.0, 720.0);
        screen.on_enter(&mut ctx);
        assert!(screen.delete.is_none());
        // A click where DELETE USER would sit does nothing.
        let t = frame(&mut screen, &mut ctx, &[click_at(680.0, 620.0)]);
        assert_eq!(t, Transition::Stay);
    }

    #[test]
    fn delete_button_routes_to_confirmation() {
        let mut ctx = context();
        ctx.records.register("ANA");
        ctx.log_in("ANA");
        let mut screen = RecordsScreen::new(1280.0, 720.0);
        screen.on_enter(&mut ctx);
        // DELETE USER at (660, 600), 240×60.
        let t = frame(&mut screen, &mut ctx, &[click_at(680.0, 620.0)]);
        assert_eq!(t, Transition::To(StateId::ConfirmDelete));
        assert!(ctx.records.contains("ANA")); // not deleted yet
    }

    #[test]
    fn records_back_returns_to_menu() {
        let mut ctx = context();
        let mut screen = RecordsScreen::new(1280.0, 720.0);
        screen.on_enter(&mut ctx);
        // BACK at (880, 600).
        let t = frame(&mut screen, &mut ctx, &[click_at(900.0, 620.0)]);
        assert_eq!(t, Transition::To(StateId::Menu));
    }

    #[test]
    fn records_hosts_switch_and_add_entry_points() {
        let mut ctx = context();
        let mut screen = RecordsScreen::new(1280.0, 720.0);
        screen.on_enter(&mut ctx);
        // SWITCH USER at (160, 600).
        assert_eq!(
            frame(&mut screen, &mut ctx, &[click_at(180.0, 620.0)]),
            Transition::To(StateId::SwitchUserSelect)
        );
        // ADD USER at (400, 600).
        assert_eq!(
            frame(&mut screen, &mut ctx, &[click_at(420.0, 620.0)]),
            Transition::To(StateId::AddUserInput)
        );
    }

    #[test]
    fn switch_user_grid_logs_in_the_picked_name() {
        let mut ctx = context();
        ctx.records.register("ANA");
        ctx.records.register("BOB");
        let mut screen = SwitchUserScreen::new(1280.0, 720.0);
        screen.on_enter(&mut ctx);
        assert_eq!(screen.users.len(), 2);
        // Sorted order: ANA first at (280, 160), BOB at (540, 160).
        let t = frame(&mut screen, &mut ctx, &[click_at(560.0, 180.0)]);
        assert_eq!(t, Transition::To(StateId::Menu));
        assert_eq!(ctx.current_user, "BOB");
        assert!(!ctx.is_guest);
    }

    #[test]
    fn switch_user_grid_is_capped() {
        let mut ctx = context();
        for i in 0..20 {
            ctx.records.register(&format!("USER{i:02}"));
        }
        let mut screen = SwitchUserScreen::new(1280.0, 720.0);
        screen.on_enter(&mut ctx);
        assert_eq!(screen.users.len(), USER_LIST_CAP);
    }

    #[test]
    fn switch_user_back_returns_to_records() {
        let mut ctx = context();
        ctx.records.register("ANA");
        let mut screen = SwitchUserScreen::new(1280.0, 720.0);
        screen.on_enter(&mut ctx);
        // BACK at (540, 600).
        let t = frame(&mut screen, &mut ctx, &[click_at(560.0, 620.0)]);
        assert_eq!(t, Transition::To(StateId::Records));
        assert!(ctx.is_guest); // nothing was picked
    }
}
