//! Top-level driver: window, hand source, classifier, screen machine.

use std::sync::mpsc;
use std::time::Instant;

use hand_gesture::{CursorEvent, GestureClassifier};
use score_records::RecordsStore;

use crate::config::AppConfig;
use crate::icons::IconLibrary;
use crate::perception::{HandSource, SimHandSource};
use crate::screens::{screen_for, Context, FrameInput, StateId, Transition};
use crate::surface::{Canvas, Surface};

/// Run the game until the menu's EXIT, the Escape key, or a closed window.
pub fn run(cfg: AppConfig) -> Result<(), String> {
    let (w, h) = (cfg.width as f32, cfg.height as f32);

    // A corrupt records file is an error, not a silent wipe.
    let records = RecordsStore::open(&cfg.records_path).map_err(|e| e.to_string())?;
    let icons = IconLibrary::load(&cfg.icons_dir);
    let classifier = GestureClassifier::new(w, h)
        .with_thresholds(cfg.pinch_threshold, cfg.fist_threshold);

    let (pointer_tx, pointer_rx) = mpsc::channel();
    let mut surface = Surface::new("Hand Arcade", cfg.width, cfg.height, pointer_tx)?;
    let mut source = SimHandSource::new(pointer_rx);

    let mut ctx = Context::new(w, h, records, icons, classifier);
    let mut state = StateId::Login;
    let mut screen = screen_for(state, w, h);
    screen.on_enter(&mut ctx);
    log::info!("starting at {state:?}");

    while ctx.running && surface.poll_input() {
        let hands = match source.next_frame() {
            Ok(hands) => hands,
            Err(e) => {
                log::error!("hand source: {e}");
                break;
            }
        };
        let events: Vec<CursorEvent> =
            hands.iter().map(|hand| ctx.classifier.classify(hand)).collect();

        let input = FrameInput {
            events: &events,
            now: Instant::now(),
        };
        let transition = screen.on_frame(&mut ctx, surface.canvas(), &input);

        draw_cursors(surface.canvas(), &events);
        surface.present();

        if let Transition::To(next) = transition {
            screen.on_exit(&mut ctx);
            log::debug!("{state:?} -> {next:?}");
            state = next;
            screen = screen_for(state, w, h);
            screen.on_enter(&mut ctx);
        }
    }

    log::info!("shutting down from {state:?}");
    Ok(())
}

/// Cursor overlay on top of whatever the screen drew: one marker per
/// tracked hand, colored by gesture.
fn draw_cursors(canvas: &mut dyn Canvas, events: &[CursorEvent]) {
    for e in events {
        let color = if e.fist {
            0xFFFF4040
        } else if e.pinching {
            0xFF40FF70
        } else {
            0xFFF0F0F0
        };
        let (x, y) = (e.pos.x as i32, e.pos.y as i32);
        canvas.stroke_circle(x, y, 12, color);
        if e.pinching {
            canvas.fill_circle(x, y, 5, color);
        } else {
            // Open pinch: show the thumb-index span collapsing toward the
            // click threshold.
            let (a, b) = e.pinch_span;
            canvas.line(a.x as i32, a.y as i32, b.x as i32, b.y as i32, color);
        }
        if e.fist {
            canvas.stroke_circle(e.palm.x as i32, e.palm.y as i32, 20, color);
        }
    }
}
