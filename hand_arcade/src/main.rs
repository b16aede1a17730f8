//! hand_arcade — interactive entry point.

use hand_arcade::app::run;
use hand_arcade::config::AppConfig;

fn main() {
    env_logger::init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Hand Arcade — Defend the Center by Hand Gesture       ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("  Pinch (left mouse / Z) to click and pop basic enemies");
    println!("  Fist  (right mouse / X) to smash special and boss enemies");
    println!("  Escape quits");
    println!();

    let path = std::env::args().nth(1).unwrap_or_else(|| "hand_arcade.toml".to_string());
    let cfg = AppConfig::load_or_default(&path);

    if let Err(e) = run(cfg) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
