//! Enemy icon loading.
//!
//! Icons are optional RGBA PNGs picked up from the configured directory:
//!
//! ```text
//! icons/pinch/*.png          basic enemies (tier 0)
//! icons/fist/*.png           special enemies (tier 0)
//! icons/boss/*.png           bosses (tier 0)
//! icons/elite/pinch/*.png    … tier 1, active after the first boss kill
//! icons/elite/fist/*.png
//! icons/elite/boss/*.png
//! ```
//!
//! Missing directories are fine — enemies fall back to shapes.  Each spawned
//! enemy stores an index into the set it was rolled from, so the sprite an
//! enemy wears never changes mid-flight even when the active tier swaps.

use std::path::Path;

use crate::sim::EnemyKind;
use crate::surface::Sprite;

/// Number of icon tiers (base + elite).
pub const TIER_COUNT: usize = 2;

#[derive(Default)]
struct IconSet {
    basic: Vec<Sprite>,
    special: Vec<Sprite>,
    boss: Vec<Sprite>,
}

impl IconSet {
    fn bucket(&self, kind: EnemyKind) -> &Vec<Sprite> {
        match kind {
            EnemyKind::Basic => &self.basic,
            EnemyKind::Special => &self.special,
            EnemyKind::Boss => &self.boss,
        }
    }
}

#[derive(Default)]
pub struct IconLibrary {
    tiers: [IconSet; TIER_COUNT],
}

impl IconLibrary {
    /// An empty library — every enemy draws as a shape.
    pub fn empty() -> Self {
        IconLibrary::default()
    }

    /// Load whatever PNGs exist under `dir`.
    pub fn load<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let tier = |base: &Path| IconSet {
            basic: load_sprites(&base.join("pinch")),
            special: load_sprites(&base.join("fist")),
            boss: load_sprites(&base.join("boss")),
        };
        let lib = IconLibrary {
            tiers: [tier(dir), tier(&dir.join("elite"))],
        };
        log::info!(
            "icons: {} basic / {} special / {} boss (tier 0)",
            lib.count(EnemyKind::Basic, 0),
            lib.count(EnemyKind::Special, 0),
            lib.count(EnemyKind::Boss, 0),
        );
        lib
    }

    /// Icons available for `kind` at `tier` (0 when the dir was absent).
    pub fn count(&self, kind: EnemyKind, tier: usize) -> usize {
        self.tiers[tier.min(TIER_COUNT - 1)].bucket(kind).len()
    }

    pub fn sprite(&self, kind: EnemyKind, tier: usize, idx: usize) -> Option<&Sprite> {
        self.tiers[tier.min(TIER_COUNT - 1)].bucket(kind).get(idx)
    }
}

fn load_sprites(dir: &Path) -> Vec<Sprite> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut paths: Vec<_> = entries.flatten().map(|e| e.path()).collect();
    paths.sort();
    let mut sprites = Vec::new();
    for path in paths {
        match image::open(&path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let (w, h) = rgba.dimensions();
                let px = rgba.pixels().map(|p| p.0).collect();
                sprites.push(Sprite::new(w as usize, h as usize, px));
            }
            Err(e) => log::warn!("skipping icon {}: {e}", path.display()),
        }
    }
    sprites
}
