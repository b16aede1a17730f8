//! Simulation engine — spawner, kinematics, collision, scoring.
//!
//! Active only while the game is in the Playing state.  One wall-clock
//! spawn timer per session; enemy positions advance once per tick by their
//! velocity, so speeds are in px/tick while spawn scheduling stays
//! frame-rate-independent.
//!
//! Collision is event-consuming and first-match-wins: enemies are processed
//! in spawn (= id) order, each taking the first unconsumed matching gesture
//! event in reach.  One event destroys at most one enemy; one enemy is
//! destroyed at most once; leftover events may still destroy later enemies
//! in the same tick.

use std::time::{Duration, Instant};

use rand::Rng;

use hand_gesture::{CursorEvent, Point};
use score_records::Difficulty;

use crate::icons::IconLibrary;

// ════════════════════════════════════════════════════════════════════════════
// Tuning constants
// ════════════════════════════════════════════════════════════════════════════

pub const ENEMY_RADIUS: f32 = 35.0;
pub const BOSS_RADIUS: f32 = 55.0;
/// Extra reach granted to a pinch click at collision time.
pub const PINCH_REACH: f32 = 30.0;
/// Extra reach granted to a fist strike.
pub const FIST_REACH: f32 = 40.0;
/// An enemy this close to the center ends the session.
pub const KILL_RADIUS: f32 = 40.0;

/// Boss gate: eligible once the session score reaches this, Normal/Hard
/// only, rolled before the special roll, at most one alive.
pub const BOSS_SCORE_GATE: u32 = 20;
pub const BOSS_CHANCE: f64 = 0.05;

// ════════════════════════════════════════════════════════════════════════════
// DifficultyParams
// ════════════════════════════════════════════════════════════════════════════

/// Per-difficulty constants.  A pure function of difficulty — never of
/// score; only enemy speed scales with score, via `speed_base + score *
/// speed_mult`.
#[derive(Clone, Copy, Debug)]
pub struct DifficultyParams {
    pub spawn_interval: Duration,
    pub speed_base: f32,
    pub speed_mult: f32,
    /// Probability a spawn is Special while specials are enabled.
    pub special_chance: f64,
}

pub fn params(difficulty: Difficulty) -> DifficultyParams {
    match difficulty {
        Difficulty::Easy => DifficultyParams {
            spawn_interval: Duration::from_millis(1500),
            speed_base: 2.0,
            speed_mult: 0.05,
            special_chance: 0.1,
        },
        Difficulty::Normal => DifficultyParams {
            spawn_interval: Duration::from_millis(1000),
            speed_base: 4.0,
            speed_mult: 0.1,
            special_chance: 0.3,
        },
        Difficulty::Hard => DifficultyParams {
            spawn_interval: Duration::from_millis(600),
            speed_base: 6.0,
            speed_mult: 0.2,
            special_chance: 0.5,
        },
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Enemy
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    /// Destroyed only by a pinch click.
    Basic,
    /// Destroyed only by a fist strike.
    Special,
    /// Destroyed only by a fist strike; upgrades the avatar on death.
    Boss,
}

impl EnemyKind {
    pub fn score_value(self) -> u32 {
        match self {
            EnemyKind::Basic => 1,
            EnemyKind::Special => 2,
            EnemyKind::Boss => 10,
        }
    }

    /// Collision reach added to the enemy radius, per gesture kind.
    pub fn reach(self) -> f32 {
        match self {
            EnemyKind::Basic => PINCH_REACH,
            EnemyKind::Special | EnemyKind::Boss => FIST_REACH,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub id: u64,
    pub pos: Point,
    pub vx: f32,
    pub vy: f32,
    /// Always > 0.
    pub radius: f32,
    pub kind: EnemyKind,
    /// Index into the icon set the enemy was rolled from, if any.
    pub icon: Option<usize>,
    /// Icon tier active at spawn time.
    pub icon_tier: usize,
}

// ════════════════════════════════════════════════════════════════════════════
// VisualState
// ════════════════════════════════════════════════════════════════════════════

/// Session-visible visual state threaded through the screen context —
/// deliberately not a process global.  The first boss kill upgrades the
/// avatar and swaps the active icon tier; the upgrade outlives any single
/// session and lasts for the rest of the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisualState {
    pub avatar_tier: usize,
}

impl VisualState {
    pub fn upgrade(&mut self) {
        self.avatar_tier = (self.avatar_tier + 1).min(crate::icons::TIER_COUNT - 1);
    }

    /// The icon set new spawns draw from.
    pub fn icon_tier(&self) -> usize {
        self.avatar_tier
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GameSession
// ════════════════════════════════════════════════════════════════════════════

/// What one tick of simulation did.
#[derive(Clone, Debug, Default)]
pub struct TickOutcome {
    pub spawned: u32,
    pub destroyed: Vec<EnemyKind>,
    /// An enemy reached the center — the session is over.
    pub breached: bool,
}

/// One Playing episode: score, enemy set, spawn timer.
pub struct GameSession {
    pub score: u32,
    pub difficulty: Difficulty,
    pub special_enabled: bool,
    pub enemies: Vec<Enemy>,
    params: DifficultyParams,
    arena_w: f32,
    arena_h: f32,
    center: Point,
    last_spawn: Instant,
    next_id: u64,
}

impl GameSession {
    pub fn new(
        difficulty: Difficulty,
        special_enabled: bool,
        arena_w: f32,
        arena_h: f32,
        now: Instant,
    ) -> Self {
        GameSession {
            score: 0,
            difficulty,
            special_enabled,
            enemies: Vec::new(),
            params: params(difficulty),
            arena_w,
            arena_h,
            center: Point::new(arena_w / 2.0, arena_h / 2.0),
            last_spawn: now,
            next_id: 0,
        }
    }

    /// Clear enemies, zero the score, restart the spawn timer.
    pub fn reset(&mut self, now: Instant) {
        self.enemies.clear();
        self.score = 0;
        self.last_spawn = now;
    }

    /// Re-anchor the spawn clock after time passed without ticks (coming
    /// back from pause), so the catch-up loop does not dump the backlog in
    /// one frame.
    pub fn resume(&mut self, now: Instant) {
        self.last_spawn = now;
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Advance one tick: spawn as scheduled, move every enemy, resolve
    /// gesture collisions, detect center breach.
    pub fn tick<R: Rng>(
        &mut self,
        now: Instant,
        events: &[CursorEvent],
        visual: &mut VisualState,
        icons: &IconLibrary,
        rng: &mut R,
    ) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        // ── spawn ─────────────────────────────────────────────────────────
        // Catch-up loop keeps spawn count = floor(elapsed / interval) even
        // after a slow frame.
        while now.duration_since(self.last_spawn) > self.params.spawn_interval {
            self.last_spawn += self.params.spawn_interval;
            self.spawn_enemy(visual, icons, rng);
            outcome.spawned += 1;
        }

        // ── gesture events, consumed first-match-wins ─────────────────────
        let mut clicks: Vec<(Point, bool)> = events
            .iter()
            .filter(|e| e.pinch_click)
            .map(|e| (e.pos, false))
            .collect();
        let mut strikes: Vec<(Point, bool)> = events
            .iter()
            .filter(|e| e.fist_strike)
            .map(|e| (e.palm, false))
            .collect();

        // ── advance + collide, one forward pass in id order ───────────────
        let enemies = std::mem::take(&mut self.enemies);
        for mut e in enemies {
            e.pos.x += e.vx;
            e.pos.y += e.vy;

            let pool = match e.kind {
                EnemyKind::Basic => &mut clicks,
                EnemyKind::Special | EnemyKind::Boss => &mut strikes,
            };
            let reach = e.radius + e.kind.reach();
            if let Some(hit) = pool
                .iter_mut()
                .find(|(pos, used)| !used && pos.dist(e.pos) < reach)
            {
                hit.1 = true;
                self.score += e.kind.score_value();
                if e.kind == EnemyKind::Boss {
                    log::info!("boss down at score {} — avatar upgraded", self.score);
                    visual.upgrade();
                }
                outcome.destroyed.push(e.kind);
                continue;
            }

            if e.pos.dist(self.center) < KILL_RADIUS {
                outcome.breached = true;
            }
            self.enemies.push(e);
        }

        outcome
    }

    /// Spawn one enemy at a uniform point on a uniformly chosen edge,
    /// heading straight for the center.
    fn spawn_enemy<R: Rng>(&mut self, visual: &VisualState, icons: &IconLibrary, rng: &mut R) {
        let pos = match rng.gen_range(0..4u8) {
            0 => Point::new(rng.gen_range(0.0..self.arena_w), 0.0),
            1 => Point::new(rng.gen_range(0.0..self.arena_w), self.arena_h),
            2 => Point::new(0.0, rng.gen_range(0.0..self.arena_h)),
            _ => Point::new(self.arena_w, rng.gen_range(0.0..self.arena_h)),
        };

        let kind = self.roll_kind(rng);
        let speed = self.params.speed_base + self.score as f32 * self.params.speed_mult;
        let angle = (self.center.y - pos.y).atan2(self.center.x - pos.x);

        let tier = visual.icon_tier();
        let icon_count = icons.count(kind, tier);
        let icon = if icon_count > 0 {
            Some(rng.gen_range(0..icon_count))
        } else {
            None
        };

        self.enemies.push(Enemy {
            id: self.next_id,
            pos,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            radius: match kind {
                EnemyKind::Boss => BOSS_RADIUS,
                _ => ENEMY_RADIUS,
            },
            kind,
            icon,
            icon_tier: tier,
        });
        self.next_id += 1;
    }

    fn roll_kind<R: Rng>(&self, rng: &mut R) -> EnemyKind {
        let boss_alive = self.enemies.iter().any(|e| e.kind == EnemyKind::Boss);
        let boss_eligible = self.difficulty != Difficulty::Easy
            && self.score >= BOSS_SCORE_GATE
            && !boss_alive;
        if boss_eligible && rng.gen_bool(BOSS_CHANCE) {
            return EnemyKind::Boss;
        }
        if self.special_enabled && rng.gen_bool(self.params.special_chance) {
            return EnemyKind::Special;
        }
        EnemyKind::Basic
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
