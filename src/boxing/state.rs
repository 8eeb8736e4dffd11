//! Boxing game state and entity types
//!
//! One `BoxingState` per engine instance. It is the only thing the tick
//! mutates; skeleton poses are derived at render time and never stored here.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::roster::{Fighter, SpecialKind};
use crate::renderer::Color;
use crate::settings::Settings;
use crate::sim::{Aabb, Particle, ParticleKind, Particles, default_rng, jitter, seeded_rng};
use crate::tuning::{AiTuning, AttackProfile, BoxingTuning};

/// Which corner a boxer fights from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player, Side::Opponent];

    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Per-boxer finite state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoxerState {
    Idle,
    Walking,
    Jabbing,
    Hooking,
    Uppercut,
    Blocking,
    Hit,
    Special,
    KnockedDown,
}

impl BoxerState {
    /// States that own an `attack_frame` countdown
    pub fn is_attacking(self) -> bool {
        matches!(
            self,
            BoxerState::Jabbing | BoxerState::Hooking | BoxerState::Uppercut | BoxerState::Special
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// +1 facing right, -1 facing left
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stance {
    Orthodox,
    Southpaw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackKind {
    Jab,
    Hook,
    Uppercut,
    Special,
}

impl AttackKind {
    /// Animation state entered when the attack is thrown
    pub fn state(self) -> BoxerState {
        match self {
            AttackKind::Jab => BoxerState::Jabbing,
            AttackKind::Hook => BoxerState::Hooking,
            AttackKind::Uppercut => BoxerState::Uppercut,
            AttackKind::Special => BoxerState::Special,
        }
    }

    /// Melee profile; specials are projectiles and have none
    pub fn profile(self, tuning: &BoxingTuning) -> Option<AttackProfile> {
        match self {
            AttackKind::Jab => Some(tuning.jab),
            AttackKind::Hook => Some(tuning.hook),
            AttackKind::Uppercut => Some(tuning.uppercut),
            AttackKind::Special => None,
        }
    }

    /// Ticks the attack occupies
    pub fn frames(self, tuning: &BoxingTuning) -> u32 {
        match self.profile(tuning) {
            Some(p) => p.frames,
            None => tuning.special_frames,
        }
    }
}

/// A fighter in the ring. `pos` is the point between the feet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boxer {
    pub side: Side,
    pub fighter: Fighter,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub health: f32,
    pub stamina: f32,
    pub special_meter: f32,
    pub state: BoxerState,
    pub facing: Facing,
    pub stance: Stance,
    /// Ticks left in the current attack (0 = free to act)
    pub attack_frame: u32,
    pub attack_kind: Option<AttackKind>,
    pub block_active: bool,
    /// Ticks of invulnerability left
    pub invulnerable: u32,
    pub combo_count: u32,
    /// Simulation time (s) of the last landed hit
    pub last_hit: Option<f64>,
    /// Seconds left on the canvas
    pub knockdown_timer: f32,
    /// Seconds before the next special
    pub special_cooldown: f32,
    pub trophies: u32,
    pub coins: u32,
    /// Ticks the computer keeps its guard up
    #[serde(default)]
    pub ai_block_ticks: u32,
}

impl Boxer {
    pub fn new(side: Side, fighter: Fighter, tuning: &BoxingTuning) -> Self {
        let (facing, stance) = match side {
            Side::Player => (Facing::Right, Stance::Orthodox),
            Side::Opponent => (Facing::Left, Stance::Southpaw),
        };
        let mut boxer = Self {
            side,
            fighter,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: tuning.body_size,
            health: 0.0,
            stamina: 0.0,
            special_meter: 0.0,
            state: BoxerState::Idle,
            facing,
            stance,
            attack_frame: 0,
            attack_kind: None,
            block_active: false,
            invulnerable: 0,
            combo_count: 0,
            last_hit: None,
            knockdown_timer: 0.0,
            special_cooldown: 0.0,
            trophies: 0,
            coins: 0,
            ai_block_ticks: 0,
        };
        boxer.reset_for_round(tuning);
        boxer
    }

    /// Fresh corner: full health and stamina, empty meter, back at the start mark
    pub fn reset_for_round(&mut self, tuning: &BoxingTuning) {
        let start_x = match self.side {
            Side::Player => tuning.player_start_x,
            Side::Opponent => tuning.opponent_start_x,
        };
        self.pos = Vec2::new(start_x, tuning.floor_y);
        self.vel = Vec2::ZERO;
        self.health = tuning.max_health;
        self.stamina = tuning.max_stamina;
        self.special_meter = 0.0;
        self.state = BoxerState::Idle;
        self.attack_frame = 0;
        self.attack_kind = None;
        self.block_active = false;
        self.invulnerable = 0;
        self.knockdown_timer = 0.0;
        self.ai_block_ticks = 0;
    }

    /// Body box standing on `pos`
    pub fn hitbox(&self) -> Aabb {
        Aabb::standing(self.pos, self.size)
    }

    /// Drop whatever attack is in progress
    pub fn cancel_attack(&mut self) {
        self.attack_frame = 0;
        self.attack_kind = None;
    }
}

/// A flying special move
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialProjectile {
    pub id: u32,
    pub owner: Side,
    pub kind: SpecialKind,
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub damage: f32,
    /// Seconds left
    pub life: f32,
    pub active: bool,
}

impl SpecialProjectile {
    pub fn hitbox(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoxingParticleKind {
    Hit,
    Sweat,
    Fire,
    Lightning,
    Stars,
}

impl ParticleKind for BoxingParticleKind {
    fn gravity(self) -> f32 {
        match self {
            BoxingParticleKind::Hit | BoxingParticleKind::Sweat => 800.0,
            _ => 0.0,
        }
    }
}

impl BoxingParticleKind {
    pub fn color(self) -> Color {
        match self {
            BoxingParticleKind::Hit => Color::hex(0xff6666),
            BoxingParticleKind::Sweat => Color::hex(0x87ceeb),
            BoxingParticleKind::Fire => Color::hex(0xff4400),
            BoxingParticleKind::Lightning => Color::hex(0xffff00),
            BoxingParticleKind::Stars => Color::hex(0xffd700),
        }
    }
}

/// Coarse mode of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Fighting,
    /// Player took the match
    Victory,
    /// Opponent took the match
    Knockout,
}

/// Aggregate root for one boxing engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxingState {
    /// Player first, opponent second
    pub boxers: [Boxer; 2],
    pub projectiles: Vec<SpecialProjectile>,
    pub particles: Particles<BoxingParticleKind>,
    pub mode: GameMode,
    pub winner: Option<Side>,
    pub round: u32,
    pub round_wins: [u32; 2],
    /// Seconds left in the round
    pub timer: f32,
    /// Simulation seconds since the match began
    pub clock: f64,
    pub ring_shake: f32,
    pub crowd_noise: f32,
    pub screen_shake: bool,
    pub tuning: BoxingTuning,
    pub ai: AiTuning,
    pub seed: u64,
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    next_id: u32,
}

impl BoxingState {
    /// New match for `fighter` against an opponent drawn from the roster
    pub fn new(fighter: Fighter, seed: u64, settings: &Settings) -> Self {
        let mut rng = seeded_rng(seed);
        let opponent = Fighter::ALL[rng.random_range(0..Fighter::ALL.len())];
        let tuning = settings.boxing.clone();

        log::info!(
            "Boxing match: {} vs {} (seed {})",
            fighter.name(),
            opponent.name(),
            seed
        );

        Self {
            boxers: [
                Boxer::new(Side::Player, fighter, &tuning),
                Boxer::new(Side::Opponent, opponent, &tuning),
            ],
            projectiles: Vec::new(),
            particles: Particles::with_cap(settings.max_particles()),
            mode: GameMode::Fighting,
            winner: None,
            round: 1,
            round_wins: [0; 2],
            timer: tuning.round_secs,
            clock: 0.0,
            ring_shake: 0.0,
            crowd_noise: 0.0,
            screen_shake: settings.effective_screen_shake(),
            ai: settings.ai.clone(),
            tuning,
            seed,
            rng,
            next_id: 1,
        }
    }

    /// Back to round one of a new match with every meter full.
    /// Fighters, trophies, and coins are kept.
    pub fn reset(&mut self) {
        self.mode = GameMode::Fighting;
        self.winner = None;
        self.round = 1;
        self.round_wins = [0; 2];
        self.timer = self.tuning.round_secs;
        self.clock = 0.0;
        self.projectiles.clear();
        self.particles.clear();
        self.ring_shake = 0.0;
        self.crowd_noise = 0.0;

        for boxer in self.boxers.iter_mut() {
            boxer.reset_for_round(&self.tuning);
            boxer.special_meter = self.tuning.max_special_meter;
            boxer.combo_count = 0;
            boxer.last_hit = None;
            boxer.special_cooldown = 0.0;
        }
    }

    pub fn boxer(&self, side: Side) -> &Boxer {
        &self.boxers[side.index()]
    }

    pub fn boxer_mut(&mut self, side: Side) -> &mut Boxer {
        &mut self.boxers[side.index()]
    }

    /// (`side`, its opponent) borrowed together
    pub fn pair_mut(&mut self, side: Side) -> (&mut Boxer, &mut Boxer) {
        let [player, opponent] = &mut self.boxers;
        match side {
            Side::Player => (player, opponent),
            Side::Opponent => (opponent, player),
        }
    }

    pub fn player(&self) -> &Boxer {
        &self.boxers[0]
    }

    pub fn opponent(&self) -> &Boxer {
        &self.boxers[1]
    }

    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.mode != GameMode::Fighting
    }

    // === Effects ===

    /// Impact/sweat/stars burst around a boxer standing at `feet`
    pub fn burst(&mut self, kind: BoxingParticleKind, feet: Vec2) {
        let life = if kind == BoxingParticleKind::Stars {
            1.5
        } else {
            0.8
        };
        for _ in 0..12 {
            let pos = feet + Vec2::new(jitter(&mut self.rng, 60.0), jitter(&mut self.rng, 60.0) - 80.0);
            let vel = Vec2::new(
                jitter(&mut self.rng, 400.0),
                jitter(&mut self.rng, 400.0) - 200.0,
            );
            let size = self.rng.random::<f32>() * 8.0 + 3.0;
            self.particles.emit(Particle {
                pos,
                vel,
                life,
                max_life: life,
                color: kind.color(),
                size,
                kind,
            });
        }
    }

    /// Colored flare where a special is thrown or lands
    pub fn special_burst(&mut self, at: Vec2, special: SpecialKind) {
        let kind = if special.is_electric() {
            BoxingParticleKind::Lightning
        } else {
            BoxingParticleKind::Fire
        };
        for _ in 0..20 {
            let pos = at + Vec2::new(self.rng.random::<f32>() * 80.0, self.rng.random::<f32>() * 80.0);
            let vel = Vec2::new(jitter(&mut self.rng, 600.0), jitter(&mut self.rng, 600.0));
            let size = self.rng.random::<f32>() * 12.0 + 5.0;
            self.particles.emit(Particle {
                pos,
                vel,
                life: 1.2,
                max_life: 1.2,
                color: special.color(),
                size,
                kind,
            });
        }
    }

    /// Coins popping out of a paying event
    pub fn coin_burst(&mut self, at: Vec2) {
        for _ in 0..8 {
            let pos = at + Vec2::new(jitter(&mut self.rng, 60.0), jitter(&mut self.rng, 60.0) - 80.0);
            let vel = Vec2::new(
                jitter(&mut self.rng, 200.0),
                -self.rng.random::<f32>() * 300.0 - 100.0,
            );
            let size = self.rng.random::<f32>() * 8.0 + 6.0;
            self.particles.emit(Particle {
                pos,
                vel,
                life: 1.5,
                max_life: 1.5,
                color: Color::hex(0xffa500),
                size,
                kind: BoxingParticleKind::Hit,
            });
        }
    }

    /// Gold stars for the match winner
    pub fn trophy_burst(&mut self, feet: Vec2) {
        for _ in 0..15 {
            let pos = feet + Vec2::new(jitter(&mut self.rng, 80.0), jitter(&mut self.rng, 80.0) - 120.0);
            let vel = Vec2::new(
                jitter(&mut self.rng, 300.0),
                -self.rng.random::<f32>() * 400.0 - 200.0,
            );
            let size = self.rng.random::<f32>() * 12.0 + 8.0;
            self.particles.emit(Particle {
                pos,
                vel,
                life: 2.0,
                max_life: 2.0,
                color: Color::hex(0xffd700),
                size,
                kind: BoxingParticleKind::Stars,
            });
        }
    }
}
