use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use arcade_legends::boxing::{BoxingEngine, BoxingState, Fighter, GameMode};
use arcade_legends::helicopter::{HeliMode, HelicopterEngine, HelicopterState, Hostile, HostileKind};
use arcade_legends::sim::input::heli_keys;
use arcade_legends::sim::{InputSource, NoInput, SharedLatch};
use arcade_legends::tuning::AiTuning;
use arcade_legends::{Engine, EngineError, Settings};

const FRAME_MS: f64 = 1000.0 / 60.0;

/// Records how often the engine subscribes and unsubscribes
struct CountingSource {
    attached: Rc<Cell<u32>>,
    detached: Rc<Cell<u32>>,
}

impl InputSource for CountingSource {
    fn attach(&mut self, _latch: SharedLatch) -> Result<(), EngineError> {
        self.attached.set(self.attached.get() + 1);
        Ok(())
    }

    fn detach(&mut self) {
        self.detached.set(self.detached.get() + 1);
    }
}

fn quiet_settings() -> Settings {
    let mut settings = Settings {
        seed: Some(11),
        ai: AiTuning::passive(),
        ..Settings::default()
    };
    settings.helicopter.spawn_base_ms = 1.0e9;
    settings.helicopter.spawn_floor_ms = 1.0e9;
    settings
}

/// Feed frames `from..=to` at 60 Hz, returning the ticks run
fn drive<S: arcade_legends::Simulation>(engine: &mut Engine<S>, from: u32, to: u32) -> usize {
    (from..=to).map(|i| engine.frame(i as f64 * FRAME_MS)).sum()
}

#[test]
fn held_trigger_fires_at_most_five_times_a_second() {
    let state = HelicopterState::new(1, &quiet_settings());
    let mut engine: HelicopterEngine = Engine::new(state, Box::new(NoInput)).unwrap();
    engine.input().borrow_mut().press(heli_keys::FIRE);

    engine.start();
    let mut ids = HashSet::new();
    for i in 0..=60 {
        engine.frame(i as f64 * FRAME_MS);
        ids.extend(engine.sim().fireballs.iter().map(|f| f.id));
    }

    assert!(ids.len() <= 5, "{} shots", ids.len());
    assert!(ids.len() >= 4);
}

#[test]
fn stop_halts_ticks_and_start_does_not_catch_up() {
    let state = HelicopterState::new(1, &quiet_settings());
    let mut engine: HelicopterEngine = Engine::new(state, Box::new(NoInput)).unwrap();

    engine.start();
    assert!(drive(&mut engine, 0, 30) > 0);
    engine.stop();
    engine.stop();

    let clock = engine.sim().clock_ms;
    assert_eq!(drive(&mut engine, 31, 600), 0);
    assert_eq!(engine.sim().clock_ms, clock);

    // Ten seconds later: the first frame only re-arms the clock
    engine.start();
    assert_eq!(engine.frame(10_000.0), 0);
    let ticks = engine.frame(10_000.0 + 3.5 * FRAME_MS);
    assert_eq!(ticks, 3);
}

#[test]
fn restart_keeps_subscription_and_stats_hook() {
    let attached = Rc::new(Cell::new(0));
    let detached = Rc::new(Cell::new(0));
    let source = CountingSource {
        attached: Rc::clone(&attached),
        detached: Rc::clone(&detached),
    };

    let state = HelicopterState::new(1, &quiet_settings());
    let mut engine: HelicopterEngine = Engine::new(state, Box::new(source)).unwrap();
    let seen = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&seen);
    engine.on_stats(move |_| *sink.borrow_mut() += 1);

    engine.start();
    let first = drive(&mut engine, 0, 20);
    assert_eq!(*seen.borrow(), first);

    engine.restart();
    engine.restart();
    assert!(engine.is_running());
    let second = drive(&mut engine, 21, 40);
    assert_eq!(*seen.borrow(), first + second);
    assert_eq!(attached.get(), 1);
    assert_eq!(detached.get(), 0);

    drop(engine);
    assert_eq!(detached.get(), 1);
}

#[test]
fn helicopter_game_over_then_restart() {
    let state = HelicopterState::new(1, &quiet_settings());
    let mut engine: HelicopterEngine = Engine::new(state, Box::new(NoInput)).unwrap();

    {
        let sim = engine.sim_mut();
        sim.helicopter.health = 20.0;
        let profile = *sim.tuning.profile(HostileKind::Scout);
        sim.hostiles.push(Hostile {
            id: 500,
            kind: HostileKind::Scout,
            pos: sim.helicopter.pos,
            vel: glam::Vec2::ZERO,
            size: profile.size,
            health: profile.health,
            active: true,
            pattern: 0.0,
        });
    }

    engine.start();
    drive(&mut engine, 0, 10);
    assert!(engine.is_terminal());
    assert_eq!(engine.sim().mode, HeliMode::GameOver);

    let frozen = engine.sim().clock_ms;
    drive(&mut engine, 11, 60);
    assert_eq!(engine.sim().clock_ms, frozen);

    engine.restart();
    assert!(!engine.is_terminal());
    let stats = engine.stats();
    assert_eq!(stats.level, 1);
    assert_eq!(stats.score, 0);
    assert_eq!(engine.sim().helicopter.health, 100.0);
}

#[test]
fn boxing_restart_keeps_career_rewards() {
    let settings = quiet_settings();
    let state = BoxingState::new(Fighter::EvanderHolyfield, 11, &settings);
    let mut engine: BoxingEngine = Engine::new(state, Box::new(NoInput)).unwrap();

    engine.start();
    drive(&mut engine, 0, 120);
    assert!(engine.stats().timer < 180);

    {
        let sim = engine.sim_mut();
        sim.mode = GameMode::Victory;
        sim.boxers[0].coins = 250;
        sim.boxers[0].trophies = 1;
    }
    assert!(engine.is_terminal());

    engine.restart();
    let stats = engine.stats();
    assert_eq!(stats.mode, GameMode::Fighting);
    assert_eq!(stats.round, 1);
    assert_eq!(stats.timer, 180);
    assert_eq!(stats.round_wins, [0, 0]);
    assert_eq!(stats.coins, 250);
    assert_eq!(stats.trophies, 1);
}

#[test]
fn settings_json_flows_into_engines() {
    let settings = Settings::from_json(r#"{ "quality": "Low", "helicopter": { "fire_interval_ms": 500.0 } }"#).unwrap();
    let state = HelicopterState::new(1, &settings);
    assert_eq!(state.particles.cap(), 100);
    assert_eq!(state.tuning.fire_interval_ms, 500.0);
    assert_eq!(state.tuning.fireball_damage, 25.0);
}
