//! Arcade Legends native entry point
//!
//! The games themselves run in the browser (the library's wasm bindings).
//! Natively this drives both engines headlessly through a scripted session
//! and prints their stats, which is handy for balance tweaks.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::RefCell;
    use std::rc::Rc;

    use arcade_legends::boxing::{BoxingEngine, BoxingState, Fighter};
    use arcade_legends::helicopter::{HelicopterEngine, HelicopterState};
    use arcade_legends::sim::input::{boxing_keys, heli_keys};
    use arcade_legends::sim::NoInput;
    use arcade_legends::{Engine, EngineError, Settings};

    /// Host refresh interval, ms
    const FRAME_MS: f64 = 1000.0 / 60.0;

    pub fn run() -> Result<(), EngineError> {
        let settings = match std::env::args().nth(1) {
            Some(path) => {
                log::info!("Reading settings from {}", path);
                Settings::from_json(&std::fs::read_to_string(path)?)?
            }
            None => Settings::default(),
        };
        let seed = settings.seed.unwrap_or(42);

        run_boxing(&settings, seed)?;
        run_helicopter(&settings, seed)?;
        Ok(())
    }

    /// Thirty seconds of the player alternating jabs and hooks
    fn run_boxing(settings: &Settings, seed: u64) -> Result<(), EngineError> {
        let state = BoxingState::new(Fighter::MuhammadAli, seed, settings);
        let mut engine: BoxingEngine = Engine::new(state, Box::new(NoInput))?;
        let input = engine.input();

        engine.start();
        for frame in 0..30 * 60 {
            {
                let mut latch = input.borrow_mut();
                latch.clear();
                latch.press(boxing_keys::RIGHT);
                match frame % 40 {
                    0 => latch.press(boxing_keys::JAB),
                    20 => latch.press(boxing_keys::HOOK),
                    _ => {}
                }
            }
            engine.frame(frame as f64 * FRAME_MS);
            if engine.is_terminal() {
                break;
            }
        }

        let stats = engine.stats();
        log::info!("Boxing finished in round {}", stats.round);
        println!("boxing: {}", serde_json::to_string(&stats)?);
        Ok(())
    }

    /// One minute of weaving while holding the trigger
    fn run_helicopter(settings: &Settings, seed: u64) -> Result<(), EngineError> {
        let state = HelicopterState::new(seed, settings);
        let mut engine: HelicopterEngine = Engine::new(state, Box::new(NoInput))?;
        let input = engine.input();

        let ticks = Rc::new(RefCell::new(0u64));
        let counter = Rc::clone(&ticks);
        engine.on_stats(move |_| *counter.borrow_mut() += 1);

        engine.start();
        for frame in 0..60 * 60 {
            {
                let mut latch = input.borrow_mut();
                latch.clear();
                latch.press(heli_keys::FIRE);
                if (frame / 90) % 2 == 0 {
                    latch.press(heli_keys::UP);
                } else {
                    latch.press(heli_keys::DOWN);
                }
            }
            engine.frame(frame as f64 * FRAME_MS);
            if engine.is_terminal() {
                break;
            }
        }

        log::info!("Helicopter ran {} ticks", ticks.borrow());
        println!("helicopter: {}", serde_json::to_string(&engine.stats())?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Arcade Legends (native) starting...");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser entry point lives in the library's `web` module
}
