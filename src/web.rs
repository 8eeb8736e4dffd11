//! Browser bindings
//!
//! Each game owns a canvas, a window keyboard subscription, and an
//! animation-frame loop that runs only between `start` and `stop`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, KeyboardEvent, Window};

use crate::boxing::{BoxingState, Fighter};
use crate::consts::{BOXING_HEIGHT, BOXING_WIDTH, HELI_HEIGHT, HELI_WIDTH};
use crate::engine::{Engine, Simulation};
use crate::error::EngineError;
use crate::helicopter::HelicopterState;
use crate::renderer::CanvasSurface;
use crate::settings::Settings;
use crate::sim::input::{boxing_keys, heli_keys};
use crate::sim::{InputSource, SharedLatch};

const BOXING_CODES: &[&str] = &[
    boxing_keys::LEFT,
    boxing_keys::RIGHT,
    boxing_keys::JAB,
    boxing_keys::HOOK,
    boxing_keys::UPPERCUT,
    boxing_keys::SPECIAL,
    boxing_keys::BLOCK,
];

const HELI_CODES: &[&str] = &[
    heli_keys::UP,
    heli_keys::DOWN,
    heli_keys::LEFT,
    heli_keys::RIGHT,
    heli_keys::FIRE,
];

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
}

fn window() -> Result<Window, EngineError> {
    web_sys::window().ok_or_else(|| EngineError::Js("no window".into()))
}

// === Keyboard ===

type KeyListener = Closure<dyn FnMut(KeyboardEvent)>;

/// Window keydown/keyup listeners feeding a latch.
///
/// Only `codes` are latched (and have their default action suppressed, so
/// Space does not scroll the page).
pub struct WindowKeys {
    window: Window,
    codes: &'static [&'static str],
    listeners: Vec<(&'static str, KeyListener)>,
}

impl WindowKeys {
    pub fn new(codes: &'static [&'static str]) -> Result<Self, EngineError> {
        Ok(Self {
            window: window()?,
            codes,
            listeners: Vec::new(),
        })
    }
}

impl InputSource for WindowKeys {
    fn attach(&mut self, latch: SharedLatch) -> Result<(), EngineError> {
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let latch = latch.clone();
            let codes = self.codes;
            let listener = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if !codes.contains(&code.as_str()) {
                    return;
                }
                event.prevent_default();
                if let Ok(mut latch) = latch.try_borrow_mut() {
                    if pressed {
                        latch.press(&code);
                    } else {
                        latch.release(&code);
                    }
                }
            });
            self.window
                .add_event_listener_with_callback(event_name, listener.as_ref().unchecked_ref())
                .map_err(|e| EngineError::Js(format!("{:?}", e)))?;
            self.listeners.push((event_name, listener));
        }
        Ok(())
    }

    fn detach(&mut self) {
        for (event_name, listener) in self.listeners.drain(..) {
            let _ = self
                .window
                .remove_event_listener_with_callback(event_name, listener.as_ref().unchecked_ref());
        }
        log::debug!("Keyboard listeners removed");
    }
}

// === Frame loop ===

struct Runner<S: Simulation> {
    engine: Engine<S>,
    surface: CanvasSurface,
    raf_id: Option<i32>,
}

impl<S: Simulation> Runner<S> {
    fn paint(&self) {
        self.surface.paint(&self.engine.render());
    }
}

/// Generic handle behind both exported game classes
struct GameLoop<S: Simulation + 'static> {
    runner: Rc<RefCell<Runner<S>>>,
    /// Stats produced during a frame, delivered once the engine is released
    pending: Rc<RefCell<Vec<S::Stats>>>,
    on_stats: Option<js_sys::Function>,
}

impl<S> GameLoop<S>
where
    S: Simulation + 'static,
    S::Stats: Serialize + 'static,
{
    fn new(
        sim: S,
        canvas: HtmlCanvasElement,
        size: (f32, f32),
        codes: &'static [&'static str],
        on_stats: Option<js_sys::Function>,
    ) -> Result<Self, EngineError> {
        let surface = CanvasSurface::new(canvas, size.0, size.1)?;
        let mut engine = Engine::new(sim, Box::new(WindowKeys::new(codes)?))?;

        let pending = Rc::new(RefCell::new(Vec::new()));
        if on_stats.is_some() {
            let sink = Rc::clone(&pending);
            engine.on_stats(move |stats| sink.borrow_mut().push(stats));
        }

        let runner = Runner {
            engine,
            surface,
            raf_id: None,
        };
        runner.paint();

        Ok(Self {
            runner: Rc::new(RefCell::new(runner)),
            pending,
            on_stats,
        })
    }

    fn start(&self) -> Result<(), EngineError> {
        let needs_frame = {
            let mut r = self.runner.borrow_mut();
            r.engine.start();
            r.engine.wants_frame(r.raf_id.is_some())
        };
        if needs_frame {
            schedule(
                Rc::downgrade(&self.runner),
                Rc::clone(&self.pending),
                self.on_stats.clone(),
            )?;
        }
        Ok(())
    }

    fn stop(&self) {
        let mut r = self.runner.borrow_mut();
        r.engine.stop();
        if let (Some(id), Ok(window)) = (r.raf_id.take(), window()) {
            let _ = window.cancel_animation_frame(id);
        }
        self.pending.borrow_mut().clear();
    }

    fn restart(&self) {
        let mut r = self.runner.borrow_mut();
        r.engine.restart();
        r.paint();
    }

    fn stats_json(&self) -> Result<String, EngineError> {
        let stats = self.runner.borrow().engine.stats();
        Ok(serde_json::to_string(&stats)?)
    }
}

fn schedule<S>(
    runner: Weak<RefCell<Runner<S>>>,
    pending: Rc<RefCell<Vec<S::Stats>>>,
    on_stats: Option<js_sys::Function>,
) -> Result<(), EngineError>
where
    S: Simulation + 'static,
    S::Stats: Serialize + 'static,
{
    let Some(strong) = runner.upgrade() else {
        return Ok(());
    };

    let next = runner.clone();
    let callback = Closure::once_into_js(move |now: f64| {
        on_frame(next, pending, on_stats, now);
    });
    let id = window()?
        .request_animation_frame(callback.unchecked_ref())
        .map_err(|e| EngineError::Js(format!("{:?}", e)))?;
    strong.borrow_mut().raf_id = Some(id);
    Ok(())
}

fn on_frame<S>(
    runner: Weak<RefCell<Runner<S>>>,
    pending: Rc<RefCell<Vec<S::Stats>>>,
    on_stats: Option<js_sys::Function>,
    now: f64,
) where
    S: Simulation + 'static,
    S::Stats: Serialize + 'static,
{
    let Some(strong) = runner.upgrade() else {
        return;
    };

    {
        let mut r = strong.borrow_mut();
        r.raf_id = None;
        if !r.engine.is_running() {
            return;
        }
        r.engine.frame(now);
        r.paint();
    }

    // The host callback may call back into the game, so the engine is not
    // borrowed while it runs
    if let Some(callback) = &on_stats {
        let batch: Vec<S::Stats> = pending.borrow_mut().drain(..).collect();
        for stats in batch {
            let value = serde_json::to_string(&stats)
                .ok()
                .and_then(|json| js_sys::JSON::parse(&json).ok());
            let Some(value) = value else {
                continue;
            };
            if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                log::warn!("Stats callback threw: {:?}", e);
            }
        }
    }

    // A stop/start from the callback has already queued its own frame
    {
        let r = strong.borrow();
        if !r.engine.wants_frame(r.raf_id.is_some()) {
            return;
        }
    }
    if let Err(e) = schedule(runner, pending, on_stats) {
        log::error!("Could not schedule next frame: {}", e);
    }
}

fn run_seed(settings: &Settings) -> u64 {
    settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64)
}

fn parse_settings(json: Option<String>) -> Result<Settings, EngineError> {
    match json {
        Some(json) => Settings::from_json(&json),
        None => Ok(Settings::default()),
    }
}

// === Exported classes ===

/// Boxing game bound to one canvas
#[wasm_bindgen]
pub struct BoxingGame {
    inner: GameLoop<BoxingState>,
}

#[wasm_bindgen]
impl BoxingGame {
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        fighter_id: &str,
        settings_json: Option<String>,
    ) -> Result<BoxingGame, JsValue> {
        let Some(fighter) = Fighter::from_id(fighter_id) else {
            log::warn!("Unknown fighter id {:?}", fighter_id);
            return Err(EngineError::UnknownFighter(fighter_id.to_string()).into());
        };
        let settings = parse_settings(settings_json)?;
        let state = BoxingState::new(fighter, run_seed(&settings), &settings);
        let inner = GameLoop::new(state, canvas, (BOXING_WIDTH, BOXING_HEIGHT), BOXING_CODES, None)?;
        Ok(Self { inner })
    }

    pub fn start(&self) -> Result<(), JsValue> {
        Ok(self.inner.start()?)
    }

    pub fn stop(&self) {
        self.inner.stop();
    }

    pub fn restart(&self) {
        self.inner.restart();
    }

    /// Current stats as JSON
    pub fn stats(&self) -> Result<String, JsValue> {
        Ok(self.inner.stats_json()?)
    }
}

impl Drop for BoxingGame {
    fn drop(&mut self) {
        self.inner.stop();
    }
}

/// Helicopter game bound to one canvas.
///
/// `on_stats` receives `{ score, coins, enemiesDestroyed, level }` after
/// every simulation tick.
#[wasm_bindgen]
pub struct HelicopterGame {
    inner: GameLoop<HelicopterState>,
}

#[wasm_bindgen]
impl HelicopterGame {
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        on_stats: Option<js_sys::Function>,
        settings_json: Option<String>,
    ) -> Result<HelicopterGame, JsValue> {
        let settings = parse_settings(settings_json)?;
        let state = HelicopterState::new(run_seed(&settings), &settings);
        let inner = GameLoop::new(state, canvas, (HELI_WIDTH, HELI_HEIGHT), HELI_CODES, on_stats)?;
        Ok(Self { inner })
    }

    pub fn start(&self) -> Result<(), JsValue> {
        Ok(self.inner.start()?)
    }

    pub fn stop(&self) {
        self.inner.stop();
    }

    pub fn restart(&self) {
        self.inner.restart();
    }

    pub fn stats(&self) -> Result<String, JsValue> {
        Ok(self.inner.stats_json()?)
    }
}

impl Drop for HelicopterGame {
    fn drop(&mut self) {
        self.inner.stop();
    }
}
