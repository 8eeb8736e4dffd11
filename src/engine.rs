//! Lifecycle facade shared by both engines
//!
//! The host calls `frame` once per display refresh with its timestamp; the
//! facade turns wall time into fixed simulation ticks, fires the stats hook,
//! and hands back a draw list on request. Whatever schedules frames (the
//! browser's animation callback, a test loop) lives outside.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::error::EngineError;
use crate::renderer::Frame;
use crate::sim::{InputLatch, InputSource, SharedLatch};

/// One self-contained game the facade can drive
pub trait Simulation {
    /// Snapshot reported to the host UI
    type Stats: Clone;

    /// Advance one fixed step; terminal modes make this a no-op
    fn tick(&mut self, input: &InputLatch, dt: f32);

    /// Describe the current state as a frame; `time` drives cosmetic animation only
    fn render(&self, time: f32) -> Frame;

    /// Back to the initial playable mode, in place
    fn reset(&mut self);

    fn is_terminal(&self) -> bool;

    fn stats(&self) -> Self::Stats;
}

type StatsHook<T> = Box<dyn FnMut(T)>;

/// Frame driver, input owner, and stats publisher for one simulation
pub struct Engine<S: Simulation> {
    sim: S,
    source: Box<dyn InputSource>,
    input: SharedLatch,
    running: bool,
    last_ms: Option<f64>,
    accumulator: f32,
    /// Seconds of frames seen, for animation
    time: f32,
    stats_hook: Option<StatsHook<S::Stats>>,
}

impl<S: Simulation> Engine<S> {
    /// Wrap a simulation and subscribe its input source. The loop is not started.
    pub fn new(sim: S, mut source: Box<dyn InputSource>) -> Result<Self, EngineError> {
        let input = SharedLatch::default();
        source.attach(input.clone())?;
        log::info!("Engine constructed");

        Ok(Self {
            sim,
            source,
            input,
            running: false,
            last_ms: None,
            accumulator: 0.0,
            time: 0.0,
            stats_hook: None,
        })
    }

    pub fn start(&mut self) {
        if self.running {
            log::warn!("start() called while already running; ignoring");
            return;
        }
        self.running = true;
        self.last_ms = None;
        self.accumulator = 0.0;
        log::info!("Engine started");
    }

    /// Halt ticking. Safe to call when never started.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Engine stopped");
        }
        self.running = false;
        self.last_ms = None;
        self.accumulator = 0.0;
    }

    /// Reset the game in place; running state and input subscription are kept
    pub fn restart(&mut self) {
        self.sim.reset();
        self.accumulator = 0.0;
        log::info!("Engine restarted");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the host should request another frame, given whether one is
    /// already queued. Keeps a single frame chain alive per engine.
    pub fn wants_frame(&self, queued: bool) -> bool {
        self.running && !queued
    }

    /// Advance to host timestamp `now_ms`; returns the number of ticks run.
    ///
    /// The first frame after `start` only records the timestamp.
    pub fn frame(&mut self, now_ms: f64) -> usize {
        if !self.running {
            return 0;
        }
        if !now_ms.is_finite() {
            log::warn!("Ignoring non-finite frame timestamp {}", now_ms);
            return 0;
        }
        let Some(last) = self.last_ms.replace(now_ms) else {
            return 0;
        };

        let dt = (((now_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;
        self.time += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            {
                let input = self.input.borrow();
                self.sim.tick(&input, SIM_DT);
            }
            self.accumulator -= SIM_DT;
            substeps += 1;

            if let Some(hook) = self.stats_hook.as_mut() {
                hook(self.sim.stats());
            }
        }

        if self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of frame backlog", self.accumulator);
            self.accumulator = 0.0;
        }

        substeps as usize
    }

    pub fn render(&self) -> Frame {
        self.sim.render(self.time)
    }

    /// Pull the current stats
    pub fn stats(&self) -> S::Stats {
        self.sim.stats()
    }

    /// Push hook fired after every tick; replaces any earlier hook
    pub fn on_stats(&mut self, hook: impl FnMut(S::Stats) + 'static) {
        self.stats_hook = Some(Box::new(hook));
    }

    pub fn is_terminal(&self) -> bool {
        self.sim.is_terminal()
    }

    /// Latch the input source writes into
    pub fn input(&self) -> SharedLatch {
        self.input.clone()
    }

    pub fn sim(&self) -> &S {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut S {
        &mut self.sim
    }
}

impl<S: Simulation> Drop for Engine<S> {
    fn drop(&mut self) {
        self.source.detach();
    }
}
