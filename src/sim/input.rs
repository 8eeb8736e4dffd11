//! Keyboard input latch
//!
//! Key listeners write transitions into the latch whenever the host delivers
//! them; the simulation samples it once per tick. There is no queueing: two
//! keys pressed in the same frame are both simply "down".

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::EngineError;

/// One key edge as reported by the host (physical key code, e.g. `"KeyA"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTransition {
    pub code: String,
    pub pressed: bool,
}

impl KeyTransition {
    pub fn down(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            pressed: true,
        }
    }

    pub fn up(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            pressed: false,
        }
    }
}

/// Pressed/released state per physical key code
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    keys: HashMap<String, bool>,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, code: &str) {
        self.keys.insert(code.to_owned(), true);
    }

    pub fn release(&mut self, code: &str) {
        self.keys.insert(code.to_owned(), false);
    }

    pub fn apply(&mut self, transition: KeyTransition) {
        self.keys.insert(transition.code, transition.pressed);
    }

    /// Unknown keys read as released
    pub fn is_down(&self, code: &str) -> bool {
        self.keys.get(code).copied().unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

/// Latch shared between an engine and the listeners feeding it
pub type SharedLatch = Rc<RefCell<InputLatch>>;

/// Something that can deliver key transitions into a latch.
///
/// An engine attaches its source once, at construction, and detaches it when
/// dropped. Restarting a game never re-subscribes.
pub trait InputSource {
    fn attach(&mut self, latch: SharedLatch) -> Result<(), EngineError>;
    fn detach(&mut self);
}

/// Source that never produces input (headless runs, tests)
#[derive(Debug, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn attach(&mut self, _latch: SharedLatch) -> Result<(), EngineError> {
        Ok(())
    }

    fn detach(&mut self) {}
}

/// Key codes sampled by the boxing engine
pub mod boxing_keys {
    pub const LEFT: &str = "KeyA";
    pub const RIGHT: &str = "KeyD";
    pub const JAB: &str = "KeyG";
    pub const HOOK: &str = "KeyH";
    pub const UPPERCUT: &str = "KeyT";
    pub const SPECIAL: &str = "KeyY";
    pub const BLOCK: &str = "KeyR";
}

/// Key codes sampled by the helicopter engine
pub mod heli_keys {
    pub const UP: &str = "KeyW";
    pub const DOWN: &str = "KeyS";
    pub const LEFT: &str = "KeyA";
    pub const RIGHT: &str = "KeyD";
    pub const FIRE: &str = "Space";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_press_release() {
        let mut latch = InputLatch::new();
        assert!(!latch.is_down("KeyA"));

        latch.press("KeyA");
        latch.apply(KeyTransition::down("Space"));
        assert!(latch.is_down("KeyA"));
        assert!(latch.is_down("Space"));

        latch.apply(KeyTransition::up("KeyA"));
        assert!(!latch.is_down("KeyA"));
        assert!(latch.is_down("Space"));

        latch.clear();
        assert!(!latch.is_down("Space"));
    }
}
