//! Axis-aligned bounding box tests
//!
//! Both engines only ever need rectangle overlap: projectiles against
//! boxers, fireballs against hostiles, hostiles against the helicopter.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rectangle described by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Box centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size * 0.5,
            size,
        }
    }

    /// Box standing on `feet` (bottom-center anchor)
    pub fn standing(feet: Vec2, size: Vec2) -> Self {
        Self {
            min: Vec2::new(feet.x - size.x * 0.5, feet.y - size.y),
            size,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap on both axes; touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a, b) = (self.max(), other.max());
        self.min.x < b.x && a.x > other.min.x && self.min.y < b.y && a.y > other.min.y
    }
}
