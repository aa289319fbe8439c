//! Random spawn placement.
//!
//! World space is centred on the screen, y-up. Insets are given the way the
//! art is laid out: distance from each screen edge.

use bevy::prelude::*;
use rand::Rng;

/// Distance kept clear from each screen edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inset {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Notes leave room for the HUD along the top edge.
pub const NOTE_INSET: Inset = Inset {
    left: 40.0,
    right: 40.0,
    top: 60.0,
    bottom: 40.0,
};

pub const ENEMY_INSET: Inset = Inset {
    left: 20.0,
    right: 20.0,
    top: 40.0,
    bottom: 20.0,
};

/// Give up on rejection sampling after this many draws.
const MAX_DRAWS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnArea {
    pub min: Vec2,
    pub max: Vec2,
}

impl SpawnArea {
    /// A screen smaller than its insets collapses to a point instead of an
    /// inverted range.
    pub fn inset(screen: Vec2, inset: Inset) -> Self {
        let half = screen * 0.5;
        let min = Vec2::new(-half.x + inset.left, -half.y + inset.bottom);
        let max = Vec2::new(half.x - inset.right, half.y - inset.top);
        Self {
            min,
            max: max.max(min),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    pub fn sample(&self, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            rng.random_range(self.min.x..=self.max.x),
            rng.random_range(self.min.y..=self.max.y),
        )
    }

    fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            self.max,
            Vec2::new(self.min.x, self.max.y),
            Vec2::new(self.max.x, self.min.y),
        ]
    }
}

pub fn note_positions(rng: &mut impl Rng, area: SpawnArea, count: usize) -> Vec<Vec2> {
    (0..count).map(|_| area.sample(rng)).collect()
}

/// Uniform point in `area` at least `safe_radius` away from `center`.
///
/// Draws are rejected and redrawn. If the area leaves no room at all the
/// corner farthest from `center` is used instead.
pub fn enemy_position(rng: &mut impl Rng, area: SpawnArea, center: Vec2, safe_radius: f32) -> Vec2 {
    for _ in 0..MAX_DRAWS {
        let p = area.sample(rng);
        if p.distance(center) >= safe_radius {
            return p;
        }
    }
    warn!("No enemy spawn outside the safe radius {safe_radius}; using the farthest corner");
    area.corners()
        .into_iter()
        .max_by(|a, b| a.distance(center).total_cmp(&b.distance(center)))
        .unwrap_or(area.max)
}

/// Independent per-axis speed in `[-speed, speed]`.
pub fn enemy_velocity(rng: &mut impl Rng, speed: f32) -> Vec2 {
    let s = speed.abs();
    Vec2::new(rng.random_range(-s..=s), rng.random_range(-s..=s))
}
