//! Data handed from one state to the next.
//!
//! Payloads are resources: the leaving state inserts one, the entering state
//! reads it on `OnEnter` and removes it when it is done with it. Nothing flows
//! backwards.

use bevy::prelude::*;

/// Menu -> Play.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartLevel {
    pub level: Option<u32>,
}

impl StartLevel {
    pub const FIRST: Self = Self { level: Some(1) };

    /// Level to play. Missing or zero falls back to 1.
    pub fn level_or_default(&self) -> u32 {
        self.level.filter(|l| *l >= 1).unwrap_or(1)
    }
}

/// Play -> GameOver. Produced exactly once per level attempt.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelOutcome {
    pub success: bool,
    pub score: u32,
    pub level: u32,
}

impl LevelOutcome {
    /// What GameOver shows when it is entered without an outcome.
    pub const FALLBACK: Self = Self {
        success: false,
        score: 0,
        level: 1,
    };
}
