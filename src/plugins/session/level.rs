//! Per-level bookkeeping: counters and the win/loss decision.
//!
//! `LevelSession` knows nothing about entities. Systems report what happened
//! (a note was taken, an enemy touched the player, time passed) and the session
//! answers with an outcome at most once.

use std::time::Duration;

use bevy::prelude::*;

use crate::common::payload::LevelOutcome;
use crate::common::tunables::Tunables;

pub const MAX_EXTRA_ENEMIES: u32 = 5;

pub fn note_count(level: u32) -> usize {
    8 + 2 * level as usize
}

pub fn enemy_count(level: u32) -> usize {
    2 + level.min(MAX_EXTRA_ENEMIES) as usize
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub level: u32,
    pub player_speed: f32,
    pub enemy_speed: f32,
    pub level_duration_secs: u32,
}

impl SessionConfig {
    pub fn new(level: u32, tunables: &Tunables) -> Self {
        Self {
            level: level.max(1),
            player_speed: tunables.player_speed,
            enemy_speed: tunables.enemy_speed,
            level_duration_secs: tunables.level_duration_secs,
        }
    }

    pub fn note_count(&self) -> usize {
        note_count(self.level)
    }

    pub fn enemy_count(&self) -> usize {
        enemy_count(self.level)
    }
}

#[derive(Resource, Debug)]
pub struct LevelSession {
    config: SessionConfig,
    reward: u32,
    score: u32,
    time_left: u32,
    notes_remaining: usize,
    countdown: Timer,
    outcome: Option<LevelOutcome>,
}

impl LevelSession {
    pub fn new(config: SessionConfig, reward: u32) -> Self {
        Self {
            config,
            reward,
            score: 0,
            time_left: config.level_duration_secs,
            notes_remaining: config.note_count(),
            countdown: Timer::from_seconds(1.0, TimerMode::Repeating),
            outcome: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn level(&self) -> u32 {
        self.config.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn notes_remaining(&self) -> usize {
        self.notes_remaining
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<LevelOutcome> {
        self.outcome
    }

    /// Score one note. Wins the level when it was the last one.
    pub fn collect_note(&mut self) -> Option<LevelOutcome> {
        if self.is_over() || self.notes_remaining == 0 {
            return None;
        }
        self.notes_remaining -= 1;
        self.score += self.reward;
        if self.notes_remaining == 0 {
            return self.finish(true);
        }
        None
    }

    /// A single touch is fatal.
    pub fn enemy_contact(&mut self) -> Option<LevelOutcome> {
        self.finish(false)
    }

    /// Run the one-second countdown. Fails the level when it hits zero.
    pub fn tick(&mut self, delta: Duration) -> Option<LevelOutcome> {
        if self.is_over() {
            return None;
        }
        self.countdown.tick(delta);
        let elapsed = self.countdown.times_finished_this_tick();
        if elapsed == 0 {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(elapsed);
        if self.time_left == 0 {
            return self.finish(false);
        }
        None
    }

    /// The first decision sticks; every later one is ignored.
    fn finish(&mut self, success: bool) -> Option<LevelOutcome> {
        if self.outcome.is_some() {
            return None;
        }
        let outcome = LevelOutcome {
            success,
            score: self.score,
            level: self.config.level,
        };
        self.outcome = Some(outcome);
        Some(outcome)
    }
}
