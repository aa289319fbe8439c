//! Tunable gameplay constants.
//!
//! Defaults match the shipped game. Native builds may override any subset of
//! fields from `assets/config/tunables.ron`.

use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

pub const TUNABLES_PATH: &str = "assets/config/tunables.ron";

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub screen_width: f32,
    pub screen_height: f32,
    pub player_speed: f32,
    pub enemy_speed: f32,
    pub level_duration_secs: u32,
    /// Minimum distance between an enemy spawn point and the screen centre.
    pub safe_spawn_radius: f32,
    pub note_reward: u32,
    /// Background scroll per rendered frame, in pixels.
    pub background_scroll_step: f32,
    /// Fixed RNG seed for reproducible placement. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            screen_width: 800.0,
            screen_height: 480.0,
            player_speed: 180.0,
            enemy_speed: 70.0,
            level_duration_secs: 60,
            safe_spawn_radius: 200.0,
            note_reward: 10,
            background_scroll_step: 3.0,
            seed: None,
        }
    }
}

impl Tunables {
    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read tunables: {e}"))?;
        Self::from_ron(&data)
    }

    pub fn from_ron(data: &str) -> Result<Self, String> {
        ron::from_str(data).map_err(|e| format!("parse RON: {e}"))
    }

    /// A missing file is not an error; anything unreadable is reported and
    /// replaced by the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        if !path.as_ref().exists() {
            return (Self::default(), None);
        }
        match Self::load_from_file(path) {
            Ok(t) => (t, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}
