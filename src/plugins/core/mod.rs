//! Core plugin: shared resources and global settings.

use bevy::prelude::*;
use rand::{SeedableRng, rngs::StdRng};

use crate::common::tunables::{TUNABLES_PATH, Tunables};

/// Randomness for spawn placement. Seeded from `Tunables::seed` when set.
#[derive(Resource, Debug)]
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn from_tunables(tunables: &Tunables) -> Self {
        match tunables.seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_os_rng()),
        }
    }
}

pub fn plugin(app: &mut App) {
    if !app.world().contains_resource::<Tunables>() {
        app.insert_resource(load_tunables());
    }
    let rng = GameRng::from_tunables(app.world().resource::<Tunables>());
    app.insert_resource(rng);
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.1, 0.13)));
}

/// Tunables from disk on native builds, defaults on the web.
pub fn load_tunables() -> Tunables {
    if cfg!(target_arch = "wasm32") {
        return Tunables::default();
    }
    let (tunables, err) = Tunables::load_or_default(TUNABLES_PATH);
    if let Some(e) = err {
        warn!("{TUNABLES_PATH}: {e}; using defaults");
    }
    tunables
}
