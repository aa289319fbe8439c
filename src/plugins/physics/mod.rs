//! Physics plugin: avian2d with no gravity (top-down), plus the global
//! pause switch used when a level ends.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let ppm = app.world().resource::<Tunables>().pixels_per_meter;
    app.add_plugins(PhysicsPlugins::default().with_length_unit(ppm));
    app.insert_resource(Gravity(Vec2::ZERO));
    app.add_systems(OnEnter(GameState::Play), resume_simulation);
}

/// Freeze every body and stop contact generation.
pub fn pause_simulation(time: &mut Time<Physics>) {
    if !time.is_paused() {
        time.pause();
    }
}

fn resume_simulation(time: Option<ResMut<Time<Physics>>>) {
    let Some(mut time) = time else {
        return;
    };
    if time.is_paused() {
        time.unpause();
        debug!("Physics resumed");
    }
}
