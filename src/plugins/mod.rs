//! Feature plugins.

use bevy::prelude::*;

pub mod animation;
pub mod assets;
pub mod audio;
pub mod core;
pub mod enemies;
pub mod game_over;
pub mod input;
pub mod menu;
pub mod notes;
pub mod physics;
pub mod player;
pub mod session;
pub mod world;

// Render-only
pub mod camera;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    assets::plugin(app);
    animation::plugin(app);
    audio::plugin(app);
    input::plugin(app);
    world::plugin(app);
    menu::plugin(app);
    session::plugin(app);
    player::plugin(app);
    notes::plugin(app);
    enemies::plugin(app);
    game_over::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
}
