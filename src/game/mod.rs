//! Game composition root.
//!
//! Provides two public configuration functions:
//! - `configure_full`: includes DefaultPlugins (window/render/audio/input) + game plugins.
//! - `configure_headless`: minimal configuration for integration tests.

use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::state::GameState;
use crate::plugins;

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

/// Full configuration for `cargo run` and the web build.
pub fn configure_full(app: &mut App) {
    // The window needs the screen size before any game plugin runs.
    let tunables = plugins::core::load_tunables();

    let default_plugins = DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(Window {
                title: "Note Dash".into(),
                resolution: WindowResolution::new(
                    tunables.screen_width as u32,
                    tunables.screen_height as u32,
                ),
                canvas: cfg!(target_arch = "wasm32").then(|| "#game-canvas".to_owned()),
                fit_canvas_to_parent: true,
                ..default()
            }),
            ..default()
        })
        // Static hosting has no .meta files; skip the lookups.
        .set(AssetPlugin {
            meta_check: AssetMetaCheck::Never,
            ..default()
        });

    app.add_plugins(default_plugins);
    app.insert_resource(tunables);

    configure_game(app);
    plugins::register_render(app);
}

/// Headless configuration for integration tests.
///
/// Notes:
/// - Do NOT add DefaultPlugins.
/// - Do NOT add render-only plugins (camera).
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

/// Configuration shared by both full and headless apps.
fn configure_game(app: &mut App) {
    app.init_state::<GameState>();
    plugins::register_gameplay(app);
}
