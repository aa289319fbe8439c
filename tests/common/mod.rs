//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - asset types the catalog asks for are registered by hand (no render/audio plugins).
//! - we then call `note_dash::game::configure_headless` to install gameplay plugins.
//!
//! Time is stepped manually so countdown tests are deterministic.
//! `TransformPlugin` is there for the tests that let avian step.
#![allow(dead_code)]

use std::time::Duration;

use avian2d::prelude::*;
use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use note_dash::common::payload::StartLevel;
use note_dash::common::state::GameState;
use note_dash::plugins::animation::AnimationRegistry;

pub fn app_headless() -> App {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        TransformPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.init_asset::<Image>()
        .init_asset::<AudioSource>()
        .init_asset::<TextureAtlasLayout>()
        .init_resource::<ButtonInput<KeyCode>>()
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));

    note_dash::game::configure_headless(&mut app);
    // `App::run` would do this; plugins such as avian register resources in `finish`.
    app.finish();
    app.cleanup();
    app
}

/// Headless app that jumps straight to the menu.
pub fn app_at_menu() -> App {
    let mut app = app_headless();
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Menu);
    app.world_mut()
        .resource_mut::<AnimationRegistry>()
        .register_defaults();
    app.update();
    app.update();
    assert_eq!(state(&app), GameState::Menu);
    app
}

pub fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

/// Press and release the confirm key, then let the transition land.
pub fn confirm(app: &mut App) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Enter);
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .reset_all();
    app.update();
}

/// Menu -> Play, with the physics clock stopped so only injected contacts count.
pub fn enter_play(app: &mut App) {
    confirm(app);
    assert_eq!(state(app), GameState::Play);
    app.world_mut().resource_mut::<Time<Physics>>().pause();
}

pub fn set_frame_time(app: &mut App, step: Duration) {
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step));
}

pub fn count<C: Component>(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<(), With<C>>()
        .iter(app.world())
        .count()
}

pub fn entities<C: Component>(app: &mut App) -> Vec<Entity> {
    app.world_mut()
        .query_filtered::<Entity, With<C>>()
        .iter(app.world())
        .collect()
}

pub fn touch(app: &mut App, a: Entity, b: Entity) {
    app.world_mut().write_message(CollisionStart {
        collider1: a,
        collider2: b,
        body1: Some(a),
        body2: Some(b),
    });
}

/// Menu -> Play at an explicit level, bypassing the menu's level-1 start.
pub fn enter_level(app: &mut App, level: u32) {
    app.insert_resource(StartLevel { level: Some(level) });
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Play);
    app.update();
    assert_eq!(state(app), GameState::Play);
    app.world_mut().resource_mut::<Time<Physics>>().pause();
}

/// Menu -> Play with the simulation left running.
pub fn enter_live_play(app: &mut App) {
    confirm(app);
    assert_eq!(state(app), GameState::Play);
}

pub fn despawn_all<C: Component>(app: &mut App) {
    for e in entities::<C>(app) {
        app.world_mut().despawn(e);
    }
}

/// Spawn-time location; `Position` lags until avian has stepped once.
pub fn placed_at(app: &App, e: Entity) -> Vec2 {
    app.world()
        .get::<Transform>(e)
        .map(|tf| tf.translation.truncate())
        .unwrap()
}

/// Move a body, keeping `Position` and `Transform` in agreement.
pub fn teleport(app: &mut App, e: Entity, to: Vec2) {
    let mut entity = app.world_mut().entity_mut(e);
    if let Some(mut pos) = entity.get_mut::<Position>() {
        pos.0 = to;
    }
    if let Some(mut tf) = entity.get_mut::<Transform>() {
        tf.translation.x = to.x;
        tf.translation.y = to.y;
    }
}

/// Step until `done` holds, at most `frames` times.
pub fn run_until(app: &mut App, frames: usize, mut done: impl FnMut(&App) -> bool) -> bool {
    for _ in 0..frames {
        app.update();
        if done(app) {
            return true;
        }
    }
    false
}
