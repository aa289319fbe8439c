//! World plugin: arena walls at the screen edges and the scrolling backdrop.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::{GameState, LevelSetup, PlaySystems};
use crate::common::tunables::Tunables;
use crate::plugins::assets::{AssetCatalog, ImageKey};

const WALL_THICKNESS: f32 = 30.0;

/// One of the two side-by-side backdrop panels.
#[derive(Component, Debug)]
pub struct ScrollingBackground;

pub fn plugin(app: &mut App) {
    app.add_systems(
        OnEnter(GameState::Play),
        (spawn_arena, spawn_background).in_set(LevelSetup::Entities),
    );
    app.add_systems(
        Update,
        scroll_background.in_set(PlaySystems::Presentation),
    );
}

fn spawn_arena(mut commands: Commands, tunables: Res<Tunables>) {
    let half = tunables.screen_size() * 0.5;
    let t = WALL_THICKNESS;

    let wall_layers = CollisionLayers::new(Layer::World, [Layer::Player, Layer::Enemy]);

    let mut spawn_wall = |name: &str, pos: Vec2, size: Vec2| {
        commands.spawn((
            Name::new(name.to_owned()),
            Transform::from_translation(pos.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            Friction::ZERO,
            wall_layers,
            DespawnOnExit(GameState::Play),
        ));
    };

    let span_x = half.x * 2.0 + t * 2.0;
    spawn_wall("WallTop", Vec2::new(0.0, half.y + t * 0.5), Vec2::new(span_x, t));
    spawn_wall("WallBottom", Vec2::new(0.0, -half.y - t * 0.5), Vec2::new(span_x, t));
    spawn_wall("WallLeft", Vec2::new(-half.x - t * 0.5, 0.0), Vec2::new(t, half.y * 2.0));
    spawn_wall("WallRight", Vec2::new(half.x + t * 0.5, 0.0), Vec2::new(t, half.y * 2.0));
}

/// Two screen-sized panels side by side; scrolling wraps each one around.
fn spawn_background(mut commands: Commands, tunables: Res<Tunables>, catalog: Res<AssetCatalog>) {
    let size = tunables.screen_size();
    for (i, x) in [0.0, size.x].into_iter().enumerate() {
        let sprite = match catalog.image(ImageKey::Background) {
            Some(image) => Sprite {
                image,
                custom_size: Some(size),
                ..default()
            },
            None => Sprite::from_color(Color::srgb(0.08, 0.12, 0.16), size),
        };
        commands.spawn((
            Name::new(format!("Background{i}")),
            ScrollingBackground,
            sprite,
            Transform::from_xyz(x, 0.0, -10.0),
            DespawnOnExit(GameState::Play),
        ));
    }
}

/// Shift a panel left by `step`, moving it to the far right once it has
/// fully left the screen.
pub fn wrap_scroll(x: f32, step: f32, width: f32) -> f32 {
    let next = x - step;
    if next <= -width { next + width * 2.0 } else { next }
}

fn scroll_background(
    tunables: Res<Tunables>,
    mut q: Query<&mut Transform, With<ScrollingBackground>>,
) {
    let width = tunables.screen_width;
    for mut tf in &mut q {
        tf.translation.x = wrap_scroll(tf.translation.x, tunables.background_scroll_step, width);
    }
}
