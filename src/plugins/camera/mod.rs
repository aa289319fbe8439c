//! Camera plugin.
//!
//! One fixed 2D camera for the whole app. The projection always shows exactly
//! one screen of world space, so the arena maps onto the window regardless of
//! its actual pixel size.
//!
//! ```text
//! Startup: spawn MainCamera (never despawned; every state draws through it)
//! ```

use bevy::camera::ScalingMode;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera);
}

fn spawn_camera(mut commands: Commands, tunables: Res<Tunables>) {
    let screen = tunables.screen_size();
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera,
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::Fixed {
                width: screen.x,
                height: screen.y,
            },
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(0.0, 0.0, 999.0),
    ));
}
