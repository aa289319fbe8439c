//! Player plugin.
//!
//! Pipeline:
//! - OnEnter(Play): spawn at screen centre
//! - Update (PlaySystems::Input): sample the four directions into PlayerInput
//! - FixedUpdate: apply velocity to the dynamic body
//! - Update (PlaySystems::Presentation): pick the clip and facing from PlayerInput

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::hitbox::{FRAME_SIZE, HitBox};
use crate::common::layers::Layer;
use crate::common::state::{GameState, LevelSetup, PlaySystems};
use crate::plugins::animation::{AnimationKey, AnimationRegistry, SpriteAnimation};
use crate::plugins::assets::{AssetCatalog, SheetKey};
use crate::plugins::input::DirectionKeys;
use crate::plugins::session::LevelSession;

pub const PLAYER_HITBOX: HitBox = HitBox::with_offset(90.0, 120.0, 35.0, 10.0);

#[derive(Component)]
pub struct Player;

#[derive(Resource, Default, Debug)]
struct PlayerInput {
    move_axis: Vec2,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .add_systems(OnEnter(GameState::Play), spawn.in_set(LevelSetup::Entities))
        .add_systems(OnExit(GameState::Play), reset_input)
        .add_systems(Update, gather_input.in_set(PlaySystems::Input))
        .add_systems(
            FixedUpdate,
            apply_movement
                .run_if(in_state(GameState::Play))
                .run_if(resource_exists::<LevelSession>),
        )
        .add_systems(Update, present.in_set(PlaySystems::Presentation));
}

fn spawn(mut commands: Commands, catalog: Res<AssetCatalog>, registry: Res<AnimationRegistry>) {
    let layers = CollisionLayers::new(Layer::Player, [Layer::World, Layer::Enemy, Layer::Note]);

    let mut player = commands.spawn((
        Name::new("Player"),
        Player,
        Transform::from_xyz(0.0, 0.0, 5.0),
        RigidBody::Dynamic,
        LockedAxes::ROTATION_LOCKED,
        PLAYER_HITBOX.collider(FRAME_SIZE),
        Friction::ZERO,
        layers,
        CollisionEventsEnabled,
        LinearVelocity::ZERO,
        DespawnOnExit(GameState::Play),
    ));

    match (
        catalog.atlas_sprite(SheetKey::Player, 0),
        registry.get(AnimationKey::PlayerIdle),
    ) {
        (Some(sprite), Some(clip)) => {
            player.insert((sprite, SpriteAnimation::new(AnimationKey::PlayerIdle, clip)));
        }
        _ => {
            warn!("Player spritesheet not ready; drawing a placeholder");
            player.insert(Sprite::from_color(Color::srgb(0.2, 0.75, 0.9), PLAYER_HITBOX.size));
        }
    }
}

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    input.move_axis = keys
        .map(|k| DirectionKeys::from_keys(&k).axis())
        .unwrap_or(Vec2::ZERO);
}

fn reset_input(mut input: ResMut<PlayerInput>) {
    input.move_axis = Vec2::ZERO;
}

fn apply_movement(
    session: Res<LevelSession>,
    input: Res<PlayerInput>,
    mut q_player: Query<&mut LinearVelocity, With<Player>>,
) {
    let Ok(mut vel) = q_player.single_mut() else {
        return;
    };
    // Per-axis speed, not normalised.
    vel.0 = input.move_axis * session.config().player_speed;
}

/// Clip for the requested movement.
pub fn clip_for(move_axis: Vec2) -> AnimationKey {
    if move_axis == Vec2::ZERO {
        AnimationKey::PlayerIdle
    } else {
        AnimationKey::PlayerFly
    }
}

/// Horizontal facing. Vertical-only movement keeps the previous facing.
pub fn facing_left(x: f32, was_left: bool) -> bool {
    if x < 0.0 {
        true
    } else if x > 0.0 {
        false
    } else {
        was_left
    }
}

/// Clip and facing follow `PlayerInput`, not the post-solve velocity.
fn present(
    registry: Res<AnimationRegistry>,
    input: Res<PlayerInput>,
    mut q_player: Query<(&mut Sprite, Option<&mut SpriteAnimation>), With<Player>>,
) {
    let axis = input.move_axis;
    for (mut sprite, anim) in &mut q_player {
        if let Some(mut anim) = anim {
            let key = clip_for(axis);
            if anim.key() != key {
                anim.play(key, &registry);
            }
        }
        let left = facing_left(axis.x, sprite.flip_x);
        if sprite.flip_x != left {
            sprite.flip_x = left;
        }
    }
}
