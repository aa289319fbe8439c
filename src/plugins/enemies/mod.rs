//! Enemies plugin: drifting hazards that bounce around the arena.
//!
//! Enemies are plain physics: a dynamic body with full restitution and no
//! friction keeps its speed forever, bouncing off walls and each other. The
//! only gameplay rule (touching the player ends the level) lives in the
//! session's contact resolver.
//!
//! ```text
//! OnEnter(Play) / LevelSetup::Entities: spawn enemy_count bodies outside the safe radius
//! ```

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::hitbox::{FRAME_SIZE, HitBox};
use crate::common::layers::Layer;
use crate::common::state::{GameState, LevelSetup};
use crate::common::tunables::Tunables;
use crate::plugins::animation::{AnimationKey, AnimationRegistry, SpriteAnimation};
use crate::plugins::assets::{AssetCatalog, SheetKey};
use crate::plugins::core::GameRng;
use crate::plugins::session::placement::{self, ENEMY_INSET, SpawnArea};
use crate::plugins::session::LevelSession;

pub const ENEMY_HITBOX: HitBox = HitBox::with_offset(60.0, 130.0, 35.0, 0.0);

#[derive(Component)]
pub struct Enemy;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::Play), spawn_enemies.in_set(LevelSetup::Entities));
}

// -----------------------------------------------------------------------------
// Spawn
// -----------------------------------------------------------------------------

/// Physics material that never loses energy on impact.
#[inline]
fn bouncy() -> (Restitution, Friction) {
    (
        Restitution::new(1.0).with_combine_rule(CoefficientCombine::Max),
        Friction::ZERO,
    )
}

fn spawn_enemies(
    mut commands: Commands,
    session: Res<LevelSession>,
    tunables: Res<Tunables>,
    catalog: Res<AssetCatalog>,
    registry: Res<AnimationRegistry>,
    mut rng: ResMut<GameRng>,
) {
    // Enemy collision intent: bounce off walls and each other, touch the player.
    let layers = CollisionLayers::new(Layer::Enemy, [Layer::World, Layer::Enemy, Layer::Player]);
    let area = SpawnArea::inset(tunables.screen_size(), ENEMY_INSET);
    let config = session.config();
    let clip = registry.get(AnimationKey::EnemyFly);

    for i in 0..config.enemy_count() {
        let pos =
            placement::enemy_position(&mut rng.0, area, Vec2::ZERO, tunables.safe_spawn_radius);
        let vel = placement::enemy_velocity(&mut rng.0, config.enemy_speed);

        let mut enemy = commands.spawn((
            Name::new(format!("Enemy{i}")),
            Enemy,
            Transform::from_translation(pos.extend(4.0)),
            RigidBody::Dynamic,
            LockedAxes::ROTATION_LOCKED,
            ENEMY_HITBOX.collider(FRAME_SIZE),
            bouncy(),
            layers,
            LinearVelocity(vel),
            DespawnOnExit(GameState::Play),
        ));

        match (catalog.atlas_sprite(SheetKey::Enemy, 0), clip) {
            (Some(sprite), Some(clip)) => {
                enemy.insert((sprite, SpriteAnimation::new(AnimationKey::EnemyFly, clip)));
            }
            _ => {
                enemy.insert(Sprite::from_color(Color::srgb(0.9, 0.25, 0.25), ENEMY_HITBOX.size));
            }
        }
    }

    debug!(
        "Spawned {} enemies at speed {}",
        config.enemy_count(),
        config.enemy_speed
    );
}
