//! Notes: stationary pickups scattered over the arena at level start.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::hitbox::{FRAME_SIZE, HitBox};
use crate::common::layers::Layer;
use crate::common::state::{GameState, LevelSetup};
use crate::common::tunables::Tunables;
use crate::plugins::assets::{AssetCatalog, ImageKey};
use crate::plugins::core::GameRng;
use crate::plugins::session::placement::{self, NOTE_INSET, SpawnArea};
use crate::plugins::session::LevelSession;

pub const NOTE_HITBOX: HitBox = HitBox::centered(50.0, 50.0);

#[derive(Component)]
pub struct Note;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::Play), spawn_notes.in_set(LevelSetup::Entities));
}

fn spawn_notes(
    mut commands: Commands,
    session: Res<LevelSession>,
    tunables: Res<Tunables>,
    catalog: Res<AssetCatalog>,
    mut rng: ResMut<GameRng>,
) {
    let area = SpawnArea::inset(tunables.screen_size(), NOTE_INSET);
    let positions = placement::note_positions(&mut rng.0, area, session.config().note_count());
    let layers = CollisionLayers::new(Layer::Note, [Layer::Player]);
    let image = catalog.image(ImageKey::Note);

    for (i, pos) in positions.into_iter().enumerate() {
        let sprite = match &image {
            Some(image) => Sprite::from_image(image.clone()),
            None => Sprite::from_color(Color::srgb(0.95, 0.85, 0.3), NOTE_HITBOX.size),
        };
        commands.spawn((
            Name::new(format!("Note{i}")),
            Note,
            sprite,
            Transform::from_translation(pos.extend(2.0)),
            RigidBody::Static,
            NOTE_HITBOX.collider(FRAME_SIZE),
            Sensor,
            layers,
            DespawnOnExit(GameState::Play),
        ));
    }
    debug!("Spawned {} notes", session.config().note_count());
}
