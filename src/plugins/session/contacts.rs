use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::plugins::audio::{AudioKey, PlayAudio};
use crate::plugins::enemies::Enemy;
use crate::plugins::notes::Note;
use crate::plugins::player::Player;

use super::LevelEnded;
use super::level::LevelSession;

const PICKUP_VOLUME: f32 = 0.7;

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionTarget {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

/// What the player ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contact {
    Enemy,
    Note(Entity),
}

/// Player contacts from one batch of collision messages.
///
/// Enemy hits come first, then pickups in arrival order. A note shows up at
/// most once.
pub fn player_contacts<'a>(
    events: impl IntoIterator<Item = &'a CollisionStart>,
    is_player: impl Fn(Entity) -> bool,
    is_note: impl Fn(Entity) -> bool,
    is_enemy: impl Fn(Entity) -> bool,
) -> Vec<Contact> {
    let mut hit = false;
    let mut seen = HashSet::new();
    let mut pickups = Vec::new();

    for ev in events {
        let (t1, t2) = targets(ev);
        let (o1, o2) = (t1.gameplay_owner(), t2.gameplay_owner());
        let other = match (is_player(o1), is_player(o2)) {
            (true, false) => o2,
            (false, true) => o1,
            _ => continue,
        };

        if is_enemy(other) {
            hit = true;
        } else if is_note(other) && seen.insert(other) {
            pickups.push(Contact::Note(other));
        }
    }

    let mut contacts = Vec::with_capacity(pickups.len() + 1);
    if hit {
        contacts.push(Contact::Enemy);
    }
    contacts.extend(pickups);
    contacts
}

pub(super) fn resolve_contacts(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    mut session: ResMut<LevelSession>,
    q_player: Query<(), With<Player>>,
    q_note: Query<(), With<Note>>,
    q_enemy: Query<(), With<Enemy>>,
    mut audio: MessageWriter<PlayAudio>,
    mut ended: MessageWriter<LevelEnded>,
) {
    if started.is_empty() {
        return;
    }
    let contacts = player_contacts(
        started.read(),
        |e| q_player.contains(e),
        |e| q_note.contains(e),
        |e| q_enemy.contains(e),
    );

    for contact in contacts {
        if session.is_over() {
            break;
        }
        match contact {
            Contact::Enemy => {
                if let Some(outcome) = session.enemy_contact() {
                    info!("Player hit an enemy; level {} lost", outcome.level);
                    ended.write(LevelEnded(outcome));
                }
            }
            Contact::Note(note) => {
                commands.entity(note).despawn();
                audio.write(PlayAudio::once(AudioKey::NotePickup, PICKUP_VOLUME));
                let outcome = session.collect_note();
                debug!(
                    "Note collected: score {}, {} left",
                    session.score(),
                    session.notes_remaining()
                );
                if let Some(outcome) = outcome {
                    info!("All notes collected; level {} won", outcome.level);
                    ended.write(LevelEnded(outcome));
                }
            }
        }
    }
}
