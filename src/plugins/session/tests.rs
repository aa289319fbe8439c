use std::time::Duration;

use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::common::payload::{LevelOutcome, StartLevel};
use crate::common::state::GameState;
use crate::common::test_utils::{drain_messages, run_system_once};
use crate::common::tunables::Tunables;
use crate::plugins::audio::{AudioKey, PlayAudio, StopAudio};
use crate::plugins::enemies::Enemy;
use crate::plugins::notes::Note;
use crate::plugins::player::Player;

use super::LevelEnded;
use super::contacts::{Contact, player_contacts};
use super::level::{LevelSession, SessionConfig, enemy_count, note_count};
use super::placement::{self, ENEMY_INSET, NOTE_INSET, SpawnArea};

fn session(level: u32) -> LevelSession {
    LevelSession::new(SessionConfig::new(level, &Tunables::default()), 10)
}

fn start(e1: Entity, e2: Entity) -> CollisionStart {
    CollisionStart {
        collider1: e1,
        collider2: e2,
        body1: Some(e1),
        body2: Some(e2),
    }
}

fn session_world(level: u32) -> World {
    let mut world = World::new();
    world.insert_resource(session(level));
    world.init_resource::<Messages<CollisionStart>>();
    world.init_resource::<Messages<PlayAudio>>();
    world.init_resource::<Messages<StopAudio>>();
    world.init_resource::<Messages<LevelEnded>>();
    world
}

#[test]
fn counts_grow_with_level() {
    let notes: Vec<_> = (1..=6).map(note_count).collect();
    assert_eq!(notes, [10, 12, 14, 16, 18, 20]);

    let enemies: Vec<_> = (1..=7).map(enemy_count).collect();
    assert_eq!(enemies, [3, 4, 5, 6, 7, 7, 7]);
}

#[test]
fn level_zero_is_treated_as_one() {
    let config = SessionConfig::new(0, &Tunables::default());
    assert_eq!(config.level, 1);
    assert_eq!(config.note_count(), 10);
}

#[test]
fn new_session_starts_clean() {
    let s = session(2);
    assert_eq!(s.score(), 0);
    assert_eq!(s.time_left(), 60);
    assert_eq!(s.notes_remaining(), 12);
    assert!(!s.is_over());
}

#[test]
fn collecting_every_note_wins() {
    let mut s = session(1);
    for _ in 0..9 {
        assert_eq!(s.collect_note(), None);
    }
    let outcome = s.collect_note();
    assert_eq!(
        outcome,
        Some(LevelOutcome {
            success: true,
            score: 100,
            level: 1
        })
    );
    assert_eq!(s.notes_remaining(), 0);
}

#[test]
fn enemy_contact_loses_with_current_score() {
    let mut s = session(1);
    s.collect_note();
    s.collect_note();
    s.collect_note();
    let outcome = s.enemy_contact();
    assert_eq!(
        outcome,
        Some(LevelOutcome {
            success: false,
            score: 30,
            level: 1
        })
    );
}

#[test]
fn first_decision_sticks() {
    let mut s = session(1);
    assert!(s.enemy_contact().is_some());
    assert_eq!(s.enemy_contact(), None);
    assert_eq!(s.collect_note(), None);
    assert_eq!(s.tick(Duration::from_secs(120)), None);
    assert_eq!(s.score(), 0);
    assert_eq!(s.outcome().map(|o| o.success), Some(false));
}

#[test]
fn countdown_runs_out_after_sixty_seconds() {
    let mut s = session(1);
    for _ in 0..59 {
        assert_eq!(s.tick(Duration::from_secs(1)), None);
    }
    assert_eq!(s.time_left(), 1);

    let outcome = s.tick(Duration::from_secs(1));
    assert_eq!(
        outcome,
        Some(LevelOutcome {
            success: false,
            score: 0,
            level: 1
        })
    );
    assert_eq!(s.time_left(), 0);
}

#[test]
fn countdown_only_counts_whole_seconds() {
    let mut s = session(1);
    s.tick(Duration::from_millis(600));
    assert_eq!(s.time_left(), 60);
    s.tick(Duration::from_millis(600));
    assert_eq!(s.time_left(), 59);
    s.tick(Duration::from_millis(2500));
    assert_eq!(s.time_left(), 57);
}

#[test]
fn enemies_spawn_outside_the_safe_radius() {
    let screen = Tunables::default().screen_size();
    let area = SpawnArea::inset(screen, ENEMY_INSET);
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let p = placement::enemy_position(&mut rng, area, Vec2::ZERO, 200.0);
        assert!(p.length() >= 200.0, "seed {seed}: {p}");
        assert!(area.contains(p), "seed {seed}: {p}");
    }
}

#[test]
fn notes_stay_inside_their_area() {
    let screen = Tunables::default().screen_size();
    let area = SpawnArea::inset(screen, NOTE_INSET);
    assert_eq!(area.min, Vec2::new(-360.0, -200.0));
    assert_eq!(area.max, Vec2::new(360.0, 180.0));

    let mut rng = StdRng::seed_from_u64(7);
    let notes = placement::note_positions(&mut rng, area, 20);
    assert_eq!(notes.len(), 20);
    assert!(notes.iter().all(|p| area.contains(*p)));
}

#[test]
fn impossible_radius_falls_back_to_far_corner() {
    let area = SpawnArea {
        min: Vec2::new(-10.0, -10.0),
        max: Vec2::new(30.0, 20.0),
    };
    let mut rng = StdRng::seed_from_u64(1);
    let p = placement::enemy_position(&mut rng, area, Vec2::ZERO, 1000.0);
    assert_eq!(p, Vec2::new(30.0, 20.0));
}

#[test]
fn enemy_velocity_stays_within_speed() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let v = placement::enemy_velocity(&mut rng, 70.0);
        assert!(v.x.abs() <= 70.0 && v.y.abs() <= 70.0);
    }
}

#[test]
fn contacts_put_enemy_hits_first_and_dedupe_notes() {
    let mut world = World::new();
    let player = world.spawn_empty().id();
    let note = world.spawn_empty().id();
    let enemy = world.spawn_empty().id();
    let wall = world.spawn_empty().id();

    let events = [
        start(note, player),
        start(player, note),
        start(enemy, wall),
        start(player, enemy),
    ];
    let contacts = player_contacts(
        events.iter(),
        |e| e == player,
        |e| e == note,
        |e| e == enemy,
    );
    assert_eq!(contacts, vec![Contact::Enemy, Contact::Note(note)]);
}

#[test]
fn start_level_reads_and_consumes_the_payload() {
    let mut world = session_world(1);
    world.remove_resource::<LevelSession>();
    world.insert_resource(Tunables::default());
    world.insert_resource(StartLevel { level: Some(3) });

    run_system_once(&mut world, super::start_level);

    let s = world.resource::<LevelSession>();
    assert_eq!(s.level(), 3);
    assert_eq!(s.notes_remaining(), 14);
    assert_eq!(s.config().enemy_count(), 5);
    assert!(!world.contains_resource::<StartLevel>());

    let audio = drain_messages::<PlayAudio>(&mut world);
    assert_eq!(audio, vec![PlayAudio::looped(AudioKey::GameMusic, 0.4)]);
}

#[test]
fn start_level_without_payload_plays_level_one() {
    let mut world = session_world(1);
    world.remove_resource::<LevelSession>();
    world.insert_resource(Tunables::default());

    run_system_once(&mut world, super::start_level);

    assert_eq!(world.resource::<LevelSession>().level(), 1);
}

#[test]
fn picking_up_a_note_scores_and_despawns_it() {
    let mut world = session_world(1);
    let player = world.spawn(Player).id();
    let note = world.spawn(Note).id();
    world.write_message(start(player, note));
    world.write_message(start(note, player));

    run_system_once(&mut world, super::contacts::resolve_contacts);

    let s = world.resource::<LevelSession>();
    assert_eq!(s.score(), 10);
    assert_eq!(s.notes_remaining(), 9);
    assert!(world.get_entity(note).is_err());

    let audio = drain_messages::<PlayAudio>(&mut world);
    assert_eq!(audio.len(), 1);
    assert_eq!(audio[0].key, AudioKey::NotePickup);
    assert!(drain_messages::<LevelEnded>(&mut world).is_empty());
}

#[test]
fn enemy_beats_the_last_note_in_the_same_frame() {
    let mut world = session_world(1);
    {
        let mut s = world.resource_mut::<LevelSession>();
        for _ in 0..9 {
            s.collect_note();
        }
    }
    let player = world.spawn(Player).id();
    let note = world.spawn(Note).id();
    let enemy = world.spawn(Enemy).id();
    world.write_message(start(player, note));
    world.write_message(start(enemy, player));

    run_system_once(&mut world, super::contacts::resolve_contacts);

    let ended = drain_messages::<LevelEnded>(&mut world);
    assert_eq!(
        ended,
        vec![LevelEnded(LevelOutcome {
            success: false,
            score: 90,
            level: 1
        })]
    );
    assert!(world.get_entity(note).is_ok());
}

#[test]
fn contacts_between_non_players_are_ignored() {
    let mut world = session_world(1);
    let note = world.spawn(Note).id();
    let enemy = world.spawn(Enemy).id();
    world.write_message(start(note, enemy));

    run_system_once(&mut world, super::contacts::resolve_contacts);

    assert_eq!(world.resource::<LevelSession>().score(), 0);
    assert!(world.get_entity(note).is_ok());
}

#[test]
fn end_level_freezes_and_hands_off() {
    let mut world = session_world(2);
    world.insert_resource(Time::<Physics>::default());
    world.init_resource::<NextState<GameState>>();
    let outcome = LevelOutcome {
        success: true,
        score: 120,
        level: 2,
    };
    world.write_message(LevelEnded(outcome));

    run_system_once(&mut world, super::end_level);

    assert_eq!(*world.resource::<LevelOutcome>(), outcome);
    assert!(world.resource::<Time<Physics>>().is_paused());
    assert!(matches!(
        *world.resource::<NextState<GameState>>(),
        NextState::Pending(GameState::GameOver)
    ));
    assert_eq!(
        drain_messages::<StopAudio>(&mut world),
        vec![StopAudio {
            key: AudioKey::GameMusic
        }]
    );
    let cues = drain_messages::<PlayAudio>(&mut world);
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].key, AudioKey::Win);
}

#[test]
fn end_level_does_nothing_without_a_decision() {
    let mut world = session_world(1);
    world.init_resource::<NextState<GameState>>();

    run_system_once(&mut world, super::end_level);

    assert!(!world.contains_resource::<LevelOutcome>());
    assert!(matches!(
        *world.resource::<NextState<GameState>>(),
        NextState::Unchanged
    ));
}

#[test]
fn hud_labels() {
    assert_eq!(super::hud::score_label(30), "Notes: 30");
    assert_eq!(super::hud::time_label(7), "Time: 7");
}

#[test]
fn hud_follows_the_session() {
    let mut world = session_world(1);
    world.insert_resource(Tunables::default());
    run_system_once(&mut world, super::hud::spawn_hud);

    world.resource_mut::<LevelSession>().collect_note();
    run_system_once(&mut world, super::hud::refresh_hud);

    let score = world
        .query_filtered::<&Text2d, With<super::hud::ScoreText>>()
        .single(&world)
        .unwrap();
    assert_eq!(score.0, "Notes: 10");
}

#[test]
fn score_is_ten_per_pickup() {
    for level in [1, 4] {
        let mut s = session(level);
        let total = s.notes_remaining();
        for k in 1..=total {
            s.collect_note();
            assert_eq!(s.score(), 10 * k as u32, "level {level}, k {k}");
        }
        assert!(s.outcome().is_some_and(|o| o.success));
    }
}

#[test]
fn undersized_screen_collapses_the_spawn_area() {
    let area = SpawnArea::inset(Vec2::new(50.0, 50.0), NOTE_INSET);
    assert_eq!(area.min, area.max);

    let mut rng = StdRng::seed_from_u64(2);
    let notes = placement::note_positions(&mut rng, area, 3);
    assert!(notes.iter().all(|p| *p == area.min));

    let enemy = placement::enemy_position(&mut rng, area, Vec2::ZERO, 200.0);
    assert!(area.contains(enemy));
}
