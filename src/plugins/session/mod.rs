//! Level session: one run of a level from spawn to outcome.
//!
//! ```text
//! OnEnter(Play)
//!   LevelSetup::Session   consume StartLevel -> LevelSession, game music
//!   LevelSetup::Entities  arena, player, notes, enemies, HUD
//! Update(Play)
//!   PlaySystems::Contacts   CollisionStart -> pickups / fatal hit
//!   PlaySystems::Countdown  one tick per elapsed second
//!   PlaySystems::Outcome    LevelEnded -> freeze, cue, LevelOutcome, GameOver
//! OnExit(Play)
//!   drop LevelSession; scoped entities despawn
//! ```

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::payload::{LevelOutcome, StartLevel};
use crate::common::state::{GameState, LevelSetup, PlaySystems};
use crate::common::tunables::Tunables;
use crate::plugins::audio::{AudioKey, PlayAudio, StopAudio};
use crate::plugins::physics::pause_simulation;

pub mod contacts;
pub mod hud;
pub mod level;
pub mod placement;

pub use level::{LevelSession, SessionConfig};

const GAME_MUSIC_VOLUME: f32 = 0.4;
const CUE_VOLUME: f32 = 0.8;

/// The session reached a decision this frame.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelEnded(pub LevelOutcome);

pub fn plugin(app: &mut App) {
    app.add_message::<LevelEnded>()
        .configure_sets(
            OnEnter(GameState::Play),
            (LevelSetup::Session, LevelSetup::Entities).chain(),
        )
        .configure_sets(
            Update,
            (
                PlaySystems::Input,
                PlaySystems::Contacts,
                PlaySystems::Countdown,
                PlaySystems::Outcome,
                PlaySystems::Presentation,
            )
                .chain()
                .run_if(in_state(GameState::Play)),
        )
        .add_systems(
            OnEnter(GameState::Play),
            (
                start_level.in_set(LevelSetup::Session),
                hud::spawn_hud.in_set(LevelSetup::Entities),
            ),
        )
        .add_systems(
            Update,
            (
                contacts::resolve_contacts.in_set(PlaySystems::Contacts),
                tick_countdown.in_set(PlaySystems::Countdown),
                hud::refresh_hud.in_set(PlaySystems::Presentation),
            )
                .run_if(resource_exists::<LevelSession>),
        )
        .add_systems(Update, end_level.in_set(PlaySystems::Outcome))
        .add_systems(OnExit(GameState::Play), close_session);
}

fn start_level(
    mut commands: Commands,
    payload: Option<Res<StartLevel>>,
    tunables: Res<Tunables>,
    mut audio: MessageWriter<PlayAudio>,
) {
    let level = match payload {
        Some(p) => {
            if p.level.is_none_or(|l| l == 0) {
                warn!("StartLevel carried no usable level ({:?}); starting level 1", p.level);
            }
            p.level_or_default()
        }
        None => {
            warn!("Entered Play without StartLevel; starting level 1");
            StartLevel::FIRST.level_or_default()
        }
    };
    commands.remove_resource::<StartLevel>();

    let config = SessionConfig::new(level, &tunables);
    info!(
        "Level {} started: {} notes, {} enemies, {}s",
        config.level,
        config.note_count(),
        config.enemy_count(),
        config.level_duration_secs
    );
    commands.insert_resource(LevelSession::new(config, tunables.note_reward));
    audio.write(PlayAudio::looped(AudioKey::GameMusic, GAME_MUSIC_VOLUME));
}

fn tick_countdown(
    time: Res<Time>,
    mut session: ResMut<LevelSession>,
    mut ended: MessageWriter<LevelEnded>,
) {
    if session.is_over() {
        return;
    }
    if let Some(outcome) = session.tick(time.delta()) {
        info!("Time ran out on level {}", outcome.level);
        ended.write(LevelEnded(outcome));
    }
}

/// Freeze the level and hand the outcome over to GameOver.
fn end_level(
    mut commands: Commands,
    mut ended: MessageReader<LevelEnded>,
    physics_time: Option<ResMut<Time<Physics>>>,
    mut stop: MessageWriter<StopAudio>,
    mut play: MessageWriter<PlayAudio>,
    mut next: ResMut<NextState<GameState>>,
) {
    // The session latches, so at most one message per run carries a decision.
    let Some(LevelEnded(outcome)) = ended.read().next().copied() else {
        return;
    };
    ended.clear();

    if let Some(mut physics_time) = physics_time {
        pause_simulation(&mut physics_time);
    }

    stop.write(StopAudio {
        key: AudioKey::GameMusic,
    });
    let cue = if outcome.success {
        AudioKey::Win
    } else {
        AudioKey::GameOver
    };
    play.write(PlayAudio::once(cue, CUE_VOLUME));

    info!(
        "Level {} over: success={}, score={}",
        outcome.level, outcome.success, outcome.score
    );
    commands.insert_resource(outcome);
    next.set(GameState::GameOver);
}

fn close_session(mut commands: Commands) {
    commands.remove_resource::<LevelSession>();
}

#[cfg(test)]
mod tests;
