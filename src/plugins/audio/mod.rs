//! Audio: play / stop requests by key.
//!
//! States never touch `AudioPlayer` directly. They write `PlayAudio` /
//! `StopAudio` messages and this plugin is the single writer of audio
//! entities. Stops are applied before plays so a state can stop the
//! previous loop and start its own in the same frame.

use bevy::audio::Volume;
use bevy::prelude::*;

pub use crate::plugins::assets::AudioKey;
use crate::plugins::assets::AssetCatalog;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct PlayAudio {
    pub key: AudioKey,
    pub looped: bool,
    /// Linear, 0..=1.
    pub volume: f32,
}

impl PlayAudio {
    pub fn looped(key: AudioKey, volume: f32) -> Self {
        Self {
            key,
            looped: true,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub fn once(key: AudioKey, volume: f32) -> Self {
        Self {
            key,
            looped: false,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    fn settings(&self) -> PlaybackSettings {
        let base = if self.looped {
            PlaybackSettings::LOOP
        } else {
            PlaybackSettings::DESPAWN
        };
        base.with_volume(Volume::Linear(self.volume))
    }
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StopAudio {
    pub key: AudioKey,
}

/// Tags every audio entity with the clip it plays.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioTrack {
    pub key: AudioKey,
    pub looped: bool,
}

pub fn plugin(app: &mut App) {
    app.add_message::<PlayAudio>()
        .add_message::<StopAudio>()
        .add_systems(PostUpdate, (apply_stop_requests, apply_play_requests).chain());
}

fn apply_stop_requests(
    mut commands: Commands,
    mut requests: MessageReader<StopAudio>,
    tracks: Query<(Entity, &AudioTrack)>,
) {
    for req in requests.read() {
        for (e, track) in &tracks {
            if track.key == req.key {
                commands.entity(e).despawn();
            }
        }
    }
}

fn apply_play_requests(
    mut commands: Commands,
    catalog: Res<AssetCatalog>,
    mut requests: MessageReader<PlayAudio>,
) {
    for req in requests.read() {
        let Some(handle) = catalog.audio(req.key) else {
            warn!("No audio clip for {:?}", req.key);
            continue;
        };
        commands.spawn((
            Name::new(format!("Audio {:?}", req.key)),
            AudioTrack {
                key: req.key,
                looped: req.looped,
            },
            AudioPlayer::new(handle),
            req.settings(),
        ));
    }
}
