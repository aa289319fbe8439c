//! Animation registry + spritesheet playback.
//!
//! Clips are process-wide: they are registered once, when Preload finishes,
//! and never torn down. `SpriteAnimation` is the per-entity playhead.

use std::time::Duration;

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::plugins::assets::SheetKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKey {
    PlayerFly,
    PlayerIdle,
    EnemyFly,
}

/// Inclusive frame range on one spritesheet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationClip {
    pub sheet: SheetKey,
    pub first: usize,
    pub last: usize,
    pub fps: f32,
    pub looping: bool,
}

impl AnimationClip {
    pub fn frame_count(&self) -> usize {
        self.last.saturating_sub(self.first) + 1
    }

    fn frame_duration(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.fps.max(0.001))
    }
}

#[derive(Resource, Debug, Default)]
pub struct AnimationRegistry {
    clips: HashMap<AnimationKey, AnimationClip>,
    initialized: bool,
}

impl AnimationRegistry {
    pub fn register(&mut self, key: AnimationKey, clip: AnimationClip) {
        if self.clips.insert(key, clip).is_some() {
            warn!("Animation {key:?} registered twice; keeping the latest");
        }
    }

    pub fn get(&self, key: AnimationKey) -> Option<&AnimationClip> {
        self.clips.get(&key)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Register the game's clips. Returns `false` if this already happened.
    pub fn register_defaults(&mut self) -> bool {
        if self.initialized {
            return false;
        }
        self.register(
            AnimationKey::PlayerFly,
            AnimationClip {
                sheet: SheetKey::Player,
                first: 0,
                last: 16,
                fps: 15.0,
                looping: true,
            },
        );
        self.register(
            AnimationKey::PlayerIdle,
            AnimationClip {
                sheet: SheetKey::Player,
                first: 0,
                last: 3,
                fps: 4.0,
                looping: true,
            },
        );
        self.register(
            AnimationKey::EnemyFly,
            AnimationClip {
                sheet: SheetKey::Enemy,
                first: 0,
                last: 16,
                fps: 5.0,
                looping: true,
            },
        );
        self.initialized = true;
        true
    }
}

/// Playhead for one sprite.
#[derive(Component, Debug, Clone)]
pub struct SpriteAnimation {
    key: AnimationKey,
    frame: usize,
    timer: Timer,
    finished: bool,
}

impl SpriteAnimation {
    pub fn new(key: AnimationKey, clip: &AnimationClip) -> Self {
        Self {
            key,
            frame: 0,
            timer: Timer::new(clip.frame_duration(), TimerMode::Repeating),
            finished: false,
        }
    }

    pub fn key(&self) -> AnimationKey {
        self.key
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Switch clips. Asking for the clip that is already playing is a no-op,
    /// so this can be called every frame.
    pub fn play(&mut self, key: AnimationKey, registry: &AnimationRegistry) -> bool {
        if key == self.key {
            return false;
        }
        let Some(clip) = registry.get(key) else {
            warn!("Unknown animation {key:?}");
            return false;
        };
        *self = Self::new(key, clip);
        true
    }

    pub fn atlas_index(&self, clip: &AnimationClip) -> usize {
        clip.first + self.frame
    }

    /// Advance by `delta` and return the atlas index to show.
    pub fn advance(&mut self, clip: &AnimationClip, delta: Duration) -> usize {
        self.timer.tick(delta);
        let steps = self.timer.times_finished_this_tick() as usize;
        if steps > 0 && !self.finished {
            let count = clip.frame_count();
            if clip.looping {
                self.frame = (self.frame + steps) % count;
            } else {
                self.frame = (self.frame + steps).min(count - 1);
                self.finished = self.frame == count - 1;
            }
        }
        self.atlas_index(clip)
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<AnimationRegistry>()
        .add_systems(Update, advance_animations);
}

fn advance_animations(
    time: Res<Time>,
    registry: Res<AnimationRegistry>,
    mut q: Query<(&mut SpriteAnimation, &mut Sprite)>,
) {
    for (mut anim, mut sprite) in &mut q {
        let Some(clip) = registry.get(anim.key) else {
            continue;
        };
        let index = anim.advance(clip, time.delta());
        if let Some(atlas) = sprite.texture_atlas.as_mut() {
            atlas.index = index;
        }
    }
}
