//! Input: confirm listeners and the four logical directions.
//!
//! A state that wants a confirm trigger spawns a `ConfirmListener` scoped to
//! itself. The listener is armed for exactly one press; when it fires it writes
//! a `ConfirmPressed` tagged with its owner state, so nothing leaks into the
//! next state and repeated cycles never stack handlers.

use bevy::input::InputSystems;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;

/// Key that confirms on both menu screens.
pub const CONFIRM_KEY: KeyCode = KeyCode::Enter;

#[derive(Component, Debug, Clone)]
pub struct ConfirmListener {
    pub key: KeyCode,
    pub owner: GameState,
    fired: bool,
}

impl ConfirmListener {
    pub fn new(key: KeyCode, owner: GameState) -> Self {
        Self {
            key,
            owner,
            fired: false,
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Listener bundle for `owner`, despawned when `owner` exits.
pub fn confirm_listener(owner: GameState) -> impl Bundle {
    (
        Name::new(format!("ConfirmListener {owner:?}")),
        ConfirmListener::new(CONFIRM_KEY, owner),
        DespawnOnExit(owner),
    )
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfirmPressed {
    pub owner: GameState,
}

/// Held state of the four logical directions. Arrow keys and WASD alias.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl DirectionKeys {
    pub fn from_keys(keys: &ButtonInput<KeyCode>) -> Self {
        Self {
            left: keys.any_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]),
            right: keys.any_pressed([KeyCode::ArrowRight, KeyCode::KeyD]),
            up: keys.any_pressed([KeyCode::ArrowUp, KeyCode::KeyW]),
            down: keys.any_pressed([KeyCode::ArrowDown, KeyCode::KeyS]),
        }
    }

    /// Unit-per-axis direction, y-up. When both keys of an axis are held the
    /// negative one (left / up) wins.
    pub fn axis(&self) -> Vec2 {
        let x = if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        };
        let y = if self.up {
            1.0
        } else if self.down {
            -1.0
        } else {
            0.0
        };
        Vec2::new(x, y)
    }
}

pub fn plugin(app: &mut App) {
    app.add_message::<ConfirmPressed>()
        .add_systems(PreUpdate, detect_confirm.after(InputSystems));
}

fn pointer_pressed(mouse: Option<&ButtonInput<MouseButton>>, touches: Option<&Touches>) -> bool {
    mouse.is_some_and(|m| m.get_just_pressed().next().is_some())
        || touches.is_some_and(|t| t.any_just_pressed())
}

fn detect_confirm(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    touches: Option<Res<Touches>>,
    mut listeners: Query<&mut ConfirmListener>,
    mut writer: MessageWriter<ConfirmPressed>,
) {
    let pointer = pointer_pressed(mouse.as_deref(), touches.as_deref());
    for mut listener in &mut listeners {
        if listener.fired {
            continue;
        }
        let key = keys.as_ref().is_some_and(|k| k.just_pressed(listener.key));
        if key || pointer {
            listener.fired = true;
            debug!("Confirm for {:?}", listener.owner);
            writer.write(ConfirmPressed {
                owner: listener.owner,
            });
        }
    }
}
