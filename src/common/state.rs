//! Global state machine.
//!
//! ```text
//! Preload -> Menu -> Play -> GameOver -> Menu -> ...
//! ```
//!
//! Every transition hands a payload resource forward (see `payload`).

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Preload,
    Menu,
    Play,
    GameOver,
}

/// OnEnter(Play) ordering: the session resource must exist before anything
/// that reads its config is spawned.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LevelSetup {
    Session,
    Entities,
}

/// Update ordering while Play is active.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlaySystems {
    Input,
    Contacts,
    Countdown,
    Outcome,
    Presentation,
}
