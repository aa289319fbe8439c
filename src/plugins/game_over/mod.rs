//! Results screen shown after every level attempt.
//!
//! Reads the `LevelOutcome` left by Play and always offers a way back to the
//! menu. There is no next-level progression.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::payload::LevelOutcome;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::assets::{AssetCatalog, ImageKey};
use crate::plugins::input::{ConfirmPressed, confirm_listener};

pub const REPLAY_PROMPT: &str = "[ ENTER ] to play again";

/// One line of the results screen.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultLine {
    Headline,
    Score,
    Level,
    Prompt,
}

pub fn headline(outcome: &LevelOutcome) -> &'static str {
    if outcome.success {
        "You survived!"
    } else {
        "Game Over!"
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::GameOver), spawn_results)
        .add_systems(Update, back_to_menu.run_if(in_state(GameState::GameOver)))
        .add_systems(OnExit(GameState::GameOver), clear_outcome);
}

fn spawn_results(
    mut commands: Commands,
    outcome: Option<Res<LevelOutcome>>,
    tunables: Res<Tunables>,
    catalog: Res<AssetCatalog>,
) {
    let outcome = match outcome {
        Some(o) => *o,
        None => {
            warn!("Entered GameOver without a LevelOutcome");
            LevelOutcome::FALLBACK
        }
    };
    let screen = tunables.screen_size();

    let backdrop = match catalog.image(ImageKey::Background) {
        Some(image) => Sprite {
            image,
            custom_size: Some(screen),
            color: Color::srgb(0.5, 0.5, 0.5),
            ..default()
        },
        None => Sprite::from_color(Color::srgb(0.06, 0.08, 0.1), screen),
    };
    commands.spawn((
        Name::new("ResultsBackdrop"),
        backdrop,
        Transform::from_xyz(0.0, 0.0, 0.0),
        DespawnOnExit(GameState::GameOver),
    ));

    let lines = [
        (ResultLine::Headline, headline(&outcome).to_owned(), 40.0, 90.0),
        (ResultLine::Score, format!("Score: {}", outcome.score), 26.0, 20.0),
        (ResultLine::Level, format!("Level {}", outcome.level), 22.0, -20.0),
        (ResultLine::Prompt, REPLAY_PROMPT.to_owned(), 22.0, -110.0),
    ];
    for (line, text, size, y) in lines {
        commands.spawn((
            Name::new(format!("Result {line:?}")),
            line,
            Text2d::new(text),
            TextFont::from_font_size(size),
            TextColor(Color::WHITE),
            Transform::from_xyz(0.0, y, 1.0),
            DespawnOnExit(GameState::GameOver),
        ));
    }

    commands.spawn(confirm_listener(GameState::GameOver));
}

fn back_to_menu(
    mut confirms: MessageReader<ConfirmPressed>,
    mut next: ResMut<NextState<GameState>>,
) {
    let confirmed = confirms
        .read()
        .filter(|c| c.owner == GameState::GameOver)
        .count()
        > 0;
    if confirmed {
        info!("Back to menu");
        next.set(GameState::Menu);
    }
}

fn clear_outcome(mut commands: Commands) {
    commands.remove_resource::<LevelOutcome>();
}
