//! Title screen.
//!
//! ```text
//! OnEnter(Menu): cover + prompt, confirm listener, intro music
//! Update(Menu):  ConfirmPressed{Menu} -> StartLevel{1}, Play
//! OnExit(Menu):  stop intro music
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::payload::StartLevel;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::assets::{AssetCatalog, ImageKey};
use crate::plugins::audio::{AudioKey, PlayAudio, StopAudio};
use crate::plugins::input::{ConfirmPressed, confirm_listener};

pub const PROMPT: &str = "Press [ ENTER ] to start";

const INTRO_VOLUME: f32 = 0.5;

#[derive(Component)]
pub struct MenuPrompt;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::Menu), (spawn_menu, start_intro_music))
        .add_systems(Update, start_on_confirm.run_if(in_state(GameState::Menu)))
        .add_systems(OnExit(GameState::Menu), stop_intro_music);
}

fn spawn_menu(mut commands: Commands, tunables: Res<Tunables>, catalog: Res<AssetCatalog>) {
    let screen = tunables.screen_size();
    let cover = match catalog.image(ImageKey::Cover) {
        Some(image) => Sprite {
            image,
            custom_size: Some(screen),
            ..default()
        },
        None => Sprite::from_color(Color::srgb(0.1, 0.16, 0.2), screen),
    };

    commands.spawn((
        Name::new("MenuCover"),
        cover,
        Transform::from_xyz(0.0, 0.0, 0.0),
        DespawnOnExit(GameState::Menu),
    ));

    let prompt_y = -screen.y * 0.5 + 60.0;
    commands.spawn((
        Name::new("MenuPromptBackdrop"),
        Sprite::from_color(Color::srgba(0.0, 0.0, 0.0, 0.6), Vec2::new(screen.x, 50.0)),
        Transform::from_xyz(0.0, prompt_y, 1.0),
        DespawnOnExit(GameState::Menu),
    ));
    commands.spawn((
        Name::new("MenuPrompt"),
        MenuPrompt,
        Text2d::new(PROMPT),
        TextFont::from_font_size(24.0),
        TextColor(Color::WHITE),
        Transform::from_xyz(0.0, prompt_y, 2.0),
        DespawnOnExit(GameState::Menu),
    ));

    commands.spawn(confirm_listener(GameState::Menu));
}

fn start_intro_music(mut audio: MessageWriter<PlayAudio>) {
    audio.write(PlayAudio::looped(AudioKey::IntroMusic, INTRO_VOLUME));
}

fn stop_intro_music(mut audio: MessageWriter<StopAudio>) {
    audio.write(StopAudio {
        key: AudioKey::IntroMusic,
    });
}

fn start_on_confirm(
    mut commands: Commands,
    mut confirms: MessageReader<ConfirmPressed>,
    mut next: ResMut<NextState<GameState>>,
) {
    let confirmed = confirms
        .read()
        .filter(|c| c.owner == GameState::Menu)
        .count()
        > 0;
    if !confirmed {
        return;
    }
    info!("Starting level 1");
    commands.insert_resource(StartLevel::FIRST);
    next.set(GameState::Play);
}
