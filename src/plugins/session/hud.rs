//! Score and time readouts for the active level.

use bevy::prelude::*;
use bevy::sprite::Anchor;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;

use super::level::LevelSession;

const HUD_MARGIN: Vec2 = Vec2::new(12.0, 10.0);

#[derive(Component)]
pub struct ScoreText;

#[derive(Component)]
pub struct TimeText;

pub fn score_label(score: u32) -> String {
    format!("Notes: {score}")
}

pub fn time_label(seconds: u32) -> String {
    format!("Time: {seconds}")
}

pub(super) fn spawn_hud(
    mut commands: Commands,
    session: Res<LevelSession>,
    tunables: Res<Tunables>,
) {
    let half = tunables.screen_size() * 0.5;

    commands.spawn((
        Name::new("ScoreText"),
        ScoreText,
        Text2d::new(score_label(session.score())),
        TextFont::from_font_size(18.0),
        TextColor(Color::srgb_u8(0xc8, 0xf7, 0xc5)),
        Anchor::TOP_LEFT,
        Transform::from_xyz(-half.x + HUD_MARGIN.x, half.y - HUD_MARGIN.y, 50.0),
        DespawnOnExit(GameState::Play),
    ));

    commands.spawn((
        Name::new("TimeText"),
        TimeText,
        Text2d::new(time_label(session.time_left())),
        TextFont::from_font_size(18.0),
        TextColor(Color::srgb_u8(0xf9, 0xe7, 0x9f)),
        Anchor::TOP_RIGHT,
        Transform::from_xyz(half.x - HUD_MARGIN.x, half.y - HUD_MARGIN.y, 50.0),
        DespawnOnExit(GameState::Play),
    ));
}

pub(super) fn refresh_hud(
    session: Res<LevelSession>,
    mut q_score: Query<&mut Text2d, (With<ScoreText>, Without<TimeText>)>,
    mut q_time: Query<&mut Text2d, (With<TimeText>, Without<ScoreText>)>,
) {
    if !session.is_changed() {
        return;
    }
    let score = score_label(session.score());
    for mut text in &mut q_score {
        if text.0 != score {
            text.0.clone_from(&score);
        }
    }
    let time = time_label(session.time_left());
    for mut text in &mut q_time {
        if text.0 != time {
            text.0.clone_from(&time);
        }
    }
}
