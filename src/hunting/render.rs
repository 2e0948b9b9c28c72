//! Hunting overlay: sky, prairie, the moving target and the score/timer readout.

use bevy::prelude::*;

use super::HuntingSession;
use crate::shared::*;
use crate::shared::theme::{self, font};

const INSTRUCTIONS: &str = "To score: Hover mouse over the moving square and press spacebar";

// ─── Markers ──────────────────────────────────────────────────────────────────

#[derive(Component)]
pub struct HuntRoot;

#[derive(Component)]
pub struct HuntTarget;

#[derive(Component)]
pub struct HuntScoreText;

#[derive(Component)]
pub struct HuntTimerText;

// ─── OnEnter(UiState::Hunting) ───────────────────────────────────────────────

pub fn spawn_hunt_overlay(mut commands: Commands, session: Option<Res<HuntingSession>>) {
    let target = session
        .map(|s| s.target_rect())
        .unwrap_or_else(|| canvas_rect(0.0, super::TARGET_Y, super::TARGET_SIZE, super::TARGET_SIZE));

    commands
        .spawn((
            HuntRoot,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            BackgroundColor(theme::PRAIRIE_GREEN),
            GlobalZIndex(50),
        ))
        .with_children(|root| {
            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Percent(100.0),
                    height: Val::Percent(50.0),
                    ..default()
                },
                BackgroundColor(theme::SKY_BLUE),
            ));

            root.spawn((
                HuntTarget,
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(target.min.x),
                    top: Val::Px(target.min.y),
                    width: Val::Px(target.width()),
                    height: Val::Px(target.height()),
                    ..default()
                },
                BackgroundColor(theme::WAGON_BROWN),
            ));

            root.spawn((
                HuntScoreText,
                Text::new("Score: 0"),
                font(theme::SMALL_FONT),
                TextColor(theme::BLACK),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(10.0),
                    top: Val::Px(10.0),
                    ..default()
                },
            ));

            root.spawn((
                HuntTimerText,
                Text::new(""),
                font(theme::SMALL_FONT),
                TextColor(theme::BLACK),
                Node {
                    position_type: PositionType::Absolute,
                    right: Val::Px(10.0),
                    top: Val::Px(10.0),
                    ..default()
                },
            ));

            root.spawn(Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(10.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                ..default()
            })
            .with_children(|row| {
                row.spawn((
                    Text::new(INSTRUCTIONS),
                    font(theme::SMALL_FONT),
                    TextColor(theme::BLACK),
                ));
            });
        });
}

// ─── OnExit(UiState::Hunting) ────────────────────────────────────────────────

pub fn despawn_hunt_overlay(mut commands: Commands, roots: Query<Entity, With<HuntRoot>>) {
    for entity in &roots {
        commands.entity(entity).despawn_recursive();
    }
}

// ─── Update ──────────────────────────────────────────────────────────────────

pub fn update_hunt_overlay(
    time: Res<Time<Real>>,
    session: Res<HuntingSession>,
    mut targets: Query<&mut Node, With<HuntTarget>>,
    mut scores: Query<&mut Text, (With<HuntScoreText>, Without<HuntTimerText>)>,
    mut timers: Query<&mut Text, (With<HuntTimerText>, Without<HuntScoreText>)>,
) {
    let now = time.elapsed();
    for mut node in &mut targets {
        node.left = Val::Px(session.target_x());
    }
    for mut text in &mut scores {
        text.0 = format!("Score: {}", session.score());
    }
    for mut text in &mut timers {
        text.0 = format!("Time left: {}s", session.time_left_secs(now));
    }
}
