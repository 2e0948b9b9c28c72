use bevy::prelude::*;

use super::spawn_button;
use crate::shared::theme::{self, font, place};
use crate::shared::*;

#[derive(Component)]
pub struct ModalRoot;

const HELP_LINE_STEP: f32 = 30.0;

/// Rebuilds the overlay whenever the modal opens, closes or changes kind.
pub fn sync_modal_overlay(
    mut commands: Commands,
    modal: Res<ActiveModal>,
    existing: Query<Entity, With<ModalRoot>>,
) {
    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }
    let Some(current) = modal.0.as_ref() else {
        return;
    };

    let frame = current.frame();
    let border = match current {
        Modal::Notice { .. } => theme::RED,
        _ => theme::BLACK,
    };

    commands
        .spawn((
            ModalRoot,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            BackgroundColor(theme::SCRIM),
            GlobalZIndex(100),
        ))
        .with_children(|root| {
            root.spawn((
                Node {
                    border: UiRect::all(Val::Px(2.0)),
                    ..place(frame)
                },
                BackgroundColor(theme::WHITE),
                BorderColor(border),
            ));

            match current {
                Modal::Confirm { prompt, .. } => {
                    spawn_frame_line(root, frame, 50.0, prompt, theme::BLACK);
                }
                Modal::Notice {
                    message,
                    suggestion,
                    ..
                } => {
                    spawn_frame_line(root, frame, 50.0, message, theme::RED);
                    spawn_frame_line(root, frame, 100.0, suggestion, theme::BLACK);
                }
                Modal::Help => {
                    for (i, line) in HELP_LINES.iter().enumerate() {
                        root.spawn((
                            Text::new(*line),
                            font(theme::SMALL_FONT),
                            TextColor(theme::BLACK),
                            Node {
                                position_type: PositionType::Absolute,
                                left: Val::Px(frame.min.x + 20.0),
                                top: Val::Px(frame.min.y + 20.0 + i as f32 * HELP_LINE_STEP),
                                ..default()
                            },
                        ));
                    }
                }
            }

            for widget in current.widgets() {
                spawn_button(root, &widget);
            }
        });
}

/// A line of text centered horizontally inside the frame, `offset` px below its top.
fn spawn_frame_line(root: &mut ChildBuilder, frame: Rect, offset: f32, text: &str, color: Color) {
    root.spawn(Node {
        position_type: PositionType::Absolute,
        left: Val::Px(frame.min.x + 10.0),
        top: Val::Px(frame.min.y + offset),
        width: Val::Px(frame.width() - 20.0),
        justify_content: JustifyContent::Center,
        ..default()
    })
    .with_children(|row| {
        row.spawn((
            Text::new(text),
            font(theme::SMALL_FONT),
            TextColor(color),
            TextLayout::new_with_justify(JustifyText::Center),
        ));
    });
}
