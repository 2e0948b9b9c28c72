use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::shared::theme::{self, font};
use crate::shared::*;

#[derive(Component)]
pub struct TooltipBox;

#[derive(Component)]
pub struct TooltipText;

pub fn spawn_tooltip(mut commands: Commands) {
    commands
        .spawn((
            TooltipBox,
            Node {
                position_type: PositionType::Absolute,
                border: UiRect::all(Val::Px(2.0)),
                padding: UiRect::all(Val::Px(5.0)),
                ..default()
            },
            BackgroundColor(theme::LIGHT_BLUE),
            BorderColor(theme::BLACK),
            GlobalZIndex(90),
            Visibility::Hidden,
        ))
        .with_children(|tip| {
            tip.spawn((
                TooltipText,
                Text::new(""),
                font(theme::SMALL_FONT),
                TextColor(theme::BLACK),
            ));
        });
}

/// Shows the hovered button's tooltip at the cursor.
pub fn update_tooltip(
    windows: Query<&Window, With<PrimaryWindow>>,
    widgets: Res<ActiveWidgets>,
    modal: Res<ActiveModal>,
    mut boxes: Query<(&mut Node, &mut Visibility), With<TooltipBox>>,
    mut texts: Query<&mut Text, With<TooltipText>>,
) {
    let cursor = windows.get_single().ok().and_then(Window::cursor_position);
    let hovered = match cursor {
        Some(cursor) if !modal.is_open() => hit_test(&widgets.0, cursor)
            .and_then(|w| w.tooltip)
            .map(|tip| (cursor, tip)),
        _ => None,
    };

    let Ok((mut node, mut visibility)) = boxes.get_single_mut() else {
        return;
    };
    let Some((cursor, tip)) = hovered else {
        if *visibility != Visibility::Hidden {
            *visibility = Visibility::Hidden;
        }
        return;
    };

    node.left = Val::Px(cursor.x);
    node.top = Val::Px(cursor.y);
    *visibility = Visibility::Inherited;
    for mut text in &mut texts {
        if text.0 != tip {
            text.0 = tip.to_string();
        }
    }
}
