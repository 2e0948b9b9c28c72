use bevy::prelude::*;

use crate::shared::theme::{self, font, place};
use crate::shared::*;

const ROW_HEIGHT: f32 = 20.0;
const SCROLLBAR_WIDTH: f32 = 10.0;

#[derive(Component)]
pub struct LogRow {
    pub index: usize,
}

pub fn spawn_log_panel(mut commands: Commands) {
    let panel = log_panel_rect();

    commands
        .spawn((
            Node {
                border: UiRect::all(Val::Px(2.0)),
                ..place(panel)
            },
            BackgroundColor(theme::WHITE),
            BorderColor(theme::BLACK),
        ))
        .with_children(|panel_node| {
            for index in 0..LOG_VISIBLE_ROWS {
                panel_node.spawn((
                    LogRow { index },
                    Text::new(""),
                    font(theme::SMALL_FONT),
                    TextColor(theme::BLACK),
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(5.0),
                        top: Val::Px(3.0 + index as f32 * ROW_HEIGHT),
                        ..default()
                    },
                ));
            }

            // Scrollbar track along the right edge
            panel_node.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    right: Val::Px(0.0),
                    top: Val::Px(0.0),
                    width: Val::Px(SCROLLBAR_WIDTH),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(theme::BLACK),
            ));
        });
}

pub fn update_log_panel(log: Res<EventLog>, mut rows: Query<(&LogRow, &mut Text)>) {
    let visible: Vec<&str> = log.visible().collect();
    for (row, mut text) in &mut rows {
        let line = visible.get(row.index).copied().unwrap_or_default();
        if text.0 != line {
            text.0 = line.to_string();
        }
    }
}
