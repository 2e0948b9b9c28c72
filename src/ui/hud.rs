use bevy::prelude::*;

use crate::shared::theme::{self, font, place};
use crate::shared::*;

#[derive(Component)]
pub struct ProgressFill;

#[derive(Component)]
pub struct ProgressLabel;

fn progress_bar_rect() -> Rect {
    canvas_rect(50.0, 20.0, 700.0, 20.0)
}

pub fn progress_text(game: &GameState) -> String {
    format!(
        "Progress: {:.1}% - {}",
        game.progress,
        game.current_location()
    )
}

pub fn spawn_progress_bar(mut commands: Commands, game: Res<GameState>) {
    let bar = progress_bar_rect();

    commands
        .spawn((
            Node {
                border: UiRect::all(Val::Px(2.0)),
                ..place(bar)
            },
            BorderColor(theme::WHITE),
        ))
        .with_children(|frame| {
            frame.spawn((
                ProgressFill,
                Node {
                    width: Val::Percent(game.progress_fraction() * 100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(theme::GREEN),
            ));
        });

    commands.spawn((
        ProgressLabel,
        Text::new(progress_text(&game)),
        font(theme::SMALL_FONT),
        TextColor(theme::BLACK),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(bar.min.x),
            top: Val::Px(bar.max.y + 5.0),
            ..default()
        },
    ));
}

pub fn update_progress_bar(
    game: Res<GameState>,
    mut fills: Query<&mut Node, With<ProgressFill>>,
    mut labels: Query<&mut Text, With<ProgressLabel>>,
) {
    for mut node in &mut fills {
        node.width = Val::Percent(game.progress_fraction() * 100.0);
    }
    for mut text in &mut labels {
        text.0 = progress_text(&game);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_text_format() {
        let mut game = GameState::default();
        assert_eq!(progress_text(&game), "Progress: 0.0% - INDEPENDENCE (START)");
        let _ = game.advance();
        assert_eq!(progress_text(&game), "Progress: 7.7% - FORT KEARNEY");
    }
}
