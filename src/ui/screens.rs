use bevy::prelude::*;

use crate::shared::theme::{self, font, place};
use super::spawn_button;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

/// Everything belonging to the current screen hangs off this node.
#[derive(Component)]
pub struct ScreenRoot;

#[derive(Component)]
pub struct NameFieldBox;

#[derive(Component)]
pub struct NameFieldText;

const HIGH_SCORE_PANEL: (f32, f32, f32, f32) = (150.0, 100.0, 500.0, 330.0);
const READOUT_LEFT: f32 = 300.0;
const READOUT_TOP: f32 = 130.0;
const READOUT_ROW: f32 = 30.0;

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

/// Tears down the previous screen and builds the one for the new state.
pub fn rebuild_screen(
    mut commands: Commands,
    state: Res<State<UiState>>,
    widgets: Res<ActiveWidgets>,
    game: Res<GameState>,
    name_entry: Res<NameEntry>,
    existing: Query<Entity, With<ScreenRoot>>,
) {
    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }

    let state = *state.get();
    // The hunting overlay owns the whole window.
    if state == UiState::Hunting {
        return;
    }

    commands
        .spawn((
            ScreenRoot,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
        ))
        .with_children(|root| {
            spawn_title(root, state);
            match state {
                UiState::CharacterCreation => spawn_name_field(root, &name_entry.0),
                UiState::HighScores => spawn_high_score_panel(root),
                UiState::Victory => spawn_centered_line(
                    root,
                    200.0,
                    "You've successfully reached Oregon!",
                    theme::BUTTON_FONT,
                ),
                UiState::CharacterProgress => spawn_readout(root, &character_lines(&game)),
                UiState::Inventory => spawn_readout(root, &inventory_lines(&game)),
                _ => {}
            }
            for widget in &widgets.0 {
                spawn_button(root, widget);
            }
        });
}

fn title_top(state: UiState) -> f32 {
    match state {
        UiState::CharacterCreation
        | UiState::ClassSelection
        | UiState::DifficultySelection
        | UiState::Victory => 100.0,
        _ => 50.0,
    }
}

fn spawn_title(root: &mut ChildBuilder, state: UiState) {
    let color = if state == UiState::Victory {
        theme::GREEN
    } else {
        theme::BLACK
    };
    root.spawn(Node {
        position_type: PositionType::Absolute,
        top: Val::Px(title_top(state)),
        width: Val::Percent(100.0),
        justify_content: JustifyContent::Center,
        ..default()
    })
    .with_children(|row| {
        row.spawn((
            Text::new(state.title()),
            font(theme::TITLE_FONT),
            TextColor(color),
        ));
    });
}

fn spawn_centered_line(root: &mut ChildBuilder, top: f32, text: &str, size: f32) {
    root.spawn(Node {
        position_type: PositionType::Absolute,
        top: Val::Px(top),
        width: Val::Percent(100.0),
        justify_content: JustifyContent::Center,
        ..default()
    })
    .with_children(|row| {
        row.spawn((Text::new(text), font(size), TextColor(theme::BLACK)));
    });
}

fn spawn_name_field(root: &mut ChildBuilder, field: &InputBox) {
    root.spawn((
        NameFieldBox,
        Node {
            border: UiRect::all(Val::Px(2.0)),
            padding: UiRect::all(Val::Px(5.0)),
            ..place(field.rect)
        },
        BorderColor(theme::BLACK),
    ))
    .with_children(|field_node| {
        field_node.spawn((
            NameFieldText,
            Text::new(field.text.clone()),
            font(theme::SMALL_FONT),
            TextColor(theme::BLACK),
        ));
    });
}

fn spawn_high_score_panel(root: &mut ChildBuilder) {
    let (x, y, w, h) = HIGH_SCORE_PANEL;
    root.spawn((
        Node {
            border: UiRect::all(Val::Px(2.0)),
            ..place(canvas_rect(x, y, w, h))
        },
        BackgroundColor(theme::WHITE),
        BorderColor(theme::BLACK),
    ));
}

fn spawn_readout(root: &mut ChildBuilder, lines: &[String]) {
    for (row, line) in lines.iter().enumerate() {
        root.spawn((
            Text::new(line.clone()),
            font(theme::SMALL_FONT),
            TextColor(theme::BLACK),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(READOUT_LEFT),
                top: Val::Px(READOUT_TOP + row as f32 * READOUT_ROW),
                ..default()
            },
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// READOUTS
// ═══════════════════════════════════════════════════════════════════════

pub fn character_lines(game: &GameState) -> Vec<String> {
    let name = if game.character_name.is_empty() {
        "(unnamed)"
    } else {
        game.character_name.as_str()
    };
    vec![
        format!("Name: {}", name),
        format!(
            "Class: {}",
            game.character_class.map(CharacterClass::name).unwrap_or("-")
        ),
        format!(
            "Difficulty: {}",
            game.difficulty.map(Difficulty::label).unwrap_or("-")
        ),
        format!("Health: {}", game.health),
        format!("Money: ${}", game.money),
        format!(
            "Miles traveled: {} of {}",
            game.miles_travelled(),
            TOTAL_DISTANCE_MILES
        ),
    ]
}

pub fn inventory_lines(game: &GameState) -> Vec<String> {
    if game.inventory.is_empty() {
        return vec!["Your wagon is empty.".to_string()];
    }
    game.inventory
        .iter()
        .map(|(item, count)| format!("{}: {}", item, count))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE
// ═══════════════════════════════════════════════════════════════════════

/// Mirrors the name field's text and focus.
pub fn update_name_field(
    name_entry: Res<NameEntry>,
    mut texts: Query<&mut Text, With<NameFieldText>>,
    mut borders: Query<&mut BorderColor, With<NameFieldBox>>,
) {
    let field = &name_entry.0;
    for mut text in &mut texts {
        text.0 = if field.active {
            format!("{}|", field.text)
        } else {
            field.text.clone()
        };
    }
    for mut border in &mut borders {
        border.0 = if field.active { theme::BLUE } else { theme::BLACK };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_readout_for_fresh_game() {
        let lines = character_lines(&GameState::default());
        assert_eq!(lines[0], "Name: (unnamed)");
        assert_eq!(lines[1], "Class: -");
        assert_eq!(lines[4], "Money: $1000");
        assert_eq!(lines[5], "Miles traveled: 0 of 2000");
    }

    #[test]
    fn test_inventory_readout() {
        let mut game = GameState::default();
        assert_eq!(inventory_lines(&game), ["Your wagon is empty."]);
        game.inventory.insert("Oxen".to_string(), 4);
        game.inventory.insert("Food".to_string(), 200);
        assert_eq!(inventory_lines(&game), ["Food: 200", "Oxen: 4"]);
    }
}
