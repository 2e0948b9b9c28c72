//! Which buttons exist on which screen.

use crate::shared::*;

const BUTTON_W: f32 = 200.0;
const BUTTON_H: f32 = 50.0;
const ROW_STEP: f32 = 70.0;

/// Builds the clickable set for `state`. Every screen but the main menu
/// also gets Back and Main Menu in the bottom-left corner.
pub fn widgets_for(state: UiState) -> Vec<Widget> {
    let mut widgets = match state {
        UiState::MainMenu => return main_menu(),
        UiState::CharacterCreation => vec![Widget::button(
            "NEXT",
            canvas_rect(300.0, 250.0, BUTTON_W, BUTTON_H),
            Action::Next,
        )],
        UiState::ClassSelection => CharacterClass::ALL
            .iter()
            .enumerate()
            .map(|(row, class)| {
                Widget::button(
                    class.caption(),
                    canvas_rect(125.0, row_y(150.0, row), 550.0, BUTTON_H),
                    Action::ChooseClass(*class),
                )
            })
            .collect(),
        UiState::DifficultySelection => Difficulty::ALL
            .iter()
            .enumerate()
            .map(|(row, difficulty)| {
                let tone = match difficulty {
                    Difficulty::Easy => Tone::Green,
                    Difficulty::Medium => Tone::Blue,
                    Difficulty::Hard => Tone::Red,
                };
                Widget::button(
                    difficulty.label(),
                    canvas_rect(300.0, row_y(150.0, row), BUTTON_W, BUTTON_H),
                    Action::ChooseDifficulty(*difficulty),
                )
                .with_tone(tone)
            })
            .collect(),
        UiState::Travel => column(
            50.0,
            100.0,
            &[
                ("INVENTORY", Action::OpenInventory),
                ("CHARACTER", Action::OpenCharacter),
                ("HUNT", Action::Hunt),
                ("SHOP", Action::OpenShop),
                ("TRAVEL", Action::Travel),
            ],
        ),
        UiState::Victory => vec![Widget::button(
            "MAIN MENU",
            canvas_rect(300.0, 300.0, BUTTON_W, BUTTON_H),
            Action::VictoryMenu,
        )],
        UiState::Shop
        | UiState::HighScores
        | UiState::Defeat
        | UiState::Death
        | UiState::RiverCrossing
        | UiState::Inventory
        | UiState::CharacterProgress
        | UiState::ProgressMap
        | UiState::Hunting => Vec::new(),
    };

    widgets.push(Widget::button(
        "BACK",
        canvas_rect(50.0, 450.0, BUTTON_W, BUTTON_H),
        Action::Back,
    ));
    widgets.push(Widget::button(
        "Main Menu",
        canvas_rect(50.0, 520.0, BUTTON_W, BUTTON_H),
        Action::MainMenu,
    ));
    widgets
}

fn main_menu() -> Vec<Widget> {
    let widgets = column(
        300.0,
        150.0,
        &[
            ("NEW GAME", Action::NewGame),
            ("CONTINUE", Action::Continue),
            ("SETTINGS", Action::Settings),
            ("HIGH SCORES", Action::HighScores),
            ("Help", Action::Help),
        ],
    );
    let tooltips = [
        "Start a new Oregon Trail adventure",
        "Continue your saved game",
        "Adjust game settings",
    ];
    widgets
        .into_iter()
        .enumerate()
        .map(|(i, widget)| match tooltips.get(i) {
            Some(tooltip) => widget.with_tooltip(*tooltip),
            None => widget,
        })
        .collect()
}

fn row_y(top: f32, row: usize) -> f32 {
    top + row as f32 * ROW_STEP
}

fn column(x: f32, top: f32, entries: &[(&'static str, Action)]) -> Vec<Widget> {
    entries
        .iter()
        .enumerate()
        .map(|(row, (label, action))| {
            Widget::button(
                *label,
                canvas_rect(x, row_y(top, row), BUTTON_W, BUTTON_H),
                action.clone(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec2;

    fn labels(state: UiState) -> Vec<&'static str> {
        widgets_for(state).iter().map(|w| w.label).collect()
    }

    #[test]
    fn test_main_menu_has_no_navigation_pair() {
        assert_eq!(
            labels(UiState::MainMenu),
            ["NEW GAME", "CONTINUE", "SETTINGS", "HIGH SCORES", "Help"]
        );
    }

    #[test]
    fn test_every_other_screen_ends_with_back_and_main_menu() {
        for state in UiState::ALL {
            if state == UiState::MainMenu {
                continue;
            }
            let widgets = widgets_for(state);
            let tail: Vec<&Action> = widgets.iter().rev().take(2).map(|w| &w.action).collect();
            assert_eq!(tail, [&Action::MainMenu, &Action::Back], "{:?}", state);
        }
    }

    #[test]
    fn test_travel_column_layout() {
        let widgets = widgets_for(UiState::Travel);
        let hit = hit_test(&widgets, Vec2::new(60.0, 390.0)).map(|w| w.action.clone());
        assert_eq!(hit, Some(Action::Travel));
        let hit = hit_test(&widgets, Vec2::new(60.0, 110.0)).map(|w| w.action.clone());
        assert_eq!(hit, Some(Action::OpenInventory));
    }

    #[test]
    fn test_difficulty_buttons_are_colored() {
        let tones: Vec<Tone> = widgets_for(UiState::DifficultySelection)
            .iter()
            .take(3)
            .map(|w| w.tone)
            .collect();
        assert_eq!(tones, [Tone::Green, Tone::Blue, Tone::Red]);
    }

    #[test]
    fn test_main_menu_tooltips() {
        let widgets = widgets_for(UiState::MainMenu);
        assert_eq!(widgets[0].tooltip, Some("Start a new Oregon Trail adventure"));
        assert_eq!(widgets[2].tooltip, Some("Adjust game settings"));
        assert_eq!(widgets[3].tooltip, None);
    }

    #[test]
    fn test_buttons_do_not_overlap() {
        for state in UiState::ALL {
            let widgets = widgets_for(state);
            for (i, a) in widgets.iter().enumerate() {
                for b in widgets.iter().skip(i + 1) {
                    assert!(
                        a.rect.intersect(b.rect).is_empty(),
                        "{} overlaps {} on {:?}",
                        a.label,
                        b.label,
                        state
                    );
                }
            }
        }
    }
}
