use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::mouse::MouseWheel;
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputContext>().add_systems(
            Update,
            (
                manage_input_context,
                (read_pointer, read_keys, read_text, scroll_log),
            )
                .chain()
                .in_set(FlowSet::Input),
        );
    }
}

/// Who is allowed to receive hardware input this frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputContext {
    #[default]
    MainMenu,
    /// Any screen with only buttons plus Escape.
    Screen,
    /// Travel screen: buttons plus the I / M / H shortcuts.
    Travel,
    /// Character creation: buttons plus the name field.
    TextEntry,
    /// A hunt is running: only Space counts.
    Hunting,
    /// A modal is open: only its own buttons count.
    Modal,
}

pub fn context_for(state: UiState, modal_open: bool) -> InputContext {
    if modal_open {
        return InputContext::Modal;
    }
    match state {
        UiState::MainMenu => InputContext::MainMenu,
        UiState::Travel => InputContext::Travel,
        UiState::CharacterCreation => InputContext::TextEntry,
        UiState::Hunting => InputContext::Hunting,
        _ => InputContext::Screen,
    }
}

/// Keyboard shortcut for `key` in `context`, if any.
pub fn key_action(context: InputContext, key: KeyCode) -> Option<Action> {
    match (context, key) {
        (InputContext::Modal | InputContext::Hunting | InputContext::MainMenu, _) => None,
        (_, KeyCode::Escape) => Some(Action::Escape),
        (InputContext::Travel, KeyCode::KeyI) => Some(Action::OpenInventory),
        (InputContext::Travel, KeyCode::KeyM) => Some(Action::OpenMap),
        (InputContext::Travel, KeyCode::KeyH) => Some(Action::Hunt),
        _ => None,
    }
}

/// What a left click at `cursor` means in `context`.
pub fn click_action(
    context: InputContext,
    cursor: Vec2,
    widgets: &[Widget],
    modal: &ActiveModal,
) -> Option<Action> {
    match context {
        InputContext::Hunting => None,
        InputContext::Modal => hit_test(&modal.widgets(), cursor).map(|w| w.action.clone()),
        _ => hit_test(widgets, cursor).map(|w| w.action.clone()),
    }
}

/// Derives InputContext from UiState and the modal. ONE system, replaces per-reader guards.
fn manage_input_context(
    state: Res<State<UiState>>,
    modal: Res<ActiveModal>,
    mut context: ResMut<InputContext>,
) {
    let next = context_for(*state.get(), modal.is_open());
    if *context != next {
        *context = next;
    }
}

fn cursor_position(windows: &Query<&Window, With<PrimaryWindow>>) -> Option<Vec2> {
    windows.get_single().ok().and_then(Window::cursor_position)
}

fn read_pointer(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    context: Res<InputContext>,
    widgets: Res<ActiveWidgets>,
    modal: Res<ActiveModal>,
    mut name_entry: ResMut<NameEntry>,
    mut actions: EventWriter<Action>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(cursor) = cursor_position(&windows) else {
        return;
    };

    if *context == InputContext::TextEntry {
        name_entry.0.click(cursor);
    }
    if let Some(action) = click_action(*context, cursor, &widgets.0, &modal) {
        debug!("[Input] Click at {:?} -> {:?}", cursor, action);
        actions.send(action);
    }
}

fn read_keys(
    keys: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    context: Res<InputContext>,
    mut actions: EventWriter<Action>,
    mut shots: EventWriter<HuntShot>,
) {
    if *context == InputContext::Hunting {
        if keys.just_pressed(KeyCode::Space) {
            shots.send(HuntShot {
                cursor: cursor_position(&windows),
            });
        }
        return;
    }

    for key in keys.get_just_pressed() {
        if let Some(action) = key_action(*context, *key) {
            actions.send(action);
        }
    }
}

/// Printable characters, Backspace and Enter for the name field.
fn read_text(
    mut keyboard: EventReader<KeyboardInput>,
    context: Res<InputContext>,
    mut name_entry: ResMut<NameEntry>,
) {
    if *context != InputContext::TextEntry {
        keyboard.clear();
        return;
    }
    for event in keyboard.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }
        match &event.logical_key {
            Key::Character(text) => name_entry.0.type_text(text),
            Key::Space => name_entry.0.type_text(" "),
            Key::Backspace => name_entry.0.backspace(),
            Key::Enter => {
                if let Some(text) = name_entry.0.commit() {
                    info!("[Input] Name field submitted: {}", text);
                }
            }
            _ => {}
        }
    }
}

fn scroll_log(
    mut wheel: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    context: Res<InputContext>,
    config: Res<GameConfig>,
    mut log: ResMut<EventLog>,
) {
    if matches!(*context, InputContext::Hunting | InputContext::Modal) {
        wheel.clear();
        return;
    }
    let over_panel = cursor_position(&windows).is_some_and(|c| contains(log_panel_rect(), c));
    for event in wheel.read() {
        if !over_panel {
            continue;
        }
        if event.y > 0.0 {
            log.scroll_up(config.log_scroll_step);
        } else if event.y < 0.0 {
            log.scroll_down(config.log_scroll_step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_ignored_on_main_menu() {
        assert_eq!(key_action(InputContext::MainMenu, KeyCode::Escape), None);
        assert_eq!(
            key_action(InputContext::Screen, KeyCode::Escape),
            Some(Action::Escape)
        );
    }

    #[test]
    fn test_travel_shortcuts_only_on_travel() {
        assert_eq!(
            key_action(InputContext::Travel, KeyCode::KeyI),
            Some(Action::OpenInventory)
        );
        assert_eq!(key_action(InputContext::Travel, KeyCode::KeyM), Some(Action::OpenMap));
        assert_eq!(key_action(InputContext::Travel, KeyCode::KeyH), Some(Action::Hunt));
        assert_eq!(key_action(InputContext::Screen, KeyCode::KeyI), None);
        assert_eq!(key_action(InputContext::TextEntry, KeyCode::KeyM), None);
    }

    #[test]
    fn test_hunt_and_modal_swallow_keys() {
        for key in [KeyCode::Escape, KeyCode::KeyI, KeyCode::KeyH] {
            assert_eq!(key_action(InputContext::Hunting, key), None);
            assert_eq!(key_action(InputContext::Modal, key), None);
        }
    }

    #[test]
    fn test_context_prefers_modal() {
        assert_eq!(context_for(UiState::Travel, true), InputContext::Modal);
        assert_eq!(context_for(UiState::Travel, false), InputContext::Travel);
        assert_eq!(context_for(UiState::Shop, false), InputContext::Screen);
        assert_eq!(
            context_for(UiState::CharacterCreation, false),
            InputContext::TextEntry
        );
    }

    #[test]
    fn test_modal_click_ignores_screen_buttons() {
        let screen = vec![Widget::button(
            "BACK",
            canvas_rect(200.0, 300.0, 200.0, 100.0),
            Action::Back,
        )];
        let mut modal = ActiveModal::default();
        modal.open(Modal::confirm("Return to Main Menu?", Pending::ReturnToMainMenu));

        // Yes button of the confirm dialog overlaps the screen button.
        let yes = Vec2::new(260.0, 340.0);
        assert_eq!(
            click_action(InputContext::Modal, yes, &screen, &modal),
            Some(Action::ConfirmYes)
        );
        assert_eq!(
            click_action(InputContext::Modal, Vec2::new(10.0, 10.0), &screen, &modal),
            None
        );
        assert_eq!(
            click_action(InputContext::Screen, yes, &screen, &ActiveModal::default()),
            Some(Action::Back)
        );
    }

    #[test]
    fn test_clicks_ignored_while_hunting() {
        let screen = vec![Widget::button(
            "BACK",
            canvas_rect(50.0, 450.0, 200.0, 50.0),
            Action::Back,
        )];
        assert_eq!(
            click_action(
                InputContext::Hunting,
                Vec2::new(60.0, 460.0),
                &screen,
                &ActiveModal::default()
            ),
            None
        );
    }
}
